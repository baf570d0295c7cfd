use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AdminError, AdminResult};
use crate::models::{Admin, NewAdmin};

/// Repository trait for Admin persistence.
///
/// Implementations enforce email and name uniqueness themselves. An email
/// clash is reported before a name clash.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Store a new admin and return it with its assigned id
    async fn insert(&self, input: NewAdmin) -> AdminResult<Admin>;

    async fn find_by_id(&self, id: i32) -> AdminResult<Option<Admin>>;

    async fn find_by_email(&self, email: &str) -> AdminResult<Option<Admin>>;

    async fn find_by_name(&self, name: &str) -> AdminResult<Option<Admin>>;

    /// Overwrite the stored row with the same id
    async fn update(&self, admin: Admin) -> AdminResult<Admin>;

    /// Remove an admin; `false` when no row had that id
    async fn delete(&self, id: i32) -> AdminResult<bool>;

    /// All admins in id order
    async fn list_all(&self) -> AdminResult<Vec<Admin>>;

    async fn exists_by_id(&self, id: i32) -> AdminResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> AdminResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_name(&self, name: &str) -> AdminResult<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Admin>,
    last_id: i32,
}

impl Table {
    fn check_unique(&self, email: &str, name: &str, except: Option<i32>) -> AdminResult<()> {
        let others = || self.rows.values().filter(|a| Some(a.id) != except);

        if others().any(|a| a.email == email) {
            return Err(AdminError::EmailTaken(email.to_string()));
        }
        if others().any(|a| a.name == name) {
            return Err(AdminError::NameTaken(name.to_string()));
        }
        Ok(())
    }
}

/// In-memory implementation of AdminRepository (for development/testing).
#[derive(Debug, Default, Clone)]
pub struct InMemoryAdminRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn insert(&self, input: NewAdmin) -> AdminResult<Admin> {
        let mut table = self.table.write().await;
        table.check_unique(&input.email, &input.name, None)?;

        table.last_id += 1;
        let admin = Admin {
            id: table.last_id,
            email: input.email,
            name: input.name,
            password_hash: input.password_hash,
        };
        table.rows.insert(admin.id, admin.clone());

        Ok(admin)
    }

    async fn find_by_id(&self, id: i32) -> AdminResult<Option<Admin>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AdminResult<Option<Admin>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AdminResult<Option<Admin>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|a| a.name == name).cloned())
    }

    async fn update(&self, admin: Admin) -> AdminResult<Admin> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&admin.id) {
            return Err(AdminError::NotFound(admin.id));
        }
        table.check_unique(&admin.email, &admin.name, Some(admin.id))?;

        table.rows.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn delete(&self, id: i32) -> AdminResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn list_all(&self) -> AdminResult<Vec<Admin>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }
}
