use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User};

/// Repository trait for User persistence.
///
/// Implementations enforce email uniqueness themselves and report a clash
/// as [`UserError::EmailTaken`], whatever the service checked beforehand.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user (active) and return it with its assigned id
    async fn insert(&self, input: CreateUser) -> UserResult<User>;

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Overwrite the stored row with the same id
    async fn update(&self, user: User) -> UserResult<User>;

    /// Remove a user; `false` when no row had that id
    async fn delete(&self, id: i32) -> UserResult<bool>;

    /// All users in id order
    async fn list_all(&self) -> UserResult<Vec<User>>;

    async fn exists_by_id(&self, id: i32) -> UserResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, User>,
    last_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// In-memory implementation of UserRepository (for development/testing).
///
/// Ids come from a counter that only grows, so deleted ids are never handed out again.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        let mut table = self.table.write().await;

        if table.email_taken(&input.email, None) {
            return Err(UserError::EmailTaken(input.email));
        }

        table.last_id += 1;
        let user = User {
            id: table.last_id,
            email: input.email,
            active: true,
        };
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }
        if table.email_taken(&user.email, Some(user.id)) {
            return Err(UserError::EmailTaken(user.email));
        }

        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn list_all(&self) -> UserResult<Vec<User>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }
}
