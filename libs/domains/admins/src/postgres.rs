use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use crate::{
    entity,
    error::{AdminError, AdminResult},
    models::{Admin, NewAdmin},
    repository::AdminRepository,
};

/// Unique index on `admins.name`, created by the migrations
const NAME_CONSTRAINT: &str = "uq_admins_name";

/// PostgreSQL implementation of AdminRepository using SeaORM
#[derive(Clone)]
pub struct PgAdminRepository {
    db: DatabaseConnection,
}

impl PgAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Tell an email clash from a name clash by the violated constraint.
fn map_write_err(err: DbErr, email: String, name: String) -> AdminError {
    let message = match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
        _ => {
            let text = err.to_string();
            text.contains("duplicate key value").then_some(text)
        }
    };

    match message {
        Some(m) if m.contains(NAME_CONSTRAINT) => AdminError::NameTaken(name),
        Some(_) => AdminError::EmailTaken(email),
        None => internal(err),
    }
}

fn internal(err: DbErr) -> AdminError {
    AdminError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn insert(&self, input: NewAdmin) -> AdminResult<Admin> {
        let model = entity::ActiveModel {
            id: NotSet,
            email: Set(input.email.clone()),
            name: Set(input.name.clone()),
            password_hash: Set(input.password_hash),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_write_err(e, input.email, input.name))?;

        tracing::info!(admin_id = model.id, name = %model.name, "Registered admin");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> AdminResult<Option<Admin>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> AdminResult<Option<Admin>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> AdminResult<Option<Admin>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, admin: Admin) -> AdminResult<Admin> {
        let id = admin.id;
        let model = entity::ActiveModel {
            id: Set(admin.id),
            email: Set(admin.email.clone()),
            name: Set(admin.name.clone()),
            password_hash: Set(admin.password_hash),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => AdminError::NotFound(id),
            other => map_write_err(other, admin.email, admin.name),
        })?;

        tracing::info!(admin_id = id, "Updated admin");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> AdminResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected > 0 {
            tracing::info!(admin_id = id, "Deleted admin");
        }
        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> AdminResult<Vec<Admin>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, RuntimeErr};

    fn row(id: i32, email: &str, name: &str) -> entity::Model {
        entity::Model {
            id,
            email: email.to_string(),
            name: name.to_string(),
            password_hash: "$argon2id$v=19$stub".to_string(),
        }
    }

    fn new_admin() -> NewAdmin {
        NewAdmin {
            email: "a@example.com".into(),
            name: "abcdefgh".into(),
            password_hash: "$argon2id$v=19$stub".into(),
        }
    }

    fn duplicate(constraint: &str) -> DbErr {
        DbErr::Query(RuntimeErr::Internal(format!(
            "duplicate key value violates unique constraint \"{constraint}\""
        )))
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "a@example.com", "abcdefgh")]])
            .into_connection();
        let repo = PgAdminRepository::new(db);

        let admin = repo.insert(new_admin()).await.unwrap();
        assert_eq!(admin.id, 3);
        assert_eq!(admin.name, "abcdefgh");
    }

    #[tokio::test]
    async fn test_unique_violations_name_the_field() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([duplicate("uq_admins_name"), duplicate("uq_admins_email")])
            .into_connection();
        let repo = PgAdminRepository::new(db);

        assert!(matches!(
            repo.insert(new_admin()).await,
            Err(AdminError::NameTaken(name)) if name == "abcdefgh"
        ));
        assert!(matches!(
            repo.insert(new_admin()).await,
            Err(AdminError::EmailTaken(email)) if email == "a@example.com"
        ));
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![row(1, "a@example.com", "abcdefgh")],
                Vec::<entity::Model>::new(),
            ])
            .into_connection();
        let repo = PgAdminRepository::new(db);

        assert_eq!(
            repo.find_by_name("abcdefgh").await.unwrap().map(|a| a.id),
            Some(1)
        );
        assert!(repo.find_by_name("missing1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgAdminRepository::new(db);

        assert!(matches!(
            repo.list_all().await,
            Err(AdminError::Internal(_))
        ));
    }
}
