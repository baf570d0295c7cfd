use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains("duplicate key value")
}

fn map_write_err(err: DbErr, email: String) -> UserError {
    if is_unique_violation(&err) {
        UserError::EmailTaken(email)
    } else {
        UserError::Internal(format!("Database error: {}", err))
    }
}

fn internal(err: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        let model = entity::ActiveModel {
            id: NotSet,
            email: Set(input.email.clone()),
            active: Set(true),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_write_err(e, input.email))?;

        tracing::info!(user_id = model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(internal)?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let model = entity::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            active: Set(user.active),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound(id),
            other => map_write_err(other, user.email),
        })?;

        tracing::info!(user_id = id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(internal)?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
