use field_rules::{email_valid, require_id, require_key};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

const SUBJECT: &str = "user";

/// Service layer for User business logic.
///
/// Every write runs the same sequence: validate the id, validate each field,
/// check uniqueness, then touch the store.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        email_valid(&input.email)?;

        if self.user_exists_with_email(&input.email).await? {
            return Err(UserError::EmailTaken(input.email));
        }

        let user = self.repository.insert(input).await?;
        Ok(user.into())
    }

    pub async fn get_user(&self, id: i32) -> UserResult<UserResponse> {
        Ok(self.existing(id).await?.into())
    }

    /// Replace the user's email. Re-submitting the current email is accepted.
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> UserResult<UserResponse> {
        let mut user = self.existing(id).await?;

        email_valid(&input.email)?;

        if let Some(holder) = self.repository.find_by_email(&input.email).await? {
            if holder.id != id {
                return Err(UserError::EmailTaken(input.email));
            }
        }

        user.email = input.email;
        let user = self.repository.update(user).await?;
        Ok(user.into())
    }

    /// Delete a user and return the row as it was.
    pub async fn delete_user(&self, id: i32) -> UserResult<UserResponse> {
        let user = self.existing(id).await?;

        if !self.repository.delete(id).await? {
            // Removed by a concurrent request in between
            return Err(UserError::NotFound(id));
        }

        Ok(user.into())
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list_all().await
    }

    pub async fn user_exists_with_id(&self, id: i32) -> UserResult<bool> {
        let id = require_id(id, SUBJECT)?;
        self.repository.exists_by_id(id).await
    }

    pub async fn user_exists_with_email(&self, email: &str) -> UserResult<bool> {
        let email = require_key(email, "user_email")?;
        self.repository.exists_by_email(email).await
    }

    async fn existing(&self, id: i32) -> UserResult<User> {
        let id = require_id(id, SUBJECT)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use field_rules::FailureKind;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn create(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = service();
        let user = service.create_user(create("a@example.com")).await.unwrap();
        assert_eq!(
            user,
            UserResponse {
                id: 1,
                email: "a@example.com".into()
            }
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email() {
        let err = service().create_user(create("not-an-email")).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::InvalidFormat));
        assert_eq!(err.to_string(), "The email address is invalid");
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate() {
        let service = service();
        service.create_user(create("a@example.com")).await.unwrap();
        let err = service.create_user(create("a@example.com")).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::AlreadyExists));
        assert_eq!(
            err.to_string(),
            "The email adress a@example.com is already in use."
        );
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let err = service().get_user(42).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::NoSuchId));
        assert_eq!(err.to_string(), "The user with id 42 does not exist.");
    }

    #[tokio::test]
    async fn test_non_positive_id_is_empty_input() {
        let err = service().get_user(0).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::EmptyInput));
    }

    #[tokio::test]
    async fn test_update_user() {
        let service = service();
        let a = service.create_user(create("a@example.com")).await.unwrap();
        service.create_user(create("b@example.com")).await.unwrap();

        let same = UpdateUser {
            email: "a@example.com".into(),
        };
        assert!(service.update_user(a.id, same).await.is_ok());

        let taken = UpdateUser {
            email: "b@example.com".into(),
        };
        let err = service.update_user(a.id, taken).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::AlreadyExists));

        let fresh = UpdateUser {
            email: "c@example.com".into(),
        };
        let updated = service.update_user(a.id, fresh).await.unwrap();
        assert_eq!(updated.email, "c@example.com");
        assert_eq!(service.get_user(a.id).await.unwrap().email, "c@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let input = UpdateUser {
            email: "a@example.com".into(),
        };
        let err = service().update_user(5, input).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::NoSuchId));
    }

    #[tokio::test]
    async fn test_delete_then_get_fails() {
        let service = service();
        let user = service.create_user(create("a@example.com")).await.unwrap();

        let deleted = service.delete_user(user.id).await.unwrap();
        assert_eq!(deleted, user);

        let err = service.get_user(user.id).await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::NoSuchId));
        assert!(service.delete_user(user.id).await.is_err());
    }

    #[tokio::test]
    async fn test_exists_helpers() {
        let service = service();
        let user = service.create_user(create("a@example.com")).await.unwrap();

        assert!(service.user_exists_with_id(user.id).await.unwrap());
        assert!(!service.user_exists_with_id(99).await.unwrap());
        assert!(service.user_exists_with_email("a@example.com").await.unwrap());
        assert!(!service.user_exists_with_email("b@example.com").await.unwrap());

        let err = service.user_exists_with_email("").await.unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::EmptyInput));
        assert_eq!(err.to_string(), "The user_email has to be provided.");
        assert!(service.user_exists_with_id(-1).await.is_err());
    }

    #[tokio::test]
    async fn test_list_users() {
        let service = service();
        service.create_user(create("a@example.com")).await.unwrap();
        service.create_user(create("b@example.com")).await.unwrap();

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.active));
    }
}
