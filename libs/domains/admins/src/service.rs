use axum_helpers::{JwtAuth, TokenError};
use field_rules::{email_valid, name_valid, password_valid, require_id, require_key};
use std::sync::Arc;

use crate::error::{AdminError, AdminResult};
use crate::models::{
    Admin, AdminResponse, CreateAdmin, LoginRequest, LoginResponse, NewAdmin, RefreshResponse,
    UpdateAdmin,
};
use crate::password::{hash_password, verify_password};
use crate::repository::AdminRepository;

const SUBJECT: &str = "admin";

fn held_by_other(holder: Option<Admin>, id: i32) -> bool {
    holder.is_some_and(|a| a.id != id)
}

fn token_err(err: TokenError) -> AdminError {
    AdminError::Internal(format!("Token issuance failed: {}", err))
}

/// Service layer for Admin business logic: registration, login and
/// management of the authenticated admin's own record.
pub struct AdminService<R: AdminRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: AdminRepository> Clone for AdminService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
        }
    }
}

impl<R: AdminRepository> AdminService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Token issuer shared with the route gates
    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    pub async fn register(&self, input: CreateAdmin) -> AdminResult<AdminResponse> {
        email_valid(&input.email)?;
        name_valid(&input.name)?;
        password_valid(&input.password)?;

        if self.admin_exists_with_email(&input.email).await? {
            return Err(AdminError::EmailTaken(input.email));
        }
        if self.admin_exists_with_name(&input.name).await? {
            return Err(AdminError::NameTaken(input.name));
        }

        let admin = self
            .repository
            .insert(NewAdmin {
                password_hash: hash_password(&input.password)?,
                email: input.email,
                name: input.name,
            })
            .await?;
        Ok(admin.into())
    }

    /// Check credentials and issue an access/refresh token pair.
    pub async fn login(&self, input: LoginRequest) -> AdminResult<LoginResponse> {
        email_valid(&input.email)?;
        password_valid(&input.password)?;

        let admin = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(AdminError::UnknownEmail)?;

        if !verify_password(&input.password, &admin.password_hash)? {
            tracing::warn!(admin_id = admin.id, "Login with a wrong password");
            return Err(AdminError::InvalidPassword);
        }

        let subject = admin.id.to_string();
        let access_token = self.jwt.create_access_token(&subject).map_err(token_err)?;
        let refresh_token = self.jwt.create_refresh_token(&subject).map_err(token_err)?;

        Ok(LoginResponse {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            access_token,
            refresh_token,
        })
    }

    pub async fn refresh(&self, admin_id: i32) -> AdminResult<RefreshResponse> {
        let admin = self.existing(admin_id).await?;
        let access_token = self
            .jwt
            .create_access_token(&admin.id.to_string())
            .map_err(token_err)?;
        Ok(RefreshResponse { access_token })
    }

    pub async fn get_admin(&self, id: i32) -> AdminResult<AdminResponse> {
        Ok(self.existing(id).await?.into())
    }

    /// Apply a partial update. Every present field is validated and checked
    /// for clashes before anything is written; the admin's own current
    /// email and name do not count as clashes.
    pub async fn update_admin(&self, id: i32, input: UpdateAdmin) -> AdminResult<AdminResponse> {
        let mut admin = self.existing(id).await?;

        if let Some(name) = &input.name {
            name_valid(name)?;
        }
        if let Some(email) = &input.email {
            email_valid(email)?;
        }
        if let Some(password) = &input.password {
            password_valid(password)?;
        }

        if let Some(name) = input.name {
            if held_by_other(self.repository.find_by_name(&name).await?, id) {
                return Err(AdminError::NameTaken(name));
            }
            admin.name = name;
        }
        if let Some(email) = input.email {
            if held_by_other(self.repository.find_by_email(&email).await?, id) {
                return Err(AdminError::EmailTaken(email));
            }
            admin.email = email;
        }
        if let Some(password) = input.password {
            admin.password_hash = hash_password(&password)?;
        }

        let admin = self.repository.update(admin).await?;
        Ok(admin.into())
    }

    /// Delete an admin and return the row as it was.
    pub async fn delete_admin(&self, id: i32) -> AdminResult<AdminResponse> {
        let admin = self.existing(id).await?;

        if !self.repository.delete(id).await? {
            return Err(AdminError::NotFound(id));
        }

        Ok(admin.into())
    }

    pub async fn list_admins(&self) -> AdminResult<Vec<AdminResponse>> {
        let admins = self.repository.list_all().await?;
        Ok(admins.into_iter().map(Into::into).collect())
    }

    pub async fn admin_exists_with_id(&self, id: i32) -> AdminResult<bool> {
        let id = require_id(id, SUBJECT)?;
        self.repository.exists_by_id(id).await
    }

    pub async fn admin_exists_with_email(&self, email: &str) -> AdminResult<bool> {
        let email = require_key(email, "admin_email")?;
        self.repository.exists_by_email(email).await
    }

    pub async fn admin_exists_with_name(&self, name: &str) -> AdminResult<bool> {
        let name = require_key(name, "admin_name")?;
        self.repository.exists_by_name(name).await
    }

    async fn existing(&self, id: i32) -> AdminResult<Admin> {
        let id = require_id(id, SUBJECT)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AdminError::NotFound(id))
    }
}
