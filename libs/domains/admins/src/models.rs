use field_rules::{
    ValidationError, email_valid, optional_str, payload_object, reject_unknown_keys,
    required_str,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

const SUBJECT: &str = "admin";

/// Keys `PUT /auth/me` understands, in the order they are reported
pub const UPDATABLE_KEYS: [&str; 3] = ["name", "email", "password"];

/// A stored admin. Only the hash of the password is kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A row to insert; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Public view of an admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "a@example.com")]
    pub email: String,
    #[schema(example = "abcdefgh")]
    pub name: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    }
}

/// Body of `POST /auth/register`
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdmin {
    #[schema(example = "a@example.com")]
    pub email: String,
    #[schema(example = "abcdefgh")]
    pub name: String,
    #[schema(example = "abc123!@")]
    pub password: String,
}

impl CreateAdmin {
    /// Check the payload shape. The email is validated before the other
    /// keys are looked at; the remaining field rules are applied by the service.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let map = payload_object(payload, SUBJECT)?;
        let email = required_str(map, "email", SUBJECT)?;
        email_valid(email)?;
        Ok(Self {
            email: email.to_string(),
            name: required_str(map, "name", SUBJECT)?.to_string(),
            password: required_str(map, "password", SUBJECT)?.to_string(),
        })
    }
}

impl fmt::Debug for CreateAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAdmin")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `PUT /auth/me`: any non-empty subset of name, email and password
#[derive(Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdmin {
    #[schema(example = "newname1")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateAdmin {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let map = payload_object(payload, SUBJECT)?;
        reject_unknown_keys(map, &UPDATABLE_KEYS)?;
        Ok(Self {
            name: optional_str(map, "name")?.map(str::to_string),
            email: optional_str(map, "email")?.map(str::to_string),
            password: optional_str(map, "password")?.map(str::to_string),
        })
    }
}

impl fmt::Debug for UpdateAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateAdmin")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Body of `POST /auth/login`
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "a@example.com")]
    pub email: String,
    #[schema(example = "abc123!@")]
    pub password: String,
}

impl LoginRequest {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let map = payload_object(payload, SUBJECT)?;
        let email = required_str(map, "email", SUBJECT)?;
        email_valid(email)?;
        Ok(Self {
            email: email.to_string(),
            password: required_str(map, "password", SUBJECT)?.to_string(),
        })
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login. The token keys contain a space, as clients expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(rename = "access token")]
    pub access_token: String,
    #[serde(rename = "refresh token")]
    pub refresh_token: String,
}

/// A fresh access token minted from a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access_token: String,
}
