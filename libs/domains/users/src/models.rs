use field_rules::{ValidationError, payload_object, reject_unknown_keys, required_str};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

const SUBJECT: &str = "user";

/// A stored user, as listed by `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "lyle@notreal.com")]
    pub email: String,
    /// Set at creation, never changed through the API
    pub active: bool,
}

/// What the single-user endpoints return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "lyle@notreal.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Body of `POST /user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "new.user@example.com")]
    pub email: String,
}

impl CreateUser {
    /// Check the payload shape; field rules are applied by the service.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let map = payload_object(payload, SUBJECT)?;
        Ok(Self {
            email: required_str(map, "email", SUBJECT)?.to_string(),
        })
    }
}

/// Body of `PUT /user?id=`. `email` is the only updatable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateUser {
    #[schema(example = "renamed@example.com")]
    pub email: String,
}

impl UpdateUser {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let map = payload_object(payload, SUBJECT)?;
        reject_unknown_keys(map, &["email"])?;
        Ok(Self {
            email: required_str(map, "email", SUBJECT)?.to_string(),
        })
    }
}
