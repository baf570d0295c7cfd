//! Field-level validation shared by the users and admins domains.
//!
//! Every rule either passes or fails with a [`ValidationError`] carrying a
//! [`FailureKind`] and the message shown to API clients.
//!
//! ```
//! use field_rules::{FailureKind, name_valid};
//!
//! assert!(name_valid("abcdefgh").is_ok());
//! assert_eq!(name_valid("ab").unwrap_err().kind(), FailureKind::TooShort);
//! ```

pub mod error;
pub mod payload;
pub mod rules;

pub use error::{FailureKind, ValidationError};
pub use payload::{optional_str, payload_object, reject_unknown_keys, required_str};
pub use rules::{
    EMAIL_MAX, NAME_MAX, NAME_MIN, PASSWORD_MAX, PASSWORD_MIN, email_valid, name_valid,
    password_valid, require_id, require_key,
};
