//! Salted argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AdminError, AdminResult};

/// Hash a password with a fresh random salt, in PHC string format.
pub fn hash_password(password: &str) -> AdminResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AdminError::Internal(format!("Password hashing failed: {}", e)))
}

/// `false` on mismatch; an unparsable stored hash is an internal error.
pub fn verify_password(password: &str, hash: &str) -> AdminResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AdminError::Internal(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
