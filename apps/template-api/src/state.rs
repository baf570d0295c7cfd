//! Shared application state, built once in `main`.

use axum_helpers::JwtAuth;

/// Cloned into the routers that need it; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Token issuer and verifier, shared by login and the route gates
    pub jwt: JwtAuth,
}
