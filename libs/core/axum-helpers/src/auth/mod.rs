//! Token-based authentication.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens whose subject is the caller's id
//! - [`jwt_auth_middleware`] admits requests carrying a valid *access* token
//! - [`jwt_refresh_middleware`] admits requests carrying a valid *refresh* token
//!
//! Both middlewares insert the decoded [`JwtClaims`] into the request
//! extensions, where handlers pick them up with `Extension<JwtClaims>`.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/me", get(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, REFRESH_TOKEN_TTL, TokenError, TokenType};
pub use middleware::{jwt_auth_middleware, jwt_refresh_middleware};
