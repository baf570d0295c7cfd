//! Admins Domain
//!
//! Admins are the accounts that log in and manage users. Each has a unique
//! email and a unique alphanumeric name; passwords are stored as argon2
//! hashes and never leave the service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /register, /login, /refresh, /me, /admins
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │    Guard    │  ← Token subject must still name an admin
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, uniqueness, hashing, token issuance
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and Postgres impls)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_admins::{handlers, AdminService, InMemoryAdminRepository};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-signing-secret-of-at-least-32-chars"));
//! let service = AdminService::new(InMemoryAdminRepository::new(), jwt);
//! let auth_routes = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{AdminError, AdminResult};
pub use guard::{CurrentAdmin, require_existing_admin};
pub use handlers::ApiDoc;
pub use models::{
    Admin, AdminResponse, CreateAdmin, LoginRequest, LoginResponse, NewAdmin, RefreshResponse,
    UpdateAdmin,
};
pub use postgres::PgAdminRepository;
pub use repository::{AdminRepository, InMemoryAdminRepository};
pub use service::AdminService;
