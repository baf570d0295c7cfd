//! # Axum Helpers
//!
//! Shared HTTP plumbing for the API binaries.
//!
//! ## Modules
//!
//! - **[`auth`]**: HS256 access/refresh tokens and the middlewares that gate routes on them
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`errors`]**: `AppError` and the `{"error": ...}` response body
//! - **[`extractors`]**: Raw JSON payload and `?id=` query extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(api_routes)?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

pub use auth::{
    JwtAuth, JwtClaims, JwtConfig, TokenError, TokenType, jwt_auth_middleware,
    jwt_refresh_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use errors::{AppError, ErrorResponse};

pub use extractors::{JsonPayload, QueryId};
