//! Identity guard for routes that act on the authenticated admin.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_helpers::{AppError, JwtClaims};
use std::sync::Arc;

use crate::error::AdminError;
use crate::repository::AdminRepository;
use crate::service::AdminService;

/// Id of the admin the request's token was issued to, checked to still exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAdmin(pub i32);

/// Reject tokens whose subject no longer names an admin.
///
/// Must run after one of the JWT gates, which put the `JwtClaims` into the
/// request. Answers 401 `{"error": ...}`; on success inserts [`CurrentAdmin`].
///
/// # Example
///
/// ```ignore
/// let routes = Router::new()
///     .route("/me", get(me))
///     .route_layer(from_fn_with_state(service.clone(), require_existing_admin::<R>))
///     .route_layer(from_fn_with_state(jwt, jwt_auth_middleware));
/// ```
pub async fn require_existing_admin<R: AdminRepository + 'static>(
    State(service): State<Arc<AdminService<R>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(id) = request
        .extensions()
        .get::<JwtClaims>()
        .and_then(JwtClaims::subject_as::<i32>)
    else {
        return Err(AppError::Unauthorized(
            "The token does not identify an admin".to_string(),
        ));
    };

    match service.admin_exists_with_id(id).await {
        Ok(true) => {}
        Ok(false) | Err(AdminError::Validation(_)) => {
            tracing::warn!(admin_id = id, "Token presented for a missing admin");
            return Err(AppError::Unauthorized(AdminError::NotFound(id).to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    request.extensions_mut().insert(CurrentAdmin(id));
    Ok(next.run(request).await)
}
