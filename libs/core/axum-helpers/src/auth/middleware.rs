use super::jwt::{JwtAuth, TokenType};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn authorize(
    auth: &JwtAuth,
    expected: TokenType,
    headers: &HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let Some(token) = extract_bearer_token(headers) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err((StatusCode::UNAUTHORIZED, "No token provided"));
    };

    let claims = match auth.verify_token_of_type(token, expected) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "JWT verification failed");
            return Err((StatusCode::UNAUTHORIZED, "Invalid token"));
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admit requests carrying a valid access token.
///
/// Answers a plain-text 401 before the handler runs when the token is
/// missing, malformed, expired, or a refresh token. On success the decoded
/// `JwtClaims` are available to handlers through `Extension<JwtClaims>`.
///
/// # Example
///
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/me", get(me))
///     .route_layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    authorize(&auth, TokenType::Access, &headers, request, next).await
}

/// Admit requests carrying a valid refresh token. Access tokens are rejected.
pub async fn jwt_refresh_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    authorize(&auth, TokenType::Refresh, &headers, request, next).await
}
