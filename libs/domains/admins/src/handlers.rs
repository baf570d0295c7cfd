use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ErrorResponse, JsonPayload, jwt_auth_middleware, jwt_refresh_middleware,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AdminResult;
use crate::guard::{CurrentAdmin, require_existing_admin};
use crate::models::{
    AdminResponse, CreateAdmin, LoginRequest, LoginResponse, RefreshResponse, UpdateAdmin,
};
use crate::repository::AdminRepository;
use crate::service::AdminService;

pub const TAG: &str = "admins";

/// OpenAPI documentation for the Admins API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, refresh, list_admins, get_me, update_me, delete_me),
    components(
        schemas(
            AdminResponse,
            CreateAdmin,
            UpdateAdmin,
            LoginRequest,
            LoginResponse,
            RefreshResponse,
            ErrorResponse
        ),
        responses(BadRequestResponse, UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "Admin registration, login and self-management"))
)]
pub struct ApiDoc;

/// Create the admins router. Mount it under `/auth`.
pub fn router<R: AdminRepository + 'static>(service: AdminService<R>) -> Router {
    let jwt = service.jwt().clone();
    let shared_service = Arc::new(service);

    let refresh_routes = Router::new()
        .route("/refresh", get(refresh))
        .route_layer(from_fn_with_state(
            shared_service.clone(),
            require_existing_admin::<R>,
        ))
        .route_layer(from_fn_with_state(jwt.clone(), jwt_refresh_middleware));

    let me_routes = Router::new()
        .route("/me", get(get_me).put(update_me).delete(delete_me))
        .route_layer(from_fn_with_state(
            shared_service.clone(),
            require_existing_admin::<R>,
        ))
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/admins", get(list_admins))
        .merge(refresh_routes)
        .merge(me_routes)
        .with_state(shared_service)
}

/// Register a new admin
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = CreateAdmin,
    responses(
        (status = 201, description = "Admin registered", body = AdminResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
    JsonPayload(payload): JsonPayload,
) -> AdminResult<impl IntoResponse> {
    let input = CreateAdmin::from_payload(&payload)?;
    let admin = service.register(input).await?;

    tracing::info!(admin_id = admin.id, name = %admin.name, "Admin registered");
    Ok((StatusCode::CREATED, Json(admin)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
    JsonPayload(payload): JsonPayload,
) -> AdminResult<Json<LoginResponse>> {
    let input = LoginRequest::from_payload(&payload)?;
    let session = service.login(input).await?;

    tracing::info!(admin_id = session.id, "Admin logged in");
    Ok(Json(session))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    get,
    path = "/refresh",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
    Extension(CurrentAdmin(id)): Extension<CurrentAdmin>,
) -> AdminResult<Json<RefreshResponse>> {
    let response = service.refresh(id).await?;
    tracing::debug!(admin_id = id, "Access token refreshed");
    Ok(Json(response))
}

/// List all admins
#[utoipa::path(
    get,
    path = "/admins",
    tag = TAG,
    responses(
        (status = 200, description = "Every registered admin", body = Vec<AdminResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_admins<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
) -> AdminResult<Json<Vec<AdminResponse>>> {
    Ok(Json(service.list_admins().await?))
}

/// The authenticated admin
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The admin the token belongs to", body = AdminResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_me<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
    Extension(CurrentAdmin(id)): Extension<CurrentAdmin>,
) -> AdminResult<Json<AdminResponse>> {
    Ok(Json(service.get_admin(id).await?))
}

/// Change the authenticated admin's name, email or password
#[utoipa::path(
    put,
    path = "/me",
    tag = TAG,
    request_body = UpdateAdmin,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin updated", body = AdminResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_me<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
    Extension(CurrentAdmin(id)): Extension<CurrentAdmin>,
    JsonPayload(payload): JsonPayload,
) -> AdminResult<Json<AdminResponse>> {
    let input = UpdateAdmin::from_payload(&payload)?;
    let admin = service.update_admin(id, input).await?;

    tracing::info!(admin_id = id, "Admin updated their record");
    Ok(Json(admin))
}

/// Delete the authenticated admin
#[utoipa::path(
    delete,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin deleted", body = AdminResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_me<R: AdminRepository>(
    State(service): State<Arc<AdminService<R>>>,
    Extension(CurrentAdmin(id)): Extension<CurrentAdmin>,
) -> AdminResult<Json<AdminResponse>> {
    let admin = service.delete_admin(id).await?;

    tracing::info!(admin_id = id, "Admin deleted their record");
    Ok(Json(admin))
}
