use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ErrorResponse, JsonPayload, JwtClaims, QueryId,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, UserResponse, CreateUser, UpdateUser, ErrorResponse),
        responses(BadRequestResponse, UnauthorizedResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "User management endpoints"))
)]
pub struct ApiDoc;

/// `GET /users`, open to anyone
pub fn public_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .with_state(Arc::new(service))
}

/// `/user` CRUD. The caller layers authentication on top.
pub fn protected_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route(
            "/user",
            get(get_user)
                .post(create_user)
                .put(update_user)
                .delete(delete_user),
        )
        .with_state(Arc::new(service))
}

/// Admin id from the access token, when the auth layer ran
fn caller(claims: &Option<Extension<JwtClaims>>) -> &str {
    claims
        .as_ref()
        .map(|Extension(claims)| claims.sub.as_str())
        .unwrap_or("anonymous")
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    tracing::info!(count = users.len(), "Returning all users");
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user",
    tag = TAG,
    request_body = CreateUser,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    JsonPayload(payload): JsonPayload,
) -> UserResult<impl IntoResponse> {
    let input = CreateUser::from_payload(&payload)?;
    let user = service.create_user(input).await?;

    tracing::info!(admin_id = caller(&claims), user_id = user.id, email = %user.email, "Admin created a user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/user",
    tag = TAG,
    params(("id" = i32, Query, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    QueryId(id): QueryId,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    tracing::info!(admin_id = caller(&claims), user_id = id, "Admin retrieved a user");
    Ok(Json(user))
}

/// Change a user's email
#[utoipa::path(
    put,
    path = "/user",
    tag = TAG,
    params(("id" = i32, Query, description = "User id")),
    request_body = UpdateUser,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    QueryId(id): QueryId,
    JsonPayload(payload): JsonPayload,
) -> UserResult<Json<UserResponse>> {
    let input = UpdateUser::from_payload(&payload)?;
    let user = service.update_user(id, input).await?;
    tracing::info!(admin_id = caller(&claims), user_id = id, "Admin updated a user");
    Ok(Json(user))
}

/// Delete a user, returning what was removed
#[utoipa::path(
    delete,
    path = "/user",
    tag = TAG,
    params(("id" = i32, Query, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    claims: Option<Extension<JwtClaims>>,
    QueryId(id): QueryId,
) -> UserResult<Json<UserResponse>> {
    let user = service.delete_user(id).await?;
    tracing::info!(admin_id = caller(&claims), user_id = id, "Admin deleted a user");
    Ok(Json(user))
}
