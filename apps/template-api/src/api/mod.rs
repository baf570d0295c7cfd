use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use domain_admins::{
    AdminRepository, AdminService, PgAdminRepository, require_existing_admin,
};
use domain_users::{PgUserRepository, UserRepository, UserService};
use serde_json::{Value, json};
use std::sync::Arc;

pub mod health;

/// Builds the services over Postgres and returns the stateless API router.
pub fn routes(state: &crate::state::AppState) -> Router {
    let users = UserService::new(PgUserRepository::new(state.db.clone()));
    let admins = AdminService::new(PgAdminRepository::new(state.db.clone()), state.jwt.clone());
    build_router(users, admins, state.jwt.clone())
}

/// Compose the route table over any repositories.
///
/// - `/` greeting and `/users` are public
/// - `/auth/*` gates its own routes
/// - `/user` needs an access token whose admin still exists
pub fn build_router<U, A>(users: UserService<U>, admins: AdminService<A>, jwt: JwtAuth) -> Router
where
    U: UserRepository + 'static,
    A: AdminRepository + 'static,
{
    let guard_state = Arc::new(admins.clone());

    let user_routes = domain_users::handlers::protected_router(users.clone())
        .route_layer(from_fn_with_state(guard_state, require_existing_admin::<A>))
        .route_layer(from_fn_with_state(jwt, jwt_auth_middleware));

    Router::new()
        .route("/", get(hello))
        .nest("/auth", domain_admins::handlers::router(admins))
        .merge(user_routes)
        .merge(domain_users::handlers::public_router(users))
}

/// Creates a router with the /ready endpoint that performs the database check.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

async fn hello() -> Json<Value> {
    Json(json!({"hello": "from template api"}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::AUTHORIZATION};
    use axum_helpers::JwtConfig;
    use domain_admins::InMemoryAdminRepository;
    use domain_users::InMemoryUserRepository;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let jwt = JwtAuth::new(&JwtConfig::new("api-test-secret-that-is-32-chars-long"));
        build_router(
            UserService::new(InMemoryUserRepository::new()),
            AdminService::new(InMemoryAdminRepository::new(), jwt.clone()),
            jwt,
        )
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    /// Register and log in, returning the access token
    async fn admin_token(app: &Router, email: &str, name: &str) -> String {
        let credentials = json!({"email": email, "name": name, "password": "abc123!@"});
        let (status, _) = send(app, "POST", "/auth/register", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::CREATED);

        let login = json!({"email": email, "password": "abc123!@"});
        let (status, body) = send(app, "POST", "/auth/login", None, Some(login)).await;
        assert_eq!(status, StatusCode::OK);
        body["access token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_greeting_ignores_authentication() {
        let app = app();
        let expected = json!({"hello": "from template api"});

        assert_eq!(send(&app, "GET", "/", None, None).await, (StatusCode::OK, expected.clone()));
        assert_eq!(
            send(&app, "GET", "/", Some("not-a-token"), None).await,
            (StatusCode::OK, expected)
        );
    }

    #[tokio::test]
    async fn test_user_routes_require_access_token() {
        let app = app();
        let body = json!({"email": "a@example.com"});

        let (status, text) = send(&app, "POST", "/user", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(text, "No token provided");

        let (status, _) = send(&app, "POST", "/user", Some("garbage"), Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Listing stays public
        let (status, users) = send(&app, "GET", "/users", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users, json!([]));
    }

    #[tokio::test]
    async fn test_admin_manages_users() {
        let app = app();
        let token = admin_token(&app, "admin@example.com", "admin123").await;
        let token = Some(token.as_str());

        let (status, created) =
            send(&app, "POST", "/user", token, Some(json!({"email": "u@example.com"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 1, "email": "u@example.com"}));

        let (status, updated) = send(
            &app,
            "PUT",
            "/user?id=1",
            token,
            Some(json!({"email": "v@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], "v@example.com");

        let (status, deleted) = send(&app, "DELETE", "/user?id=1", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({"id": 1, "email": "v@example.com"}));

        let (status, body) = send(&app, "GET", "/user?id=1", token, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "The user with id 1 does not exist.");
    }

    #[tokio::test]
    async fn test_users_and_admins_share_no_email_namespace() {
        let app = app();
        let token = admin_token(&app, "same@example.com", "admin123").await;

        let (status, _) = send(
            &app,
            "POST",
            "/user",
            Some(&token),
            Some(json!({"email": "same@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_deleted_admin_loses_user_access() {
        let app = app();
        let token = admin_token(&app, "admin@example.com", "admin123").await;

        let (status, _) = send(&app, "DELETE", "/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            "/user",
            Some(&token),
            Some(json!({"email": "u@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "The admin with id 1 does not exist.");
    }

    #[tokio::test]
    async fn test_registration_boundaries() {
        let app = app();
        let register = |name: String, password: &str| {
            json!({"email": format!("{name}@example.com"), "name": name, "password": password})
        };

        for name in ["ab".to_string(), "a".repeat(20), "abc_def".to_string()] {
            let (status, _) =
                send(&app, "POST", "/auth/register", None, Some(register(name, "abc123!@"))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
        for password in ["a!c", "abc1234", &format!("{}!", "a".repeat(19))] {
            let (status, _) = send(
                &app,
                "POST",
                "/auth/register",
                None,
                Some(register("abcdefgh".to_string(), password)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{password}");
        }

        let (status, _) = send(
            &app,
            "POST",
            "/auth/register",
            None,
            Some(register("abc".to_string(), "ab!c")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_login_returns_registered_id() {
        let app = app();
        let credentials = json!({"email": "a@example.com", "name": "abcdefgh", "password": "abc123!@"});
        let (_, registered) = send(&app, "POST", "/auth/register", None, Some(credentials)).await;

        let login = json!({"email": "a@example.com", "password": "abc123!@"});
        let (status, session) = send(&app, "POST", "/auth/login", None, Some(login)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["id"], registered["id"]);
        assert!(!session["refresh token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_me_rejects_unknown_key() {
        let app = app();
        let token = admin_token(&app, "a@example.com", "abcdefgh").await;

        let (status, body) =
            send(&app, "PUT", "/auth/me", Some(&token), Some(json!({"nickname": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Invalid key nickname. The valid keys are name, email, password."
        );
    }
}
