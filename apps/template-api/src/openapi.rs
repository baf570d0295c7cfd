use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// The user routes sit at the root, so they are merged rather than nested
struct UserRoutes;

impl Modify for UserRoutes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_users::ApiDoc::openapi());
    }
}

/// Registers the bearer scheme the protected routes refer to
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Template API",
        version = "0.1.0",
        description = "Admin accounts with JWT login, and the users they manage"
    ),
    modifiers(&UserRoutes, &BearerAuth),
    nest(
        (path = "/auth", api = domain_admins::ApiDoc)
    )
)]
pub struct ApiDoc;
