//! Raw JSON body extractor.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

pub const MALFORMED_BODY_MESSAGE: &str =
    "The user data provided is badly formatted. Check the JSON!";

/// Any syntactically valid JSON document, left untyped.
///
/// Unlike `axum::Json<T>` this does not insist on a `Content-Type` header or
/// a particular shape; handlers validate the shape themselves so they can
/// report field-level failures. Empty or unparsable bodies are rejected.
///
/// # Example
/// ```ignore
/// async fn create(JsonPayload(payload): JsonPayload) -> impl IntoResponse {
///     let input = CreateUser::from_payload(&payload)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes).map(JsonPayload).map_err(|e| {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            (StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE).into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, body::Body, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|JsonPayload(value): JsonPayload| async move { Json(value) }),
        )
    }

    async fn send(body: &'static str) -> (StatusCode, String) {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_accepts_any_json_without_content_type() {
        let (status, body) = send(r#"{"email":"a@example.com"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"email":"a@example.com"}"#);

        let (status, _) = send("[1,2,3]").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_malformed_json_as_plain_text() {
        for body in ["{\"email\": ", "", "not json"] {
            let (status, text) = send(body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(text, MALFORMED_BODY_MESSAGE);
        }
    }
}
