//! `?id=` query parameter extractor.

use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

pub const INVALID_ID_MESSAGE: &str = "The user id was not provided or the id is invalid.";

/// A positive integer taken from the `id` query parameter.
///
/// Missing, non-numeric and non-positive values are rejected with a
/// plain-text 400 before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryId(pub i32);

impl<S> FromRequestParts<S> for QueryId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let rejection = || (StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE).into_response();

        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| rejection())?;

        params
            .get("id")
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .map(QueryId)
            .ok_or_else(rejection)
    }
}
