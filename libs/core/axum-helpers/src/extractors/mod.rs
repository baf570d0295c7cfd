//! Custom extractors for Axum handlers.
//!
//! Both answer a plain-text 400 on rejection, matching what API clients of
//! this service have always received for unreadable input.

pub mod json_payload;
pub mod query_id;

pub use json_payload::{JsonPayload, MALFORMED_BODY_MESSAGE};
pub use query_id::{INVALID_ID_MESSAGE, QueryId};
