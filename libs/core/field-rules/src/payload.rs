//! Typed access to fields of a raw JSON request payload.
//!
//! Request bodies arrive as arbitrary JSON so that shape problems (not an
//! object, missing key, wrong type) surface as domain failures with readable
//! messages instead of generic deserialization errors.

use serde_json::{Map, Value};

use crate::error::{FailureKind, ValidationError};

/// Borrow the payload as a JSON object.
///
/// `subject` names the record in messages, e.g. "admin" or "user".
pub fn payload_object<'a>(
    payload: &'a Value,
    subject: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    match payload {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) | Value::Null => Err(ValidationError::empty(format!(
            "The {subject} data cannot be empty."
        ))),
        _ => Err(ValidationError::wrong_type(format!(
            "The {subject} data must be a JSON object."
        ))),
    }
}

/// Fetch a mandatory, non-empty string field.
pub fn required_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    subject: &str,
) -> Result<&'a str, ValidationError> {
    let value = map.get(key).ok_or_else(|| {
        ValidationError::empty(format!("The {key} is missing from the {subject} data"))
    })?;
    string_value(value, key)
}

/// Fetch an optional string field; when present it must be a non-empty string.
pub fn optional_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, ValidationError> {
    map.get(key).map(|value| string_value(value, key)).transpose()
}

/// Reject the first key, in request order, that is not in `allowed`.
pub fn reject_unknown_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ValidationError::new(
            FailureKind::InvalidKey,
            format!(
                "Invalid key {key}. The valid keys are {}.",
                allowed.join(", ")
            ),
        )),
        None => Ok(()),
    }
}

fn string_value<'a>(value: &'a Value, key: &str) -> Result<&'a str, ValidationError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s.as_str()),
        Value::String(_) | Value::Null => {
            Err(ValidationError::empty(format!("The {key} data is missing")))
        }
        _ => Err(ValidationError::wrong_type(format!(
            "The {key} has to be a string."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_object_shapes() {
        let value = json!({"email": "a@example.com"});
        assert!(payload_object(&value, "user").is_ok());

        let err = payload_object(&json!({}), "user").unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyInput);
        assert_eq!(err.message(), "The user data cannot be empty.");

        assert_eq!(
            payload_object(&Value::Null, "admin").unwrap_err().kind(),
            FailureKind::EmptyInput
        );

        for value in [json!([1, 2]), json!("text"), json!(5), json!(true)] {
            assert_eq!(
                payload_object(&value, "admin").unwrap_err().kind(),
                FailureKind::WrongType
            );
        }
    }

    #[test]
    fn test_required_str() {
        let value = json!({"email": "a@example.com", "blank": "", "nothing": null, "number": 3});
        let map = value.as_object().unwrap();

        assert_eq!(required_str(map, "email", "user").unwrap(), "a@example.com");

        let missing = required_str(map, "name", "admin").unwrap_err();
        assert_eq!(missing.kind(), FailureKind::EmptyInput);
        assert_eq!(missing.message(), "The name is missing from the admin data");

        assert_eq!(
            required_str(map, "blank", "user").unwrap_err().kind(),
            FailureKind::EmptyInput
        );
        assert_eq!(
            required_str(map, "nothing", "user").unwrap_err().kind(),
            FailureKind::EmptyInput
        );
        assert_eq!(
            required_str(map, "number", "user").unwrap_err().kind(),
            FailureKind::WrongType
        );
    }

    #[test]
    fn test_optional_str() {
        let value = json!({"name": "abcdefgh", "email": 12});
        let map = value.as_object().unwrap();

        assert_eq!(optional_str(map, "name").unwrap(), Some("abcdefgh"));
        assert_eq!(optional_str(map, "password").unwrap(), None);
        assert_eq!(
            optional_str(map, "email").unwrap_err().kind(),
            FailureKind::WrongType
        );
    }

    #[test]
    fn test_reject_unknown_keys() {
        let allowed = ["name", "email", "password"];

        let ok = json!({"name": "x", "email": "y"});
        assert!(reject_unknown_keys(ok.as_object().unwrap(), &allowed).is_ok());

        let bad = json!({"nickname": "x"});
        let err = reject_unknown_keys(bad.as_object().unwrap(), &allowed).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidKey);
        assert_eq!(
            err.message(),
            "Invalid key nickname. The valid keys are name, email, password."
        );
    }

    #[test]
    fn test_reject_unknown_keys_reports_first_in_request_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let err = reject_unknown_keys(value.as_object().unwrap(), &["name"]).unwrap_err();
        assert_eq!(err.message(), "Invalid key zeta. The valid keys are name.");
    }
}
