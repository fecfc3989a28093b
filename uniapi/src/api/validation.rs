//! Presence rules for request input.
//!
//! A field counts as supplied only when it is present and non-empty: `null`, a missing key,
//! `""` and `0` are all treated as absent. Every required field is checked before a handler
//! touches the store.

use axum::{
    Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::errors::Error;

/// Values that can be "empty" from the point of view of a required field
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for i32 {
    fn is_present(&self) -> bool {
        *self != 0
    }
}

/// Keep the value only if it counts as supplied
pub fn present<T: Presence>(value: Option<T>) -> Option<T> {
    value.filter(Presence::is_present)
}

/// Identifier text with surrounding whitespace removed, if anything is left
pub fn present_id(raw: Option<String>) -> Option<String> {
    present(raw.map(|id| id.trim().to_string()))
}

/// Unwrap an optional JSON body extractor.
///
/// A body that is missing, not JSON, or of the wrong shape yields `T::default()`, whose fields
/// are all `None`, so the caller reports its usual missing-fields error instead of axum's 422.
pub fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!("Treating unreadable request body as empty: {}", rejection.body_text());
            T::default()
        }
    }
}

/// Unwrap an optional query-string extractor.
///
/// A query string that cannot be decoded (a parameter given twice, broken percent-encoding) is
/// answered with `reject()`, the operation's own 400, so the deserializer's message never
/// reaches the caller.
pub fn query_or_reject<T>(
    query: Result<Query<T>, QueryRejection>,
    reject: impl FnOnce() -> Error,
) -> Result<T, Error> {
    match query {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejecting unreadable query string: {}", rejection.body_text());
            Err(reject())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::FromRequestParts, http::Request};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct IdQuery {
        id: Option<String>,
    }

    async fn extract(uri: &str) -> Result<Query<IdQuery>, QueryRejection> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Query::<IdQuery>::from_request_parts(&mut parts, &()).await
    }

    fn reject() -> Error {
        Error::BadRequest {
            message: "Send please id!".to_string(),
        }
    }

    #[test]
    fn test_falsy_values_are_absent() {
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some(0)), None);
        assert_eq!(present::<String>(None), None);
        assert_eq!(present::<i32>(None), None);
    }

    #[test]
    fn test_truthy_values_are_kept() {
        assert_eq!(present(Some("CS".to_string())), Some("CS".to_string()));
        assert_eq!(present(Some(" ".to_string())), Some(" ".to_string()));
        assert_eq!(present(Some(22)), Some(22));
        assert_eq!(present(Some(-1)), Some(-1));
    }

    #[test]
    fn test_present_id_trims() {
        assert_eq!(present_id(Some("  abc \n".to_string())), Some("abc".to_string()));
        assert_eq!(present_id(Some("   ".to_string())), None);
        assert_eq!(present_id(None), None);
    }

    #[tokio::test]
    async fn test_readable_query_passes_through() {
        let query = query_or_reject(extract("/items?id=abc").await, reject).unwrap();
        assert_eq!(query.id.as_deref(), Some("abc"));

        let query = query_or_reject(extract("/items").await, reject).unwrap();
        assert!(query.id.is_none());
    }

    #[tokio::test]
    async fn test_duplicated_parameter_is_rejected_with_own_error() {
        let err = query_or_reject(extract("/items?id=a&id=b").await, reject).unwrap_err();
        assert!(matches!(err, Error::BadRequest { ref message } if message == "Send please id!"));
    }
}
