//! Error handling for the Folio HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// A single field-level reason a payload failed schema validation.
///
/// `loc` is the path to the offending field, e.g. `["body", "title"]`
/// or `["path", "book_id"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub loc: Vec<String>,
    pub msg: String,
}

impl Violation {
    pub fn new<L, S>(loc: L, msg: impl Into<String>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: msg.into(),
        }
    }
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed")]
    Validation { violations: Vec<Violation> },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error from a list of violations
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self::Validation { violations }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation { violations } => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!(violations))
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, json!(message)),
            AppError::Internal(error) => {
                let error_id = Uuid::new_v4();
                tracing::error!(
                    error_id = %error_id,
                    error = %error,
                    "internal server error"
                );
                // Internal details stay out of the response body.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal Server Error"),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[test]
    fn violation_serializes_loc_and_msg() {
        let violation = Violation::new(["body", "title"], "field required");
        let value = serde_json::to_value(&violation).unwrap();
        assert_eq!(
            value,
            json!({ "loc": ["body", "title"], "msg": "field required" })
        );
    }

    #[test]
    fn validation_error_carries_violations() {
        let violations = vec![Violation::new(["body", "author"], "field required")];
        let error = AppError::validation(violations.clone());

        match error {
            AppError::Validation { violations: v } => assert_eq!(v, violations),
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn validation_maps_to_422() {
        let error = AppError::validation(vec![Violation::new(["body"], "field required")]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let error = AppError::Internal(anyhow::anyhow!("store invariant violated"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn not_found_body_has_detail_message() {
        let response = AppError::not_found("Book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "detail": "Book not found" }));
    }

    #[tokio::test]
    async fn validation_body_lists_violations() {
        let response = AppError::validation(vec![
            Violation::new(["body", "title"], "field required"),
            Violation::new(["body", "page_count"], "value is not a valid integer"),
        ])
        .into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"].as_array().unwrap().len(), 2);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "title"]));
    }
}
