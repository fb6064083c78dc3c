//! Error responses.
//!
//! # Responsibilities
//! - Map data failures to HTTP status codes
//! - Render every failure as `{"detail": "<message>"}`
//!
//! # Design Decisions
//! - Unset or missing data directory → 404
//! - Unreadable or malformed data file → 500, message names the file
//! - Invalid query parameter → 422

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::source::DataError;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// An HTTP status plus the message reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_configured: ApiError = DataError::NotConfigured { var: "X".into() }.into();
        assert_eq!(not_configured.status, StatusCode::NOT_FOUND);

        let missing: ApiError = DataError::NotFound { path: "/nope".into() }.into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let malformed: ApiError = DataError::Probe {
            file: "probe_ethnicity.json".into(),
            source,
        }
        .into();
        assert_eq!(malformed.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(malformed.detail.contains("probe_ethnicity.json"));
    }

    #[tokio::test]
    async fn test_body_is_detail_object() {
        let response = ApiError::unprocessable("bad limit").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "bad limit");
    }
}
