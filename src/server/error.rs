//! HTTP error mapping
//!
//! Maps application errors to status codes with a JSON body:
//! - Bad search patterns → 400
//! - ACL service failures → 502
//! - Render failures → 500

use crate::error::{AivenError, AppError, ConfigError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{error, warn};

/// Error returned by route handlers
#[derive(Debug)]
pub struct ApiError(AppError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Config(_) => StatusCode::BAD_REQUEST,
            AppError::Aiven(_) | AppError::Auth(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body describing the error
    pub fn body(&self) -> Value {
        let error_type = match &self.0 {
            AppError::Config(ConfigError::InvalidPattern { .. }) => "InvalidPattern",
            AppError::Config(_) => "InvalidRequest",
            AppError::Aiven(AivenError::RateLimited { .. }) => "RateLimited",
            AppError::Aiven(_) | AppError::Auth(_) => "UpstreamError",
            AppError::Render(_) => "RenderFailed",
        };

        let mut body = json!({
            "error": self.0.to_string(),
            "error_type": error_type,
        });
        if let AppError::Config(ConfigError::InvalidPattern { pattern, .. }) = &self.0 {
            body["pattern"] = Value::String(pattern.clone());
        }
        body
    }
}

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "Rejected request");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_invalid_pattern_is_bad_request() {
        let error = ApiError::from(ConfigError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        });
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);

        let body = error.body();
        assert_eq!(body["error_type"], "InvalidPattern");
        assert_eq!(body["pattern"], "(");
    }

    #[test]
    fn test_malformed_query_is_bad_request() {
        let error = ApiError::from(ConfigError::InvalidRequest {
            message: "duplicate field `exclude-resource-pattern`".to_string(),
        });
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.body()["error_type"], "InvalidRequest");
        assert!(error.body().get("pattern").is_none());
    }

    #[test]
    fn test_upstream_is_bad_gateway() {
        let error = ApiError::from(AivenError::Unauthorized);
        assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.body()["error_type"], "UpstreamError");
    }

    #[test]
    fn test_render_failure_is_internal() {
        let error = ApiError::from(RenderError::Failed {
            status: 1,
            stderr: "syntax error".to_string(),
        });
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.body()["error_type"], "RenderFailed");
    }
}
