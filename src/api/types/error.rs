//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::sts::StsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    PermissionError,
    NotFoundError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::PermissionError => write!(f, "permission_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiErrorType::PermissionError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<StsError> for ApiError {
    fn from(err: StsError) -> Self {
        let code = err.code();

        match &err {
            StsError::MissingApiKey | StsError::InvalidToken | StsError::TokenExpired => {
                Self::unauthorized(err.to_string()).with_code(code)
            }
            StsError::ScopeMismatch | StsError::AudienceMismatch | StsError::ApiKeyMismatch => {
                Self::forbidden(err.to_string()).with_code(code)
            }
            StsError::Configuration { .. } | StsError::Signing { .. } => {
                error!(error = %err, "STS token service failure");
                Self::internal("Token service failure").with_code(code)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("X-Tenant-ID header missing");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(err.response.error.message, "X-Tenant-ID header missing");
        assert!(err.response.error.code.is_none());
    }

    #[test]
    fn test_authentication_failures_map_to_401() {
        for sts_err in [
            StsError::MissingApiKey,
            StsError::InvalidToken,
            StsError::TokenExpired,
        ] {
            let code = sts_err.code();
            let api_err: ApiError = sts_err.into();

            assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(api_err.response.error.error_type, ApiErrorType::AuthenticationError);
            assert_eq!(api_err.response.error.code.as_deref(), Some(code));
        }
    }

    #[test]
    fn test_binding_failures_map_to_403() {
        let cases = [
            (StsError::ScopeMismatch, "Invalid scope"),
            (StsError::AudienceMismatch, "Invalid audience"),
            (StsError::ApiKeyMismatch, "API key mismatch"),
        ];

        for (sts_err, message) in cases {
            let api_err: ApiError = sts_err.into();

            assert_eq!(api_err.status, StatusCode::FORBIDDEN);
            assert_eq!(api_err.response.error.message, message);
        }
    }

    #[test]
    fn test_server_failures_hide_details() {
        let api_err: ApiError = StsError::signing("key material rejected").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.response.error.message, "Token service failure");
        assert_eq!(api_err.response.error.code.as_deref(), Some("signing_error"));
    }

    #[test]
    fn test_error_serialization() {
        let err: ApiError = StsError::TokenExpired.into();
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(json.contains("authentication_error"));
        assert!(json.contains("Token expired"));
        assert!(json.contains("token_expired"));
    }

    #[test]
    fn test_all_error_types() {
        assert_eq!(ApiError::bad_request("").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("").status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("").status, StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("").status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("").status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
