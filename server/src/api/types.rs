//! Shared API types
//!
//! Error responses common to all endpoints. Client mistakes carry a stable
//! code and a message naming the parameter; store failures carry a generic
//! message and are logged with full detail.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::DataError;
use crate::data::filters::FilterError;
use crate::domain::MetadataError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Error category (`bad_request`, `service_unavailable`, ...)
    pub error: String,
    /// Stable machine-readable code
    pub code: String,
    pub message: String,
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    ServiceUnavailable { message: String },
    GatewayTimeout { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::Timeout { backend } => {
                tracing::warn!(backend, "Query timed out");
                Self::GatewayTimeout {
                    message: "Query timed out".to_string(),
                }
            }
            DataError::BackendUnavailable { backend, reason } => {
                tracing::error!(backend, reason = %reason, "Database unavailable");
                Self::service_unavailable("Database unavailable")
            }
            e => {
                tracing::error!(error = %e, backend = e.backend(), "Data error");
                Self::internal("Database operation failed")
            }
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        tracing::debug!(error = %e, "Rejected request parameters");
        Self::bad_request(e.code(), e.to_string())
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self::from_data(e)
    }
}

impl From<MetadataError> for ApiError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::Filter(e) => e.into(),
            MetadataError::Data(e) => Self::from_data(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::GatewayTimeout { message } => (
                StatusCode::GATEWAY_TIMEOUT,
                "gateway_timeout",
                "QUERY_TIMEOUT".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(ErrorBody {
                error: error_type.to_string(),
                code,
                message,
            }),
        )
            .into_response()
    }
}
