//! Shared API types
//!
//! Error responses use the body `{"error": <kind>, "code": <CODE>, "detail": <text>}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::BackendError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    BadGateway { code: String, message: String },
}

/// Error body as documented in the OpenAPI document
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_gateway(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadGateway {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Transport(_) => Self::bad_gateway("UPSTREAM_ERROR", e.to_string()),
            BackendError::InvalidResponse(message) => {
                Self::bad_gateway("UPSTREAM_INVALID_RESPONSE", message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, code, detail) = match self {
            Self::BadRequest { code, message } => ("bad_request", code, message),
            Self::BadGateway { code, message } => ("bad_gateway", code, message),
        };
        (
            status,
            Json(ErrorBody {
                error: error_type.to_string(),
                code,
                detail,
            }),
        )
            .into_response()
    }
}
