//! Error handling module for the portal backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const RATE_LIMIT: &str = "RATE_LIMIT";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Portal error type.
///
/// Backend-origin failures keep the remote code and status so they pass
/// through to callers unchanged.
#[derive(Debug, Clone)]
pub enum PortalError {
    /// The Airtable credential is absent; remote operations fail closed
    Config(String),
    /// Too many consecutive failed logins
    RateLimited(String),
    /// No valid session presented to a gated route
    Unauthorized(String),
    /// The backend rejected the supplied credentials
    InvalidCredentials(String),
    /// Resource not found
    NotFound(String),
    /// Malformed request
    BadRequest(String),
    /// Failure originating in the remote tabular-data service
    Backend {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },
    /// Local client-state store failure
    Storage(String),
}

impl PortalError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PortalError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            PortalError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PortalError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PortalError::Backend { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            PortalError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &str {
        match self {
            PortalError::Config(_) => codes::CONFIG_ERROR,
            PortalError::RateLimited(_) => codes::RATE_LIMIT,
            PortalError::Unauthorized(_) => codes::UNAUTHORIZED,
            PortalError::InvalidCredentials(_) => codes::INVALID_CREDENTIALS,
            PortalError::NotFound(_) => codes::NOT_FOUND,
            PortalError::BadRequest(_) => codes::BAD_REQUEST,
            PortalError::Backend { code, .. } => code.as_deref().unwrap_or(codes::BACKEND_ERROR),
            PortalError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            PortalError::Config(msg) => msg.clone(),
            PortalError::RateLimited(msg) => msg.clone(),
            PortalError::Unauthorized(msg) => msg.clone(),
            PortalError::InvalidCredentials(msg) => msg.clone(),
            PortalError::NotFound(msg) => msg.clone(),
            PortalError::BadRequest(msg) => msg.clone(),
            PortalError::Backend { message, .. } => message.clone(),
            PortalError::Storage(msg) => msg.clone(),
        }
    }

    /// The fail-closed error raised when the Airtable credential is missing.
    pub fn unconfigured() -> Self {
        PortalError::Config(
            "Airtable is not configured. Set AIRTABLE_API_KEY and redeploy.".to_string(),
        )
    }
}

impl std::fmt::Display for PortalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for PortalError {}

impl From<sqlx::Error> for PortalError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Client-state store error: {:?}", err);
        PortalError::Storage(format!("Client-state store error: {}", err))
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        PortalError::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Backend request error: {:?}", err);
        PortalError::Backend {
            message: format!("Backend request failed: {}", err),
            code: None,
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &PortalError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                status: Some(error.status_code().as_u16()),
            },
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
