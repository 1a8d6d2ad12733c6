//! Error types for shopfloor
//!
//! A closed error-code enumeration replaces the reference behavior of
//! catching anything and stringifying the message. Resolvers raise
//! [`ServiceError`]; the dispatcher converts it into the client-facing
//! [`AppError`], collapsing store failures to a generic answer so storage
//! internals never leak.

use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Closed set of error codes crossing the operation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    /// Malformed or missing required fields
    ValidationFailed = 2,
    /// Unknown route or resource
    NotFound = 3,
    /// Order create with any of its five business fields absent
    MissingFields = 7,
    /// Registration conflict: username already taken
    DuplicateUser = 1001,
    /// Login: no credential row for the username (internal only; rewritten
    /// to `InvalidCredentials` at the boundary to avoid username enumeration)
    UserNotFound = 1002,
    /// Login: password hash comparison failed
    InvalidCredentials = 1003,
    /// Underlying persistence failure, reported generically
    StoreFailure = 9002,
    /// Any other resolver failure the dispatcher caught
    OperationFailed = 9001,
}

impl ErrorCode {
    /// Default client-facing message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Not found",
            Self::MissingFields => "All order fields are required",
            Self::DuplicateUser => "Username is already registered",
            Self::UserNotFound => "Invalid username or password",
            Self::InvalidCredentials => "Invalid username or password",
            Self::StoreFailure => "Server error",
            Self::OperationFailed => "Operation failed",
        }
    }

    /// HTTP status for this code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DuplicateUser => StatusCode::CONFLICT,
            Self::UserNotFound | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::StoreFailure | Self::OperationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error for unrecognized numeric error codes
#[derive(Debug, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            7 => Ok(Self::MissingFields),
            1001 => Ok(Self::DuplicateUser),
            1002 => Ok(Self::UserNotFound),
            1003 => Ok(Self::InvalidCredentials),
            9002 => Ok(Self::StoreFailure),
            9001 => Ok(Self::OperationFailed),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

/// Client-facing application error: a code plus a human-readable message
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    /// Create an error with the default message for the code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Create an error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({
            "code": u16::from(self.code),
            "error": self.message,
        });
        (self.code.http_status(), Json(body)).into_response()
    }
}

/// Resolver-layer error — keeps store failures and business-rule errors apart
/// so `?` propagation works without per-call-site `map_err` boilerplate.
///
/// - `Store`: persistence failures (logged, collapsed to `StoreFailure`)
/// - `App`: business-rule errors (pass through to the client unchanged)
/// - `Other`: anything else a resolver can raise (token minting, hashing)
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    App(AppError),
    Other(BoxError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<jsonwebtoken::errors::Error> for ServiceError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        ServiceError::Other(e.into())
    }
}

impl From<argon2::password_hash::Error> for ServiceError {
    fn from(e: argon2::password_hash::Error) -> Self {
        ServiceError::Other(format!("password hashing failed: {e}").into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => {
                tracing::error!(error = %store_err, "store failure during operation");
                AppError::new(ErrorCode::StoreFailure)
            }
            ServiceError::Other(err) => {
                tracing::error!(error = %err, "operation failed");
                AppError::with_message(ErrorCode::OperationFailed, err.to_string())
            }
        }
    }
}

/// Convenience alias for resolver results
pub type ServiceResult<T> = Result<T, ServiceError>;
