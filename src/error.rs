//! Error types
//!
//! `CalcError` is raised by operand validation and is always safe to show
//! to the caller. `ApiError` wraps it together with internal failures whose
//! detail stays in the logs.

use hyper::StatusCode;
use thiserror::Error;

/// Generic body message for internal failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Validation failure for a single arithmetic request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Operand missing or not a number, or outside the operation's domain
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Divisor equal to zero
    #[error("Division by zero is not allowed.")]
    DivisionByZero,
}

/// Error surfaced by the request dispatcher
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] CalcError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error kind
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller in the `error` field
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
