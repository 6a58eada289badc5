//! Fallback error handling
//!
//! Runs the dispatcher and converts whatever it produced into a response.
//! Validation errors become 400 with their message; internal errors and
//! panics are logged with detail and answered with a generic 500.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{ApiError, ApiResult};
use crate::http;
use crate::logger;

/// Run `dispatch`, answering errors and panics instead of propagating them
pub fn with_fallback<F>(
    method: &Method,
    path: &str,
    is_head: bool,
    dispatch: F,
) -> Response<Full<Bytes>>
where
    F: FnOnce() -> ApiResult<Response<Full<Bytes>>>,
{
    match panic::catch_unwind(AssertUnwindSafe(dispatch)) {
        Ok(Ok(resp)) => resp,
        Ok(Err(err)) => error_response(&err, method, path, is_head),
        Err(payload) => {
            let detail = format!("handler panicked: {}", panic_payload_to_string(&payload));
            logger::log_internal_error(method.as_str(), path, &detail);
            http::build_500_response(is_head)
        }
    }
}

/// Log `err` once and build the matching response
fn error_response(
    err: &ApiError,
    method: &Method,
    path: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match err {
        ApiError::Validation(_) => {
            let message = err.public_message();
            logger::error(&message);
            http::build_error_response(err.status(), &message, is_head).unwrap_or_else(|e| {
                logger::log_internal_error(method.as_str(), path, &e.to_string());
                http::build_500_response(is_head)
            })
        }
        ApiError::Internal(detail) => {
            logger::log_internal_error(method.as_str(), path, detail);
            http::build_500_response(is_head)
        }
    }
}

fn panic_payload_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
