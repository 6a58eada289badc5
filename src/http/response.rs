//! HTTP response building module
//!
//! Every body is JSON: `{"result": n}`, `{"error": "..."}` or `{"status": "ok"}`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::{ApiError, ApiResult, INTERNAL_ERROR_MESSAGE};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Integers with magnitude below this are exact in an `f64`
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

#[derive(Serialize)]
struct ResultBody {
    /// Non-finite values serialize as `null`
    #[serde(serialize_with = "serialize_number")]
    result: f64,
}

/// Write integral values without a fraction (`2`, not `2.0`)
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn serialize_number<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct HealthBody<'a> {
    status: &'a str,
}

/// Build JSON response; `is_head` keeps headers but drops the body
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> ApiResult<Response<Full<Bytes>>> {
    let json = serde_json::to_vec(body)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize response: {e}")))?;
    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .map_err(|e| ApiError::Internal(format!("Failed to build {status} response: {e}")))
}

/// Build 200 response carrying an operation result
pub fn build_result_response(result: f64, is_head: bool) -> ApiResult<Response<Full<Bytes>>> {
    build_json_response(StatusCode::OK, &ResultBody { result }, is_head)
}

/// Build error response with `{"error": message}`
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    is_head: bool,
) -> ApiResult<Response<Full<Bytes>>> {
    build_json_response(status, &ErrorBody { error: message }, is_head)
}

/// Build health check response
pub fn build_health_response(status: &str, is_head: bool) -> ApiResult<Response<Full<Bytes>>> {
    build_json_response(StatusCode::OK, &HealthBody { status }, is_head)
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> ApiResult<Response<Full<Bytes>>> {
    build_error_response(StatusCode::NOT_FOUND, "Not Found", is_head)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> ApiResult<Response<Full<Bytes>>> {
    let mut resp =
        build_error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", false)?;
    resp.headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
    Ok(resp)
}

/// Build 500 Internal Server Error response
///
/// Built by hand so it cannot fail on serialization.
pub fn build_500_response(is_head: bool) -> Response<Full<Bytes>> {
    let json = format!(r#"{{"error":"{INTERNAL_ERROR_MESSAGE}"}}"#);
    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            crate::logger::error(&format!("Failed to build 500 response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}
