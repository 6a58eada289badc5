//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route matching and dispatching to the arithmetic operations.

use crate::calc::{Operation, QueryParams};
use crate::config::{AppState, HealthConfig};
use crate::error::ApiResult;
use crate::handler::fallback::with_fallback;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Uri};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
#[allow(clippy::unused_async)]
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(route(req.method(), req.uri(), &state.config.routes.health))
}

/// Route a request by method and URI, never failing
pub fn route(method: &Method, uri: &Uri, health: &HealthConfig) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;
    with_fallback(method, uri.path(), is_head, || {
        dispatch(method, uri, health, is_head)
    })
}

fn dispatch(
    method: &Method,
    uri: &Uri,
    health: &HealthConfig,
    is_head: bool,
) -> ApiResult<Response<Full<Bytes>>> {
    let path = uri.path();
    let operation = Operation::from_path(path);

    // 1. Unknown path
    if operation.is_none() && !health.is_probe(path) {
        return http::build_404_response(is_head);
    }

    // 2. Only GET and HEAD are served
    if !matches!(*method, Method::GET | Method::HEAD) {
        return http::build_405_response();
    }

    // 3. Dispatch
    match operation {
        Some(op) => run_operation(op, uri.query(), is_head),
        None => http::build_health_response("ok", is_head),
    }
}

/// Evaluate one operation and log its success
fn run_operation(
    op: Operation,
    query: Option<&str>,
    is_head: bool,
) -> ApiResult<Response<Full<Bytes>>> {
    let params = QueryParams::parse(query);
    let result = op.evaluate(&params)?;
    let resp = http::build_result_response(result, is_head)?;
    logger::info(op.completed_message());
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        request(Method::GET, uri).await
    }

    async fn request(method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let uri: Uri = uri.parse().unwrap();
        let resp = route(&method, &uri, &HealthConfig::default());
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn logged(method: Method, uri: &str) -> (StatusCode, Vec<(logger::Level, String)>) {
        let uri: Uri = uri.parse().unwrap();
        let (resp, records) = logger::capture(|| route(&method, &uri, &HealthConfig::default()));
        (resp.status(), records)
    }

    fn error_message(body: &serde_json::Value) -> String {
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_add_returns_sum() {
        for (a, b) in [(1.0, 2.0), (-3.5, 0.25), (1e10, -1e10), (0.1, 0.2)] {
            let (status, body) = get(&format!("/add?num1={a}&num2={b}")).await;
            assert_eq!(status, StatusCode::OK);
            let result = body["result"].as_f64().unwrap();
            assert!((result - (a + b)).abs() <= f64::EPSILON * (a + b).abs().max(1.0));
        }
    }

    #[tokio::test]
    async fn test_subtract_and_multiply() {
        let (_, body) = get("/subtract?num1=10&num2=4").await;
        assert_eq!(body["result"], 6.0);
        let (_, body) = get("/multiply?num1=2.5&num2=4").await;
        assert_eq!(body["result"], 10.0);
    }

    #[tokio::test]
    async fn test_divide_by_zero_is_400() {
        for num1 in ["0", "1", "-99.5"] {
            let (status, body) = get(&format!("/divide?num1={num1}&num2=0")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error_message(&body), "Division by zero is not allowed.");
        }
    }

    #[tokio::test]
    async fn test_sqrt() {
        let (status, body) = get("/sqrt?num1=4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 2.0);

        let (status, body) = get("/sqrt?num1=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).starts_with("Invalid input"));
    }

    #[tokio::test]
    async fn test_modulo() {
        let (status, body) = get("/modulo?dividend=10&divisor=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 1.0);

        let (status, _) = get("/modulo?dividend=10&divisor=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_exponentiate() {
        let (status, body) = get("/exponentiate?base=2&exponent=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 1024.0);
    }

    #[tokio::test]
    async fn test_non_numeric_input_is_400() {
        let cases = [
            "/add?num1=abc&num2=1",
            "/subtract?num1=1&num2=abc",
            "/multiply?num1=abc",
            "/divide?num2=2",
            "/exponentiate?base=abc&exponent=2",
            "/sqrt?num1=abc",
            "/modulo?dividend=abc&divisor=3",
            "/add",
        ];
        for uri in cases {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(
                error_message(&body).to_lowercase().contains("invalid input"),
                "{uri}: {body}"
            );
        }
    }

    #[tokio::test]
    async fn test_repeated_query_is_identical() {
        let first = get("/exponentiate?base=1.7&exponent=3.3").await;
        let second = get("/exponentiate?base=1.7&exponent=3.3").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_overflow_serializes_as_null() {
        let (status, body) = get("/multiply?num1=1e308&num2=10").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, body) = get("/sum?num1=1&num2=2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_message(&body), "Not Found");
    }

    #[tokio::test]
    async fn test_post_is_405() {
        let (status, _) = request(Method::POST, "/add?num1=1&num2=2").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (status, body) = request(Method::HEAD, "/add?num1=1&num2=2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_health_probes() {
        let (status, body) = get("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let (status, _) = get("/readyz").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_success_logs_one_info_line() {
        let (status, records) = logged(Method::GET, "/multiply?num1=3&num2=4");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            records,
            vec![(logger::Level::Info, "Multiplication operation completed".to_string())]
        );
    }

    #[test]
    fn test_validation_failure_logs_one_error_line() {
        let (status, records) = logged(Method::GET, "/divide?num1=1&num2=0");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            records,
            vec![(logger::Level::Error, "Division by zero is not allowed.".to_string())]
        );

        let (_, records) = logged(Method::GET, "/sqrt?num1=abc");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, logger::Level::Error);
    }

    #[test]
    fn test_non_operation_responses_are_not_logged() {
        for (method, uri) in [
            (Method::GET, "/sum?num1=1&num2=2"),
            (Method::POST, "/add?num1=1&num2=2"),
            (Method::DELETE, "/nope"),
            (Method::GET, "/healthz"),
        ] {
            let (_, records) = logged(method, uri);
            assert!(records.is_empty(), "{uri}: {records:?}");
        }
    }
}
