//! Lambda Function URL routing
//!
//! Mirrors the axum router: greeting, calculation, CORS preflight and 404.
//! CORS and security headers are written by hand since no tower middleware
//! runs in front of the handler.

use lambda_http::{http::response::Builder, Body, Error, Request, Response};
use serde::Serialize;

use super::{handle_payload, AdapterConfig, ApiError, ErrorBody, API_BASE, GREETING, PAYLOAD_PATH};

const PREFLIGHT_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

fn response_builder(config: &AdapterConfig, origin: Option<&str>, status: u16) -> Builder {
    let mut builder = Response::builder().status(status);

    if let Some(allow) = config.cors.allow_origin_for(origin) {
        builder = builder
            .header("Access-Control-Allow-Origin", allow)
            .header("Vary", "Origin");
    }
    for &(name, value) in config.security_headers.headers() {
        builder = builder.header(name, value);
    }

    builder
}

fn json_response<T: Serialize>(
    config: &AdapterConfig,
    origin: Option<&str>,
    status: u16,
    body: &T,
) -> Result<Response<Body>, Error> {
    let text = serde_json::to_string(body)?;
    Ok(response_builder(config, origin, status)
        .header("Content-Type", "application/json")
        .body(Body::Text(text))?)
}

fn payload_response(
    config: &AdapterConfig,
    origin: Option<&str>,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let outcome = std::panic::catch_unwind(|| handle_payload(body))
        .unwrap_or_else(|_| Err(ApiError::Internal(anyhow::anyhow!("WACC calculation panicked"))));

    match outcome {
        Ok(result) => json_response(config, origin, 200, &result),
        Err(err) => {
            err.log();
            json_response(config, origin, err.status_code(), &err.body())
        }
    }
}

/// Route one Lambda request to its response
pub fn route(config: &AdapterConfig, event: &Request) -> Result<Response<Body>, Error> {
    let origin = event
        .headers()
        .get("origin")
        .and_then(|v| v.to_str().ok());
    let path = event.uri().path().trim_end_matches('/');
    let method = event.method().as_str();
    log::debug!("{} {}", method, event.uri().path());

    // Handle CORS preflight
    if method == "OPTIONS" {
        let requested_headers = event
            .headers()
            .get("access-control-request-headers")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("Content-Type");
        return Ok(response_builder(config, origin, 204)
            .header("Access-Control-Allow-Methods", PREFLIGHT_METHODS)
            .header("Access-Control-Allow-Headers", requested_headers)
            .body(Body::Empty)?);
    }

    match (method, path) {
        ("GET", p) if p == API_BASE => Ok(response_builder(config, origin, 200)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(Body::Text(GREETING.to_string()))?),
        ("POST", p) if p == PAYLOAD_PATH => {
            let body: &[u8] = match event.body() {
                Body::Text(s) => s.as_bytes(),
                Body::Binary(b) => b,
                Body::Empty => b"",
            };
            payload_response(config, origin, body)
        }
        _ => json_response(config, origin, 404, &ErrorBody::new("Not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request(method: &str, uri: &str, body: Body) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri(uri)
            .header("origin", "https://client.example")
            .body(body)
            .unwrap()
    }

    fn body_text(response: &Response<Body>) -> String {
        match response.body() {
            Body::Text(s) => s.clone(),
            Body::Binary(b) => String::from_utf8(b.clone()).unwrap(),
            Body::Empty => String::new(),
        }
    }

    fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_str(&body_text(response)).unwrap()
    }

    #[test]
    fn test_greeting_with_and_without_trailing_slash() {
        let config = AdapterConfig::default();
        for uri in ["/api/wacc/", "/api/wacc"] {
            let response = route(&config, &request("GET", uri, Body::Empty)).unwrap();
            assert_eq!(response.status(), 200, "uri {}", uri);
            assert_eq!(body_text(&response), GREETING);
            assert_eq!(response.headers()["access-control-allow-origin"], "*");
            assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        }
    }

    #[test]
    fn test_payload_success() {
        let body = Body::Text(
            r#"{"equityValue": 100, "debtValue": 50, "re": 0.12, "rd": 0.05, "taxRate": 0.25}"#
                .to_string(),
        );
        let response =
            route(&AdapterConfig::default(), &request("POST", "/api/wacc/payload", body)).unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/json");
        let json = body_json(&response);
        assert_eq!(json["weightE"].as_f64(), Some(0.666667));
        assert!((json["wacc"].as_f64().unwrap() - 0.0925).abs() < 1e-9);
    }

    #[test]
    fn test_payload_binary_body() {
        let body = Body::Binary(
            br#"{"equityValue": 100, "debtValue": 0, "rf": 0.04, "beta": 1.2,
                "marketRiskPremium": 0.06, "rd": 0.05, "taxRate": 0.3}"#
                .to_vec(),
        );
        let response =
            route(&AdapterConfig::default(), &request("POST", "/api/wacc/payload", body)).unwrap();

        assert_eq!(response.status(), 200);
        assert!((body_json(&response)["re"].as_f64().unwrap() - 0.112).abs() < 1e-12);
    }

    #[test]
    fn test_payload_validation_error() {
        let body = Body::Text(r#"{"equityValue": 100, "debtValue": 50, "re": 0.12, "rd": 0.05}"#.to_string());
        let response =
            route(&AdapterConfig::default(), &request("POST", "/api/wacc/payload", body)).unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response)["error"],
            "taxRate must be provided as a decimal (e.g. 0.25)."
        );
    }

    #[test]
    fn test_payload_empty_and_array_bodies() {
        let config = AdapterConfig::default();

        let response = route(&config, &request("POST", "/api/wacc/payload", Body::Empty)).unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response)["error"],
            "equityValue and debtValue must be numbers >= 0"
        );

        let array = Body::Text("[100, 50]".to_string());
        let response = route(&config, &request("POST", "/api/wacc/payload", array)).unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["error"], "Invalid JSON: expected a JSON object");
    }

    #[test]
    fn test_preflight() {
        let event = lambda_http::http::Request::builder()
            .method("OPTIONS")
            .uri("/api/wacc/payload")
            .header("origin", "https://client.example")
            .header("access-control-request-headers", "content-type")
            .body(Body::Empty)
            .unwrap();
        let response = route(&AdapterConfig::default(), &event).unwrap();

        assert_eq!(response.status(), 204);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], PREFLIGHT_METHODS);
        assert_eq!(headers["access-control-allow-headers"], "content-type");
    }

    #[test]
    fn test_allow_list_omits_unknown_origin() {
        let config = AdapterConfig {
            cors: crate::api::CorsPolicy::AllowList(vec!["https://allowed.example".into()]),
            ..AdapterConfig::default()
        };
        let response = route(&config, &request("GET", "/api/wacc", Body::Empty)).unwrap();
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[test]
    fn test_unknown_route_and_method() {
        let config = AdapterConfig::default();

        let response = route(&config, &request("GET", "/api/other", Body::Empty)).unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(body_json(&response)["error"], "Not found");

        let response = route(&config, &request("GET", "/api/wacc/payload", Body::Empty)).unwrap();
        assert_eq!(response.status(), 404);
    }
}
