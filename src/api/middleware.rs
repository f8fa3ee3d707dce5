//! Middleware applied uniformly to every route: CORS, security headers,
//! body size limit and panic recovery

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, Any as AnyOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use super::{AdapterConfig, CorsPolicy, ErrorBody, SecurityHeaders};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Hardening headers set on every response unless the handler set them
pub const STANDARD_HARDENING_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'self';base-uri 'self';font-src 'self' https: data:;form-action 'self';\
         frame-ancestors 'self';img-src 'self' data:;object-src 'none';script-src 'self';\
         script-src-attr 'none';style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

const CORS_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

impl SecurityHeaders {
    pub fn headers(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            SecurityHeaders::StandardHardening => STANDARD_HARDENING_HEADERS,
            SecurityHeaders::Disabled => &[],
        }
    }
}

/// Build the CORS layer for a policy. Request headers are mirrored on preflight.
pub fn build_cors_layer(policy: &CorsPolicy) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(CORS_METHODS.to_vec())
        .allow_headers(AllowHeaders::mirror_request());

    match policy {
        CorsPolicy::Open => layer.allow_origin(AnyOrigin),
        CorsPolicy::AllowList(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        log::warn!("Ignoring unusable CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
    }
}

/// Wrap a router with the adapter middleware described by `config`
pub fn apply_middleware(router: Router, config: &AdapterConfig) -> Router {
    let mut router = router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response));

    for &(name, value) in config.security_headers.headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    router.layer(build_cors_layer(&config.cors))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    log::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("Server error")),
    )
        .into_response()
}
