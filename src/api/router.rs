//! axum routes for the calculator

use axum::{
    body::Bytes,
    routing::{get, post},
    Json, Router,
};

use super::{apply_middleware, handle_payload, AdapterConfig, ApiError, API_BASE, GREETING, PAYLOAD_PATH};
use crate::wacc::WaccResult;

/// Routes plus the configured middleware
pub fn build_router(config: &AdapterConfig) -> Router {
    let routes = Router::new()
        .route(API_BASE, get(greeting))
        .route(&format!("{}/", API_BASE), get(greeting))
        .route(PAYLOAD_PATH, post(payload));

    apply_middleware(routes, config)
}

async fn greeting() -> &'static str {
    GREETING
}

async fn payload(body: Bytes) -> Result<Json<WaccResult>, ApiError> {
    let result = handle_payload(&body)?;
    log::debug!(
        "Computed WACC {} (re {}, weightE {}, weightD {})",
        result.wacc,
        result.cost_of_equity,
        result.weight_equity,
        result.weight_debt
    );
    Ok(Json(result))
}
