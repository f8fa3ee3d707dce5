//! HTTP adapter over the WACC calculator
//!
//! Transport-independent request handling lives here so the axum router and
//! the Lambda handler share it; the axum wiring is in `router`, the Lambda
//! routing in `lambda`.

mod config;
mod error;
pub mod lambda;
mod middleware;
mod router;

pub use config::{AdapterConfig, CorsPolicy, SecurityHeaders, DEFAULT_PORT};
pub use error::{ApiError, ErrorBody};
pub use middleware::{apply_middleware, build_cors_layer, MAX_BODY_BYTES, STANDARD_HARDENING_HEADERS};
pub use router::build_router;

use crate::wacc::{compute_wacc, CapitalInput, WaccResult};

/// Mount point of the calculator routes
pub const API_BASE: &str = "/api/wacc";

/// Path of the calculation route
pub const PAYLOAD_PATH: &str = "/api/wacc/payload";

/// Body of the liveness route
pub const GREETING: &str = "Hello from the WACC calculator!";

/// Parse a raw request body and run the calculation
pub fn handle_payload(body: &[u8]) -> Result<WaccResult, ApiError> {
    let input = CapitalInput::from_json_slice(body)?;
    Ok(compute_wacc(&input)?)
}
