//! WACC Calculator - Weighted Average Cost of Capital from equity, debt and rate inputs
//!
//! This library provides:
//! - Input validation and the WACC/CAPM arithmetic (`wacc`)
//! - An HTTP adapter serving the calculator as a JSON API (`api`)
//! - A CSV batch runner for many inputs at once (`batch`)

pub mod error;
pub mod wacc;
pub mod api;
pub mod batch;

// Re-export commonly used types
pub use error::WaccError;
pub use wacc::{CapitalInput, CostOfEquitySource, WaccCalculator, WaccResult, compute_wacc};
