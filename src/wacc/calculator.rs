//! WACC calculator
//!
//! WACC = E/V * re + D/V * rd * (1 - tax), with V = E + D.
//! Capital values arrive in crore and are converted to base currency units
//! before the weights are taken.

use super::{CapitalInput, CostOfEquitySource, WaccResult};
use crate::error::WaccError;

/// One crore in base currency units
pub const CRORE: f64 = 10_000_000.0;

/// Decimal places kept on wacc, re and the weights
pub const RESULT_DECIMALS: u32 = 6;

const INVALID_CAPITAL: &str = "equityValue and debtValue must be numbers >= 0";
const ZERO_CAPITAL: &str = "Sum of equityValue and debtValue must be > 0";
const MISSING_COST_OF_DEBT: &str = "rd (cost of debt) must be provided as a decimal.";
const MISSING_TAX_RATE: &str = "taxRate must be provided as a decimal (e.g. 0.25).";

/// Stateless WACC calculator
///
/// Fields are validated in the order they are consumed: capital, cost of
/// equity, cost of debt, tax rate. The first failure is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaccCalculator;

impl WaccCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, input: &CapitalInput) -> Result<WaccResult, WaccError> {
        let (equity, debt) = match (
            scale_capital(input.equity_value),
            scale_capital(input.debt_value),
        ) {
            (Some(e), Some(d)) => (e, d),
            _ => return Err(WaccError::invalid(INVALID_CAPITAL)),
        };

        let total = equity + debt;
        if total == 0.0 {
            return Err(WaccError::invalid(ZERO_CAPITAL));
        }

        let source = CostOfEquitySource::resolve(input)?;
        let re = source.rate();
        let notes = vec![source.note().to_string()];

        let rd = valid_number(input.cost_of_debt)
            .ok_or_else(|| WaccError::invalid(MISSING_COST_OF_DEBT))?;
        let tax_rate = valid_number(input.tax_rate)
            .ok_or_else(|| WaccError::invalid(MISSING_TAX_RATE))?;

        let weight_equity = equity / total;
        let weight_debt = debt / total;
        let wacc = weight_equity * re + weight_debt * rd * (1.0 - tax_rate);

        Ok(WaccResult {
            wacc: round_to_places(wacc, RESULT_DECIMALS),
            cost_of_equity: round_to_places(re, RESULT_DECIMALS),
            weight_equity: round_to_places(weight_equity, RESULT_DECIMALS),
            weight_debt: round_to_places(weight_debt, RESULT_DECIMALS),
            cost_of_debt: rd,
            tax_rate,
            notes,
        })
    }
}

/// Compute WACC with the default calculator
pub fn compute_wacc(input: &CapitalInput) -> Result<WaccResult, WaccError> {
    WaccCalculator::new().compute(input)
}

/// A present, finite number
pub(crate) fn valid_number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Crore to base units; `None` unless the scaled value is finite and >= 0
fn scale_capital(value: Option<f64>) -> Option<f64> {
    value
        .map(|v| v * CRORE)
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Round half away from zero to `places` decimal places.
///
/// Values whose scaled form overflows are returned unchanged.
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
