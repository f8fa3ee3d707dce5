//! Cost of equity resolution: supplied directly or derived from CAPM

use super::calculator::valid_number;
use super::CapitalInput;
use crate::error::WaccError;

pub const MISSING_COST_OF_EQUITY: &str =
    "Please provide either cost of equity or all of riskFreeRate, beta, marketRiskPremium.";

/// Where the cost of equity (re) comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostOfEquitySource {
    /// re supplied by the caller
    Direct { rate: f64 },
    /// re = rf + beta * (Rm - Rf)
    Capm {
        risk_free_rate: f64,
        beta: f64,
        market_risk_premium: f64,
    },
}

impl CostOfEquitySource {
    /// Pick the path for an input.
    ///
    /// A valid direct rate always wins; CAPM fields are not inspected at all
    /// in that case.
    pub fn resolve(input: &CapitalInput) -> Result<Self, WaccError> {
        if let Some(rate) = valid_number(input.cost_of_equity) {
            return Ok(CostOfEquitySource::Direct { rate });
        }

        match (
            valid_number(input.risk_free_rate),
            valid_number(input.beta),
            valid_number(input.market_risk_premium),
        ) {
            (Some(risk_free_rate), Some(beta), Some(market_risk_premium)) => {
                Ok(CostOfEquitySource::Capm {
                    risk_free_rate,
                    beta,
                    market_risk_premium,
                })
            }
            _ => Err(WaccError::invalid(MISSING_COST_OF_EQUITY)),
        }
    }

    /// Unrounded cost of equity
    pub fn rate(&self) -> f64 {
        match *self {
            CostOfEquitySource::Direct { rate } => rate,
            CostOfEquitySource::Capm {
                risk_free_rate,
                beta,
                market_risk_premium,
            } => risk_free_rate + beta * market_risk_premium,
        }
    }

    /// Note describing the path, reported back to the caller
    pub fn note(&self) -> &'static str {
        match self {
            CostOfEquitySource::Direct { .. } => "Used provided cost of equity (re).",
            CostOfEquitySource::Capm { .. } => "Computed cost of equity (re) from CAPM.",
        }
    }
}
