//! WACC calculation core: input model, cost-of-equity resolution and the calculator

mod input;
mod cost_of_equity;
mod calculator;
mod result;

pub use input::CapitalInput;
pub use cost_of_equity::CostOfEquitySource;
pub use calculator::{WaccCalculator, compute_wacc, round_to_places, CRORE, RESULT_DECIMALS};
pub use result::WaccResult;
