//! Calculation output

use serde::Serialize;

/// Result of a successful WACC calculation
///
/// `wacc`, `cost_of_equity` and both weights are rounded to six decimal
/// places; `cost_of_debt` and `tax_rate` are echoed exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaccResult {
    pub wacc: f64,
    #[serde(rename = "re")]
    pub cost_of_equity: f64,
    #[serde(rename = "weightE")]
    pub weight_equity: f64,
    #[serde(rename = "weightD")]
    pub weight_debt: f64,
    #[serde(rename = "rd")]
    pub cost_of_debt: f64,
    #[serde(rename = "taxRate")]
    pub tax_rate: f64,
    /// Which computation path was taken, in order
    pub notes: Vec<String>,
}
