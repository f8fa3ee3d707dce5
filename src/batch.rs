//! Batch WACC runs over CSV input
//!
//! Each input row is one independent calculation. Rows are computed in
//! parallel and written back in input order, one output row per input row.

use crate::wacc::{CapitalInput, WaccCalculator, WaccResult};
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::io::{Read, Write};
use std::path::Path;
use rayon::prelude::*;

/// Raw CSV row. Empty or unparseable cells read as absent.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "equityValue", default, deserialize_with = "csv::invalid_option")]
    equity_value: Option<f64>,
    #[serde(rename = "debtValue", default, deserialize_with = "csv::invalid_option")]
    debt_value: Option<f64>,
    #[serde(rename = "re", default, deserialize_with = "csv::invalid_option")]
    cost_of_equity: Option<f64>,
    #[serde(rename = "rf", default, deserialize_with = "csv::invalid_option")]
    risk_free_rate: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    beta: Option<f64>,
    #[serde(rename = "marketRiskPremium", default, deserialize_with = "csv::invalid_option")]
    market_risk_premium: Option<f64>,
    #[serde(rename = "rd", default, deserialize_with = "csv::invalid_option")]
    cost_of_debt: Option<f64>,
    #[serde(rename = "taxRate", default, deserialize_with = "csv::invalid_option")]
    tax_rate: Option<f64>,
}

impl CsvRow {
    fn into_case(self, row_number: usize) -> BatchCase {
        BatchCase {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| row_number.to_string()),
            input: CapitalInput {
                equity_value: self.equity_value,
                debt_value: self.debt_value,
                cost_of_equity: self.cost_of_equity,
                risk_free_rate: self.risk_free_rate,
                beta: self.beta,
                market_risk_premium: self.market_risk_premium,
                cost_of_debt: self.cost_of_debt,
                tax_rate: self.tax_rate,
            },
        }
    }
}

/// One labelled input
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCase {
    /// Caller's label, or the 1-based row number when the `id` column is empty
    pub id: String,
    pub input: CapitalInput,
}

/// Outcome of one batch case
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub id: String,
    pub result: Result<WaccResult, String>,
}

/// Output CSV row
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    id: &'a str,
    wacc: Option<f64>,
    re: Option<f64>,
    #[serde(rename = "weightE")]
    weight_e: Option<f64>,
    #[serde(rename = "weightD")]
    weight_d: Option<f64>,
    rd: Option<f64>,
    #[serde(rename = "taxRate")]
    tax_rate: Option<f64>,
    notes: String,
    error: &'a str,
}

impl<'a> From<&'a BatchOutcome> for OutputRow<'a> {
    fn from(outcome: &'a BatchOutcome) -> Self {
        match &outcome.result {
            Ok(r) => OutputRow {
                id: &outcome.id,
                wacc: Some(r.wacc),
                re: Some(r.cost_of_equity),
                weight_e: Some(r.weight_equity),
                weight_d: Some(r.weight_debt),
                rd: Some(r.cost_of_debt),
                tax_rate: Some(r.tax_rate),
                notes: r.notes.join("; "),
                error: "",
            },
            Err(message) => OutputRow {
                id: &outcome.id,
                wacc: None,
                re: None,
                weight_e: None,
                weight_d: None,
                rd: None,
                tax_rate: None,
                notes: String::new(),
                error: message,
            },
        }
    }
}

/// Read batch cases from any CSV source with a header row
pub fn read_cases<R: Read>(source: R) -> Result<Vec<BatchCase>, Box<dyn Error>> {
    let mut reader = Reader::from_reader(source);
    let mut cases = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        cases.push(row.into_case(i + 1));
    }

    Ok(cases)
}

/// Read batch cases from a CSV file
pub fn load_cases(path: &Path) -> Result<Vec<BatchCase>, Box<dyn Error>> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
    read_cases(file)
}

/// Compute every case in parallel, preserving input order
pub fn run_batch(cases: &[BatchCase]) -> Vec<BatchOutcome> {
    let calculator = WaccCalculator::new();
    cases
        .par_iter()
        .map(|case| BatchOutcome {
            id: case.id.clone(),
            result: calculator
                .compute(&case.input)
                .map_err(|e| e.message().to_string()),
        })
        .collect()
}

/// Write outcomes as CSV
pub fn write_outcomes<W: Write>(sink: W, outcomes: &[BatchOutcome]) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_writer(sink);
    for outcome in outcomes {
        writer.serialize(OutputRow::from(outcome))?;
    }
    writer.flush()?;
    Ok(())
}
