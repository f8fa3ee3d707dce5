//! Capital input record as submitted by callers
//!
//! Every field is optional. A value that cannot be read as a number is stored
//! as `None` instead of failing the whole payload, so that fields the
//! calculation never consumes are never reported.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Inputs for one WACC calculation
///
/// Capital values are in crore; rates are decimal fractions (0.12 = 12%).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CapitalInput {
    /// Market value of equity (E), in crore
    #[serde(rename = "equityValue", default, deserialize_with = "coerced_number")]
    pub equity_value: Option<f64>,

    /// Market value of debt (D), in crore
    #[serde(rename = "debtValue", default, deserialize_with = "coerced_number")]
    pub debt_value: Option<f64>,

    /// Cost of equity supplied directly (re)
    #[serde(rename = "re", alias = "costOfEquity", default, deserialize_with = "json_number")]
    pub cost_of_equity: Option<f64>,

    /// CAPM risk-free rate (rf)
    #[serde(rename = "rf", alias = "riskFreeRate", default, deserialize_with = "json_number")]
    pub risk_free_rate: Option<f64>,

    /// CAPM beta
    #[serde(default, deserialize_with = "json_number")]
    pub beta: Option<f64>,

    /// CAPM market risk premium (Rm - Rf)
    #[serde(rename = "marketRiskPremium", default, deserialize_with = "json_number")]
    pub market_risk_premium: Option<f64>,

    /// Pre-tax cost of debt (rd)
    #[serde(rename = "rd", alias = "costOfDebt", default, deserialize_with = "json_number")]
    pub cost_of_debt: Option<f64>,

    /// Corporate tax rate
    #[serde(rename = "taxRate", default, deserialize_with = "json_number")]
    pub tax_rate: Option<f64>,
}

impl CapitalInput {
    /// Start an input from equity and debt values (in crore)
    pub fn new(equity_value: f64, debt_value: f64) -> Self {
        Self {
            equity_value: Some(equity_value),
            debt_value: Some(debt_value),
            ..Default::default()
        }
    }

    pub fn with_cost_of_equity(mut self, re: f64) -> Self {
        self.cost_of_equity = Some(re);
        self
    }

    pub fn with_capm(mut self, risk_free_rate: f64, beta: f64, market_risk_premium: f64) -> Self {
        self.risk_free_rate = Some(risk_free_rate);
        self.beta = Some(beta);
        self.market_risk_premium = Some(market_risk_premium);
        self
    }

    pub fn with_cost_of_debt(mut self, rd: f64) -> Self {
        self.cost_of_debt = Some(rd);
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Parse a JSON request body.
    ///
    /// Only a JSON object is accepted; arrays, scalars and `null` are
    /// rejected rather than matched to fields by position. An empty or
    /// whitespace-only body is read as `{}`. Number literals outside the
    /// f64 range do not fail the document: the field reads as absent.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            _ => Err(serde::de::Error::custom("expected a JSON object")),
        }
    }
}

/// JSON numbers and numeric strings; anything else is absent
fn coerced_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// JSON numbers only; strings, booleans, null and containers are absent
fn json_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let input: CapitalInput = serde_json::from_str(
            r#"{"equityValue": 100, "debtValue": 50, "re": 0.12, "rf": 0.04, "beta": 1.2,
                "marketRiskPremium": 0.06, "rd": 0.05, "taxRate": 0.25}"#,
        )
        .unwrap();

        assert_eq!(input.equity_value, Some(100.0));
        assert_eq!(input.debt_value, Some(50.0));
        assert_eq!(input.cost_of_equity, Some(0.12));
        assert_eq!(input.risk_free_rate, Some(0.04));
        assert_eq!(input.beta, Some(1.2));
        assert_eq!(input.market_risk_premium, Some(0.06));
        assert_eq!(input.cost_of_debt, Some(0.05));
        assert_eq!(input.tax_rate, Some(0.25));
    }

    #[test]
    fn test_descriptive_aliases() {
        let input: CapitalInput = serde_json::from_str(
            r#"{"costOfEquity": 0.1, "riskFreeRate": 0.03, "costOfDebt": 0.07}"#,
        )
        .unwrap();

        assert_eq!(input.cost_of_equity, Some(0.1));
        assert_eq!(input.risk_free_rate, Some(0.03));
        assert_eq!(input.cost_of_debt, Some(0.07));
    }

    #[test]
    fn test_capital_accepts_numeric_strings() {
        let input: CapitalInput =
            serde_json::from_str(r#"{"equityValue": " 250.5 ", "debtValue": "abc"}"#).unwrap();

        assert_eq!(input.equity_value, Some(250.5));
        assert_eq!(input.debt_value, None);
    }

    #[test]
    fn test_rates_reject_non_numbers_without_failing() {
        let input: CapitalInput = serde_json::from_str(
            r#"{"re": "0.12", "rf": null, "beta": true, "marketRiskPremium": [0.06], "rd": {"v": 1}}"#,
        )
        .unwrap();

        assert_eq!(input, CapitalInput::default());
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(CapitalInput::from_json_slice(b"").unwrap(), CapitalInput::default());
        assert_eq!(CapitalInput::from_json_slice(b"  \n").unwrap(), CapitalInput::default());
        assert!(CapitalInput::from_json_slice(b"{not json").is_err());
    }

    #[test]
    fn test_only_objects_are_accepted() {
        let bodies: [&[u8]; 5] = [
            b"[100, 50, 0.12, null, null, null, 0.05, 0.25]",
            b"[]",
            b"42",
            b"null",
            b"\"x\"",
        ];
        for body in bodies {
            let err = CapitalInput::from_json_slice(body).unwrap_err();
            assert!(err.to_string().contains("expected a JSON object"), "{}", err);
        }
    }

    #[test]
    fn test_out_of_range_numbers_read_as_absent() {
        let input = CapitalInput::from_json_slice(
            br#"{"equityValue": 1e400, "debtValue": 50, "re": 0.12, "beta": -1e400, "rd": 0.05}"#,
        )
        .unwrap();

        assert!(input.equity_value.map_or(true, |v| !v.is_finite()));
        assert!(input.beta.map_or(true, |v| !v.is_finite()));
        assert_eq!(input.debt_value, Some(50.0));
        assert_eq!(input.cost_of_equity, Some(0.12));
    }

    #[test]
    fn test_builder() {
        let input = CapitalInput::new(10.0, 5.0)
            .with_capm(0.04, 1.1, 0.05)
            .with_cost_of_debt(0.06)
            .with_tax_rate(0.3);

        assert_eq!(input.cost_of_equity, None);
        assert_eq!(input.beta, Some(1.1));
        assert_eq!(input.tax_rate, Some(0.3));
    }
}
