use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{EtlError, Result};

/// One row of the exchange-rate CSV.
#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,

    #[serde(rename = "Rate")]
    rate: f64,
}

/// USD-relative exchange rates, loaded wholesale from an external CSV.
///
/// Read-only after load; a code not present in the source file surfaces as
/// `MissingRate` at lookup time.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRates {
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut rdr = csv::Reader::from_path(path)?;

        let mut rates = HashMap::new();
        for row in rdr.deserialize() {
            let row: RateRow = row?;
            rates.insert(row.currency, row.rate);
        }

        Ok(Self { rates })
    }

    /// Build a rate table directly from (code, multiplier) pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            rates: pairs
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        }
    }

    /// Multiplier against USD for `code`.
    pub fn rate(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| EtlError::MissingRate(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_rates_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exchange_rate.csv");
        fs::write(&path, "Currency,Rate\nGBP,0.8\nEUR,0.93\nINR,82.5\n").unwrap();

        let rates = ExchangeRates::from_csv(&path).unwrap();

        assert_eq!(rates.rate("GBP").unwrap(), 0.8);
        assert_eq!(rates.rate("EUR").unwrap(), 0.93);
        assert_eq!(rates.rate("INR").unwrap(), 82.5);
    }

    #[test]
    fn unknown_code_is_missing_rate() {
        let rates = ExchangeRates::from_pairs(&[("GBP", 0.8), ("EUR", 0.93)]);

        match rates.rate("INR") {
            Err(EtlError::MissingRate(code)) => assert_eq!(code, "INR"),
            other => panic!("expected MissingRate, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ExchangeRates::from_csv(&dir.path().join("absent.csv")).is_err());
    }
}
