// Transformation - pure currency enrichment over the extracted table

use crate::error::Result;
use crate::extract::BankRecord;
use crate::rates::ExchangeRates;

/// One derived market cap, in billions of the target currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub code: String,
    pub market_cap: f64,
}

/// A bank record plus its per-currency conversions, in configured order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBankRecord {
    pub name: String,
    pub market_cap_usd: f64,
    pub conversions: Vec<Conversion>,
}

/// Published column name for a currency code, e.g. `MC_GBP_Billion`.
pub fn column_name(code: &str) -> String {
    format!("MC_{}_Billion", code)
}

/// Inverse of `column_name`; falls back to the raw column name.
pub fn currency_code(column: &str) -> String {
    column
        .strip_prefix("MC_")
        .and_then(|rest| rest.strip_suffix("_Billion"))
        .unwrap_or(column)
        .to_string()
}

/// Round to 2 fractional digits, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Enrich each record with `round(usd * rate, 2)` per target currency.
///
/// Pure: inputs are untouched, order and length are preserved. All required
/// rates are resolved up front, so a missing currency yields an error and no
/// partial output.
pub fn transform(
    records: &[BankRecord],
    rates: &ExchangeRates,
    target_currencies: &[String],
) -> Result<Vec<EnrichedBankRecord>> {
    let resolved: Vec<(String, f64)> = target_currencies
        .iter()
        .map(|code| rates.rate(code).map(|rate| (code.clone(), rate)))
        .collect::<Result<_>>()?;

    Ok(records
        .iter()
        .map(|record| EnrichedBankRecord {
            name: record.name.clone(),
            market_cap_usd: record.market_cap_usd,
            conversions: resolved
                .iter()
                .map(|(code, rate)| Conversion {
                    code: code.clone(),
                    market_cap: round2(record.market_cap_usd * rate),
                })
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;

    fn targets() -> Vec<String> {
        vec!["GBP".to_string(), "EUR".to_string(), "INR".to_string()]
    }

    fn bank(name: &str, market_cap_usd: f64) -> BankRecord {
        BankRecord {
            name: name.to_string(),
            market_cap_usd,
        }
    }

    #[test]
    fn converts_a_single_bank() {
        let rates = ExchangeRates::from_pairs(&[("GBP", 0.8), ("EUR", 0.93), ("INR", 82.5)]);

        let enriched = transform(&[bank("BankX", 100.0)], &rates, &targets()).unwrap();

        assert_eq!(enriched.len(), 1);
        let record = &enriched[0];
        assert_eq!(record.name, "BankX");
        assert_eq!(record.market_cap_usd, 100.0);
        assert_eq!(
            record.conversions,
            vec![
                Conversion { code: "GBP".to_string(), market_cap: 80.0 },
                Conversion { code: "EUR".to_string(), market_cap: 93.0 },
                Conversion { code: "INR".to_string(), market_cap: 8250.0 },
            ]
        );
    }

    #[test]
    fn rounds_to_two_digits() {
        let rates = ExchangeRates::from_pairs(&[("GBP", 0.8), ("EUR", 0.93), ("INR", 82.5)]);

        let enriched = transform(&[bank("JPMorgan Chase", 432.92)], &rates, &targets()).unwrap();

        let caps: Vec<f64> = enriched[0].conversions.iter().map(|c| c.market_cap).collect();
        assert_eq!(caps, vec![346.34, 402.62, 35715.9]);
    }

    #[test]
    fn preserves_order_and_length() {
        let rates = ExchangeRates::from_pairs(&[("GBP", 0.8), ("EUR", 0.93), ("INR", 82.5)]);
        let banks = vec![bank("A", 3.0), bank("B", 2.0), bank("C", 1.0)];

        let enriched = transform(&banks, &rates, &targets()).unwrap();

        assert_eq!(enriched.len(), banks.len());
        let names: Vec<&str> = enriched.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn missing_currency_fails_with_no_partial_output() {
        let rates = ExchangeRates::from_pairs(&[("GBP", 0.8), ("EUR", 0.93)]);

        match transform(&[bank("BankX", 100.0)], &rates, &targets()) {
            Err(EtlError::MissingRate(code)) => assert_eq!(code, "INR"),
            other => panic!("expected MissingRate, got {:?}", other),
        }
    }

    #[test]
    fn column_names_round_trip() {
        assert_eq!(column_name("GBP"), "MC_GBP_Billion");
        assert_eq!(currency_code("MC_GBP_Billion"), "GBP");
        assert_eq!(currency_code("Oddball"), "Oddball");
    }
}
