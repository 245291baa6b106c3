// CSV export - flat-file serialization of the enriched table

use std::path::Path;

use crate::error::Result;
use crate::transform::{column_name, EnrichedBankRecord};

/// Write the enriched table to `path`, overwriting any existing file.
///
/// Header: `Name, MC_USD_Billion, MC_<code>_Billion...` in configured
/// currency order; one row per record, caps formatted with 2 decimals.
/// Writing the same table twice yields a byte-identical file.
pub fn write_csv(
    records: &[EnrichedBankRecord],
    target_currencies: &[String],
    path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["Name".to_string(), "MC_USD_Billion".to_string()];
    header.extend(target_currencies.iter().map(|code| column_name(code)));
    wtr.write_record(&header)?;

    for record in records {
        let mut row = vec![record.name.clone(), format!("{:.2}", record.market_cap_usd)];
        row.extend(
            record
                .conversions
                .iter()
                .map(|c| format!("{:.2}", c.market_cap)),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Conversion;
    use std::fs;

    fn targets() -> Vec<String> {
        vec!["GBP".to_string(), "EUR".to_string(), "INR".to_string()]
    }

    fn enriched(name: &str, usd: f64, gbp: f64, eur: f64, inr: f64) -> EnrichedBankRecord {
        EnrichedBankRecord {
            name: name.to_string(),
            market_cap_usd: usd,
            conversions: vec![
                Conversion { code: "GBP".to_string(), market_cap: gbp },
                Conversion { code: "EUR".to_string(), market_cap: eur },
                Conversion { code: "INR".to_string(), market_cap: inr },
            ],
        }
    }

    #[test]
    fn writes_header_and_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Largest_banks_data.csv");
        let records = vec![
            enriched("BankX", 100.0, 80.0, 93.0, 8250.0),
            enriched("BankY", 50.0, 40.0, 46.5, 4125.0),
        ];

        write_csv(&records, &targets(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion"
        );
        assert_eq!(lines[1], "BankX,100.00,80.00,93.00,8250.00");
        assert_eq!(lines[2], "BankY,50.00,40.00,46.50,4125.00");
    }

    #[test]
    fn rewrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![enriched("BankX", 100.0, 80.0, 93.0, 8250.0)];

        write_csv(&records, &targets(), &path).unwrap();
        let first = fs::read(&path).unwrap();

        write_csv(&records, &targets(), &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second, "overwrite must not accumulate rows");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![enriched("Banco, S.A.", 10.0, 8.0, 9.3, 825.0)];

        write_csv(&records, &targets(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Banco, S.A.\""));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");

        assert!(write_csv(&[], &targets(), &path).is_err());
    }
}
