use std::path::PathBuf;

/// Runtime configuration for one pipeline run.
///
/// Every external surface the pipeline touches lives here — source URL,
/// input/output paths, store table name, row limit, conversion targets —
/// so tests can substitute all of them instead of patching globals.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// HTML document holding the ranked bank table.
    pub source_url: String,

    /// Exchange-rate CSV with `Currency` and `Rate` columns.
    pub rate_csv: PathBuf,

    /// Flat-file output, fully overwritten each run.
    pub output_csv: PathBuf,

    /// Embedded SQLite store.
    pub db_path: PathBuf,

    /// Target table inside the store, dropped and recreated each run.
    pub table_name: String,

    /// Append-only progress log, the only cross-run persistent file.
    pub log_path: PathBuf,

    /// Number of data rows to extract below the header.
    pub row_limit: usize,

    /// Conversion targets, in published column order.
    pub target_currencies: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: "https://web.archive.org/web/20230908091635/\
                         https://en.wikipedia.org/wiki/List_of_largest_banks"
                .to_string(),
            rate_csv: PathBuf::from("exchange_rate.csv"),
            output_csv: PathBuf::from("Largest_banks_data.csv"),
            db_path: PathBuf::from("Banks.db"),
            table_name: "Largest_banks".to_string(),
            log_path: PathBuf::from("code_log.txt"),
            row_limit: 10,
            target_currencies: vec!["GBP".to_string(), "EUR".to_string(), "INR".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reproduces_published_contract() {
        let config = PipelineConfig::default();

        assert!(config.source_url.starts_with("https://web.archive.org/"));
        assert!(!config.source_url.contains(char::is_whitespace));
        assert_eq!(config.table_name, "Largest_banks");
        assert_eq!(config.row_limit, 10);
        assert_eq!(config.target_currencies, vec!["GBP", "EUR", "INR"]);
    }
}
