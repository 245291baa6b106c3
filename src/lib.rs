// Largest Banks ETL - Core Library
// Exposes every pipeline stage for use in the CLI and tests

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod extract;
pub mod logger;
pub mod pipeline;
pub mod rates;
pub mod transform;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{EtlError, Result};
pub use extract::{
    extract, fetch_document, parse_bank_table, BankRecord, FirstByClass, TableSelector,
};
pub use logger::ProgressLog;
pub use rates::ExchangeRates;
pub use transform::{transform, Conversion, EnrichedBankRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
