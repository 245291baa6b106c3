use thiserror::Error;

/// Everything that can abort the pipeline chain.
///
/// No stage catches another stage's failure: each variant propagates with
/// `?` straight to the process boundary and fails the run.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("missing exchange rate for currency: {0}")]
    MissingRate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
