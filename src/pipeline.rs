// Pipeline - the single forward chain over all stages

use crate::config::PipelineConfig;
use crate::db;
use crate::error::Result;
use crate::export;
use crate::extract::{self, FirstByClass, TableSelector};
use crate::logger::ProgressLog;
use crate::rates::ExchangeRates;
use crate::transform::{transform, EnrichedBankRecord};

/// Run the full chain with the original first-`wikitable` selection policy.
pub fn run(config: &PipelineConfig) -> Result<Vec<EnrichedBankRecord>> {
    let selector = FirstByClass::wikitable();
    run_with_selector(config, &selector)
}

/// Extract → transform → {CSV, DB} → queries, one stage after another.
///
/// Stage boundaries are recorded in the progress log; only successful
/// milestones are logged, so an aborted run shows up as missing trailing
/// lines. Any stage error aborts the rest of the chain with no recovery.
pub fn run_with_selector(
    config: &PipelineConfig,
    selector: &dyn TableSelector,
) -> Result<Vec<EnrichedBankRecord>> {
    let log = ProgressLog::new(&config.log_path);
    log.record("Pipeline started")?;

    log.record("Data extraction started")?;
    let banks = extract::extract(config, selector)?;
    log.record("Data extraction completed")?;

    log.record("Data transformation started")?;
    let rates = ExchangeRates::from_csv(&config.rate_csv)?;
    let enriched = transform(&banks, &rates, &config.target_currencies)?;
    log.record("Data transformation completed")?;

    log.record("Saving data to CSV started")?;
    export::write_csv(&enriched, &config.target_currencies, &config.output_csv)?;
    log.record("Data saved to CSV successfully")?;

    log.record("Saving data to SQL database started")?;
    db::load_to_db(config, &enriched)?;
    log.record("Data saved to SQL database successfully")?;

    log.record("Running queries on database started")?;
    let persisted = db::run_queries(config)?;
    log.record("Database queries executed successfully")?;

    log.record("Pipeline completed")?;
    Ok(persisted)
}
