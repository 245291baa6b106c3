use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Stamp layout: `2023-Sep-08 14:02:51`
const TIMESTAMP_FORMAT: &str = "%Y-%b-%d %H:%M:%S";

/// Append-only progress log.
///
/// One line per pipeline milestone, `"<timestamp> - <message>"`. The file is
/// opened and closed per call; entries are never rewritten or deleted, so an
/// aborted run is visible as missing trailing lines. An unopenable log path
/// is a fatal configuration error surfaced to the caller.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one stamped milestone line.
    pub fn record(&self, message: &str) -> Result<()> {
        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} - {}", stamp, message)?;
        Ok(())
    }
}
