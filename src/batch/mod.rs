// Batch runner exports
pub mod runner;
pub mod table;

use thiserror::Error;

pub use runner::{run, RunSummary};
pub use table::{ColumnMap, REQUIRED_COLUMNS, DECISION_COLUMN, URL_COLUMN};

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Input table is missing required headers {missing:?} (found {found:?})")]
    MissingHeaders {
        found: Vec<String>,
        missing: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
