use thiserror::Error;

use crate::driver::FieldRole;

/// Pass-level failure of the automation layer. Ends the crawl; listings
/// already emitted are kept.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("search input unavailable: {0}")]
    SearchInputUnavailable(String),

    #[error("page closed")]
    PageClosed,

    #[error("automation failure: {0}")]
    Automation(String),
}

/// A single card could not be read. Recovered with a placeholder inside the
/// pass and never propagated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("could not read {role} field: {reason}")]
    Field { role: FieldRole, reason: String },

    #[error("could not read card text: {0}")]
    Text(String),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read replay fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid replay fixture: {0}")]
    Parse(#[from] serde_json::Error),
}
