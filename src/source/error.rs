//! Failures raised while resolving the data directory or reading its files.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for one external data request.
///
/// A missing data file is never an error; loaders report it as an empty
/// payload instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Environment variable {var} is not set.")]
    NotConfigured { var: String },

    #[error("Configured path {} does not exist or is not a directory.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Unable to parse metrics file {file} at line {line}: {source}")]
    MetricsLine {
        file: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to parse probe file {file}: {source}")]
    Probe {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to parse predictions file {file}: {source}")]
    Predictions {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("Unable to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DataError {
    /// True for failures caused by the data directory being unset or absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotConfigured { .. } | DataError::NotFound { .. })
    }
}
