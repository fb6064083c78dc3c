//! External data directory subsystem.
//!
//! # Data Flow
//! ```text
//! env var (read per request)
//!     → resolver.rs (drive-letter translation, ~ expansion, canonical dir)
//!     → metrics_log.rs  (metrics.jsonl      → [record, ...])
//!     → predictions.rs  (preds_val.csv      → {columns, rows}, truncated)
//!     → probe.rs        (probe_ethnicity.json → value)
//!     → envelope.rs (presence flags + payloads → ExternalData)
//! ```
//!
//! # Design Decisions
//! - A missing data file is a normal state: empty payload, `false` flag
//! - A malformed data file fails the whole request; no partial envelope
//! - Every request resolves and reads from scratch; nothing is cached

pub mod envelope;
pub mod error;
pub mod metrics_log;
pub mod predictions;
pub mod probe;
pub mod resolver;

pub use envelope::{DataSource, ExternalData, FilePresence};
pub use error::DataError;
pub use predictions::PredictionTable;
pub use resolver::PathResolver;

/// A loader's result together with whether its file existed.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub present: bool,
    pub payload: T,
}

impl<T> Loaded<T> {
    pub fn present(payload: T) -> Self {
        Self {
            present: true,
            payload,
        }
    }
}

impl<T: Default> Loaded<T> {
    pub fn absent() -> Self {
        Self {
            present: false,
            payload: T::default(),
        }
    }
}

/// Map "file not found" to `None`, any other I/O failure to a [`DataError`].
pub(crate) fn not_found_as_absent<T>(
    result: std::io::Result<T>,
    file_name: &str,
) -> Result<Option<T>, DataError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(file_name, err)),
    }
}

pub(crate) fn io_error(file_name: &str, source: std::io::Error) -> DataError {
    DataError::Io {
        file: file_name.to_string(),
        source,
    }
}
