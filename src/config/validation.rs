//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0, row bounds ordered)
//! - Reject data file names that would escape the data directory
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::{Component, Path};

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: {value:?} must be a plain file name")]
    NotAFileName { field: &'static str, value: String },

    #[error("prediction limits must satisfy 1 <= min_rows ({min}) <= default_rows ({default}) <= max_rows ({max})")]
    RowBounds { min: usize, default: usize, max: usize },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    let source = &config.data_source;
    if source.env_var.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "data_source.env_var",
        });
    }
    if source.mount_root.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "data_source.mount_root",
        });
    }
    check_file_name("data_source.metrics_file", &source.metrics_file, &mut errors);
    check_file_name(
        "data_source.predictions_file",
        &source.predictions_file,
        &mut errors,
    );
    check_file_name("data_source.probe_file", &source.probe_file, &mut errors);

    let limits = config.predictions;
    if limits.min_rows == 0
        || limits.min_rows > limits.default_rows
        || limits.default_rows > limits.max_rows
    {
        errors.push(ValidationError::RowBounds {
            min: limits.min_rows,
            default: limits.default_rows,
            max: limits.max_rows,
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_file_name(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.is_empty() {
        errors.push(ValidationError::Empty { field });
        return;
    }
    let mut components = Path::new(value).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain {
        errors.push(ValidationError::NotAFileName {
            field,
            value: value.to_string(),
        });
    }
}
