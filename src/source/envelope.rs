//! Response composition.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DataSourceConfig;
use crate::source::error::DataError;
use crate::source::metrics_log::load_metrics;
use crate::source::predictions::{load_predictions, PredictionTable};
use crate::source::probe::load_probe;
use crate::source::resolver::PathResolver;

/// Whether each expected file exists under the resolved root.
///
/// Existence only: an empty file still counts as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilePresence {
    pub metrics: bool,
    pub predictions: bool,
    pub probe: bool,
}

/// Everything the data endpoint returns for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalData {
    pub base_path: String,
    pub configured_path: Option<String>,
    pub files: FilePresence,
    pub metrics: Vec<Value>,
    pub predictions: PredictionTable,
    pub probe: Value,
}

/// The configured data directory and the file names expected inside it.
#[derive(Debug, Clone)]
pub struct DataSource {
    resolver: PathResolver,
    metrics_file: String,
    predictions_file: String,
    probe_file: String,
}

impl DataSource {
    pub fn from_config(config: &DataSourceConfig) -> Self {
        Self {
            resolver: PathResolver::from_config(config),
            metrics_file: config.metrics_file.clone(),
            predictions_file: config.predictions_file.clone(),
            probe_file: config.probe_file.clone(),
        }
    }

    /// Resolve the data directory and load all three files from it.
    ///
    /// Fails before touching any file if the directory cannot be resolved.
    /// Any loader failure fails the whole collection.
    pub async fn collect(&self, max_prediction_rows: usize) -> Result<ExternalData, DataError> {
        let root = self.resolver.resolve().await?;
        let configured_path = self.resolver.configured();

        let (metrics, predictions, probe) = tokio::try_join!(
            load_metrics(&root, &self.metrics_file),
            load_predictions(&root, &self.predictions_file, max_prediction_rows),
            load_probe(&root, &self.probe_file),
        )?;

        Ok(ExternalData {
            base_path: root.display().to_string(),
            configured_path,
            files: FilePresence {
                metrics: metrics.present,
                predictions: predictions.present,
                probe: probe.present,
            },
            metrics: metrics.payload,
            predictions: predictions.payload,
            probe: probe.payload,
        })
    }
}
