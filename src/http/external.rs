//! The external data endpoint.

use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::config::PredictionLimits;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::source::ExternalData;

/// Query string of `GET /api/external/data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQuery {
    pub max_prediction_rows: Option<i64>,
}

/// Apply the default and check the closed bound.
pub fn row_limit(requested: Option<i64>, limits: &PredictionLimits) -> Result<usize, ApiError> {
    let Some(requested) = requested else {
        return Ok(limits.default_rows);
    };
    usize::try_from(requested)
        .ok()
        .filter(|rows| limits.contains(*rows))
        .ok_or_else(|| {
            ApiError::unprocessable(format!(
                "max_prediction_rows must be between {} and {}, got {}",
                limits.min_rows, limits.max_rows, requested
            ))
        })
}

pub async fn get_external_data(
    State(state): State<AppState>,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> Response {
    let start_time = Instant::now();

    let response = match load(&state, query).await {
        Ok(data) => {
            tracing::info!(
                base_path = %data.base_path,
                metrics = data.metrics.len(),
                prediction_rows = data.predictions.rows.len(),
                has_metrics = data.files.metrics,
                has_predictions = data.files.predictions,
                has_probe = data.files.probe,
                "External data served"
            );
            metrics::record_rows(data.predictions.rows.len());
            Json(data).into_response()
        }
        Err(err) => {
            if err.status.is_server_error() {
                tracing::error!(
                    status = err.status.as_u16(),
                    detail = %err.detail,
                    "External data request failed"
                );
            } else {
                tracing::warn!(
                    status = err.status.as_u16(),
                    detail = %err.detail,
                    "External data request rejected"
                );
            }
            err.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

async fn load(
    state: &AppState,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> Result<ExternalData, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
    let limit = row_limit(query.max_prediction_rows, &state.config.predictions)?;
    Ok(state.source.collect(limit).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_default_applied_when_absent() {
        let limits = PredictionLimits::default();
        assert_eq!(row_limit(None, &limits).unwrap(), 500);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let limits = PredictionLimits::default();
        assert_eq!(row_limit(Some(1), &limits).unwrap(), 1);
        assert_eq!(row_limit(Some(5000), &limits).unwrap(), 5000);
    }

    #[test]
    fn test_out_of_range_is_unprocessable() {
        let limits = PredictionLimits::default();
        for requested in [0, -3, 5001] {
            let err = row_limit(Some(requested), &limits).unwrap_err();
            assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        }
    }
}
