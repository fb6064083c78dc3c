//! JSON probe document.

use std::path::Path;

use serde_json::{Map, Value};

use crate::source::error::DataError;
use crate::source::{not_found_as_absent, Loaded};

/// Parse the whole probe file as one JSON value.
///
/// An object is expected but any valid JSON is returned as-is. A missing file
/// yields an empty object.
pub async fn load_probe(root: &Path, file_name: &str) -> Result<Loaded<Value>, DataError> {
    let path = root.join(file_name);
    let Some(bytes) = not_found_as_absent(tokio::fs::read(&path).await, file_name)? else {
        return Ok(Loaded {
            present: false,
            payload: Value::Object(Map::new()),
        });
    };

    let document = serde_json::from_slice(&bytes).map_err(|source| DataError::Probe {
        file: file_name.to_string(),
        source,
    })?;

    Ok(Loaded::present(document))
}
