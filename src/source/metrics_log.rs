//! Line-delimited JSON metrics log.

use std::path::Path;

use serde_json::Value;

use crate::source::error::DataError;
use crate::source::{io_error, not_found_as_absent, Loaded};

/// Split on `\n`, `\r\n` and bare `\r`.
fn universal_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Read one JSON value per non-blank line, in file order.
///
/// A single malformed line fails the whole load; no partial result is
/// returned.
pub async fn load_metrics(root: &Path, file_name: &str) -> Result<Loaded<Vec<Value>>, DataError> {
    let path = root.join(file_name);
    let Some(bytes) = not_found_as_absent(tokio::fs::read(&path).await, file_name)? else {
        return Ok(Loaded::absent());
    };
    let text = String::from_utf8(bytes).map_err(|e| {
        io_error(
            file_name,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;

    let mut records = Vec::new();
    for (index, line) in universal_lines(&text).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| DataError::MetricsLine {
            file: file_name.to_string(),
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(Loaded::present(records))
}
