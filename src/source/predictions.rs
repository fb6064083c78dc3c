//! CSV prediction table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::source::error::DataError;
use crate::source::{not_found_as_absent, Loaded};

/// Header plus decoded rows of the predictions file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionTable {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Read the header and at most `limit` rows.
///
/// Cells are kept as strings. Rows shorter than the header map the missing
/// columns to `null`; fields past the last column are dropped. Decoding runs
/// on the blocking pool and stops reading once `limit` rows are collected.
pub async fn load_predictions(
    root: &Path,
    file_name: &str,
    limit: usize,
) -> Result<Loaded<PredictionTable>, DataError> {
    let path = root.join(file_name);
    let file_name = file_name.to_string();
    tokio::task::spawn_blocking(move || read_table(path, &file_name, limit)).await?
}

fn read_table(
    path: PathBuf,
    file_name: &str,
    limit: usize,
) -> Result<Loaded<PredictionTable>, DataError> {
    let Some(file) = not_found_as_absent(std::fs::File::open(&path), file_name)? else {
        return Ok(Loaded::absent());
    };

    let csv_error = |source: csv::Error| DataError::Predictions {
        file: file_name.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    // The reader skips blank lines, so a blank first line surfaces the first
    // data record as the header. Its position tells the two apart.
    let header = reader.headers().map_err(csv_error)?.clone();
    let header_line = header.position().map_or(1, |position| position.line());
    let (columns, first_row) = if header_line > 1 && !header.is_empty() {
        (Vec::new(), Some(header))
    } else {
        (header.iter().map(str::to_string).collect::<Vec<_>>(), None)
    };

    let records = first_row
        .into_iter()
        .map(Ok::<_, csv::Error>)
        .chain(reader.records());

    let mut rows = Vec::new();
    for record in records.take(limit) {
        let record = record.map_err(csv_error)?;
        // Fields past the last column have no name to go under and are dropped.
        let row = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let cell = record
                    .get(index)
                    .map_or(Value::Null, |field| Value::String(field.to_string()));
                (column.clone(), cell)
            })
            .collect();
        rows.push(row);
    }

    Ok(Loaded::present(PredictionTable { columns, rows }))
}
