use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use crate::error::{PipelineError, Result};

use super::model::{CellValue, RecordTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a raw resume export. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – comma-separated, header row, first column is the row identifier
/// * `.tsv` – same layout, tab-separated
///
/// `delimiter` overrides the extension's default separator.
pub fn load_file(path: &Path, delimiter: Option<u8>) -> Result<RecordTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let default_delimiter = match ext.as_str() {
        "csv" => b',',
        "tsv" => b'\t',
        other => return Err(PipelineError::UnsupportedFormat(other.to_string())),
    };

    load_delimited(path, delimiter.unwrap_or(default_delimiter))
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Layout: header row with column names. The first column holds the row
/// identifier (pandas leaves its header blank) and is kept out of the
/// feature columns. Every other column is loaded as text; empty fields load
/// as `Null`.
fn load_delimited(path: &Path, delimiter: u8) -> Result<RecordTable> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let csv_err = |source: csv::Error| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(PipelineError::Malformed {
            path: path.to_path_buf(),
            reason: "missing header row".to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    if let Some(dup) = headers[1..].iter().find(|h| !seen.insert(h.as_str())) {
        return Err(PipelineError::Malformed {
            path: path.to_path_buf(),
            reason: format!("duplicate column `{dup}`"),
        });
    }

    let mut ids = Vec::new();
    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len() - 1];

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let mut fields = record.iter();
        ids.push(fields.next().unwrap_or("").to_string());
        for (column, value) in columns.iter_mut().zip(fields) {
            column.push(CellValue::from_raw(value));
        }
    }

    let mut table = RecordTable::new(ids);
    for (name, values) in headers[1..].iter().zip(columns) {
        table.push_column(name, values)?;
    }

    log::info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.column_names().len(),
        path.display()
    );

    Ok(table)
}
