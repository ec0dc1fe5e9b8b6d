use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed input {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("stage `{stage}` requires column `{column}` which is not present")]
    MissingColumn { stage: String, column: String },

    #[error("invalid pipeline composition: {0}")]
    Composition(String),

    #[error("column `{0}` already exists")]
    DuplicateColumn(String),

    #[error("column `{column}` has {found} values but the table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column `{column}`, row {row}: expected a numeric value, found `{value}`")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("feature schema mismatch: model expects {expected:?}, input has {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("training error: {0}")]
    Training(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_column(stage: &str, column: &str) -> Self {
        PipelineError::MissingColumn {
            stage: stage.to_string(),
            column: column.to_string(),
        }
    }
}
