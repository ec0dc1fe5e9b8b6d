use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use ndarray::{Array1, Array2};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use crate::error::{PipelineError, Result};
use crate::features::{FeatureMatrix, TaskData};

/// File names of one exported `(X, y)` pair.
#[derive(Debug, Clone, Copy)]
pub struct PairNames {
    pub features: &'static str,
    pub target: &'static str,
}

/// Seniority classification inputs.
pub const CLASSIFICATION_FILES: PairNames = PairNames {
    features: "X_cls.parquet",
    target: "y_cls.parquet",
};

/// Salary regression inputs.
pub const REGRESSION_FILES: PairNames = PairNames {
    features: "X_data.parquet",
    target: "y_data.parquet",
};

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write named `f64` columns as one Parquet record batch.
fn write_columns(path: &Path, names: &[String], columns: Vec<Vec<f64>>) -> Result<()> {
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(n, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(Float64Array::from(values)) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub fn write_features(path: &Path, features: &FeatureMatrix) -> Result<()> {
    let columns = features
        .x
        .columns()
        .into_iter()
        .map(|c| c.to_vec())
        .collect();
    write_columns(path, &features.feature_names, columns)
}

pub fn write_target(path: &Path, name: &str, y: &Array1<f64>) -> Result<()> {
    write_columns(path, &[name.to_string()], vec![y.to_vec()])
}

/// Write both halves of a task into `dir`, returning the two paths.
pub fn write_task(dir: &Path, names: PairNames, task: &TaskData) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    let x_path = dir.join(names.features);
    let y_path = dir.join(names.target);
    write_features(&x_path, &task.features)?;
    write_target(&y_path, &task.target_name, &task.y)?;
    log::info!(
        "wrote {} rows x {} features to {} and target `{}` to {}",
        task.features.n_rows(),
        task.features.feature_names.len(),
        x_path.display(),
        task.target_name,
        y_path.display()
    );
    Ok((x_path, y_path))
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn numeric_column(col: &ArrayRef, name: &str) -> Result<Vec<f64>> {
    let unsupported = || PipelineError::NonNumeric {
        column: name.to_string(),
        row: 0,
        value: format!("{:?}", col.data_type()),
    };
    let null_at = |row: usize| PipelineError::NonNumeric {
        column: name.to_string(),
        row,
        value: "<null>".to_string(),
    };
    if let Some(row) = (0..col.len()).find(|&i| col.is_null(i)) {
        return Err(null_at(row));
    }

    let values = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(unsupported)?
            .values()
            .to_vec(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(unsupported)?
            .values()
            .iter()
            .map(|v| f64::from(*v))
            .collect(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(unsupported)?
            .values()
            .iter()
            .map(|v| *v as f64)
            .collect(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .ok_or_else(unsupported)?
            .values()
            .iter()
            .map(|v| f64::from(*v))
            .collect(),
        _ => return Err(unsupported()),
    };
    Ok(values)
}

/// Read every column of a Parquet file as `f64`, concatenating batches.
fn read_columns(path: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for batch_result in reader {
        let batch = batch_result?;
        for (j, name) in names.iter().enumerate() {
            columns[j].extend(numeric_column(batch.column(j), name)?);
        }
    }
    Ok((names, columns))
}

pub fn read_features(path: &Path) -> Result<FeatureMatrix> {
    let (feature_names, columns) = read_columns(path)?;
    let n_rows = columns.first().map_or(0, Vec::len);
    let mut x = Array2::<f64>::zeros((n_rows, columns.len()));
    for (j, column) in columns.iter().enumerate() {
        for (i, value) in column.iter().enumerate() {
            x[[i, j]] = *value;
        }
    }
    Ok(FeatureMatrix { feature_names, x })
}

/// Read a single-column target file into `(name, y)`.
pub fn read_target(path: &Path) -> Result<(String, Array1<f64>)> {
    let (mut names, mut columns) = read_columns(path)?;
    if names.len() != 1 {
        return Err(PipelineError::Malformed {
            path: path.to_path_buf(),
            reason: format!("expected one target column, found {}", names.len()),
        });
    }
    Ok((names.remove(0), Array1::from(columns.remove(0))))
}

/// Read a pair written by `write_task`.
pub fn read_task(dir: &Path, names: PairNames) -> Result<TaskData> {
    let features = read_features(&dir.join(names.features))?;
    let (target_name, y) = read_target(&dir.join(names.target))?;
    if y.len() != features.n_rows() {
        return Err(PipelineError::LengthMismatch {
            column: target_name,
            expected: features.n_rows(),
            found: y.len(),
        });
    }
    Ok(TaskData {
        features,
        target_name,
        y,
    })
}

/// Render the first `max_rows` rows of a written file as a text table.
pub fn preview(path: &Path, max_rows: usize) -> Result<String> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(max_rows.max(1))
        .build()?;
    let batches = match reader.next() {
        Some(batch) => vec![batch?],
        None => Vec::new(),
    };
    Ok(pretty_format_batches(&batches)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn task() -> TaskData {
        TaskData {
            features: FeatureMatrix {
                feature_names: vec!["age".into(), "experience_months".into()],
                x: array![[30.0, 12.0], [41.0, 200.0], [25.0, 0.0]],
            },
            target_name: "salary".into(),
            y: array![50_000.0, 120_000.0, 30_000.0],
        }
    }

    #[test]
    fn written_pair_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        write_task(dir.path(), REGRESSION_FILES, &task()).unwrap();
        let back = read_task(dir.path(), REGRESSION_FILES).unwrap();
        assert_eq!(back, task());
    }

    #[test]
    fn output_bytes_are_deterministic() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write_task(a.path(), CLASSIFICATION_FILES, &task()).unwrap();
        write_task(b.path(), CLASSIFICATION_FILES, &task()).unwrap();
        for name in [CLASSIFICATION_FILES.features, CLASSIFICATION_FILES.target] {
            let left = std::fs::read(a.path().join(name)).unwrap();
            let right = std::fs::read(b.path().join(name)).unwrap();
            assert_eq!(left, right, "{name} differs");
        }
    }

    #[test]
    fn preview_shows_leading_rows() {
        let dir = tempfile::tempdir().unwrap();
        let (x_path, _) = write_task(dir.path(), REGRESSION_FILES, &task()).unwrap();
        let text = preview(&x_path, 2).unwrap();
        assert!(text.contains("experience_months"));
        assert!(text.contains("41"));
        assert!(!text.contains("25"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_features(&dir.path().join("absent.parquet")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
