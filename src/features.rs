use ndarray::{Array1, Array2};

use crate::data::model::{Column, RecordTable};
use crate::error::{PipelineError, Result};

/// Feature matrix with its column names, rows in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub feature_names: Vec<String>,
    pub x: Array2<f64>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    /// Keep only the given rows, in order.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureMatrix {
        FeatureMatrix {
            feature_names: self.feature_names.clone(),
            x: self.x.select(ndarray::Axis(0), indices),
        }
    }
}

/// An `(X, y)` pair for one downstream task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskData {
    pub features: FeatureMatrix,
    pub target_name: String,
    pub y: Array1<f64>,
}

impl TaskData {
    pub fn select_rows(&self, indices: &[usize]) -> TaskData {
        TaskData {
            features: self.features.select_rows(indices),
            target_name: self.target_name.clone(),
            y: self.y.select(ndarray::Axis(0), indices),
        }
    }
}

fn numeric_values(column: &Column) -> Result<Vec<f64>> {
    column
        .values
        .iter()
        .enumerate()
        .map(|(row, v)| {
            v.as_f64().ok_or_else(|| PipelineError::NonNumeric {
                column: column.name.clone(),
                row,
                value: v.to_string(),
            })
        })
        .collect()
}

/// Split a fully transformed table into `(X, y)`: `target` becomes `y`,
/// every other column stays in `X` in table order. Every cell must be
/// numeric.
pub fn split_target(table: &RecordTable, target: &str) -> Result<TaskData> {
    let y = Array1::from(numeric_values(table.column("features", target)?)?);

    let feature_columns: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|c| c.name != target)
        .collect();

    let n_rows = table.len();
    let n_cols = feature_columns.len();
    let mut x = Array2::<f64>::zeros((n_rows, n_cols));
    for (j, column) in feature_columns.iter().enumerate() {
        for (i, value) in numeric_values(column)?.into_iter().enumerate() {
            x[[i, j]] = value;
        }
    }

    Ok(TaskData {
        features: FeatureMatrix {
            feature_names: feature_columns.iter().map(|c| c.name.clone()).collect(),
            x,
        },
        target_name: target.to_string(),
        y,
    })
}
