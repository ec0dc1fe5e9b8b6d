use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Raw source cells are `Text`; derived feature
/// columns are `Integer` or `Float`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so CellValue can key a BTreeMap (value counts) --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Parse a raw source field. Empty fields become `Null`.
    pub fn from_raw(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(s.to_string())
        }
    }

    /// Numeric view used when building feature matrices.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for CellValue {
    fn from(flag: bool) -> Self {
        CellValue::Integer(i64::from(flag))
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// RecordTable – the table threaded through the pipeline
// ---------------------------------------------------------------------------

/// Ordered rows of named columns. Rows are addressed by position and
/// renumbered `0..len` whenever rows are removed.
///
/// `ids` holds the source row identifiers (the first source column). They
/// follow their rows through filtering for diagnostics and are never a
/// feature.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    ids: Vec<String>,
    columns: Vec<Column>,
}

impl RecordTable {
    /// An empty-column table with one row per identifier.
    pub fn new(ids: Vec<String>) -> Self {
        RecordTable {
            ids,
            columns: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Source row identifiers, in current row order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column; `stage` names the caller in the error.
    pub fn column(&self, stage: &str, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| PipelineError::missing_column(stage, name))
    }

    /// Text view of a column. `Null` and non-text cells read as `None`.
    pub fn text_values(&self, stage: &str, name: &str) -> Result<Vec<Option<&str>>> {
        let column = self.column(stage, name)?;
        Ok(column.values.iter().map(CellValue::as_text).collect())
    }

    /// Append a column at the end of the table.
    pub fn push_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        if self.has_column(name) {
            return Err(PipelineError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.len() {
            return Err(PipelineError::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                found: values.len(),
            });
        }
        self.columns.push(Column {
            name: name.to_string(),
            values,
        });
        Ok(())
    }

    /// Remove a column and hand it back.
    pub fn drop_column(&mut self, stage: &str, name: &str) -> Result<Column> {
        let pos = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| PipelineError::missing_column(stage, name))?;
        Ok(self.columns.remove(pos))
    }

    /// Remove several columns. Fails before touching the table if any is absent.
    pub fn drop_columns(&mut self, stage: &str, names: &[&str]) -> Result<()> {
        if let Some(missing) = names.iter().find(|n| !self.has_column(n)) {
            return Err(PipelineError::missing_column(stage, missing));
        }
        self.columns.retain(|c| !names.contains(&c.name.as_str()));
        Ok(())
    }

    /// Materialise a new table holding only the rows at `indices`, in that
    /// order, renumbered from zero.
    pub fn take_rows(&self, indices: &[usize]) -> RecordTable {
        let ids = indices.iter().map(|&i| self.ids[i].clone()).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: indices.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();
        RecordTable { ids, columns }
    }

    /// Count of each distinct value in a column.
    pub fn value_counts(&self, stage: &str, name: &str) -> Result<BTreeMap<CellValue, usize>> {
        let column = self.column(stage, name)?;
        let mut counts = BTreeMap::new();
        for value in &column.values {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
