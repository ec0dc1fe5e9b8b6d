use crate::data::model::RecordTable;
use crate::data::schema::{RAW_CAR, RAW_DESIRED_POSITION, RAW_LAST_WORKPLACE, RAW_RESUME_UPDATED};
use crate::error::Result;

use super::FieldTransform;

/// Raw columns that carry no signal for either model.
pub const UNUSED_COLUMNS: [&str; 4] = [
    RAW_CAR,
    RAW_LAST_WORKPLACE,
    RAW_DESIRED_POSITION,
    RAW_RESUME_UPDATED,
];

/// Drops the unused raw columns. No parsing, no row removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneUnusedColumns;

impl FieldTransform for PruneUnusedColumns {
    fn name(&self) -> &'static str {
        "prune"
    }

    fn consumes(&self) -> Vec<&'static str> {
        UNUSED_COLUMNS.to_vec()
    }

    fn produces(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn apply(&self, mut table: RecordTable) -> Result<RecordTable> {
        table.drop_columns(self.name(), &UNUSED_COLUMNS)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::error::PipelineError;

    fn table() -> RecordTable {
        let mut t = RecordTable::new(vec!["a".into(), "b".into()]);
        for name in UNUSED_COLUMNS.iter().chain(["keep"].iter()) {
            t.push_column(name, vec![CellValue::from_raw("x"), CellValue::Null])
                .unwrap();
        }
        t
    }

    #[test]
    fn drops_only_unused_columns() {
        let out = PruneUnusedColumns.apply(table()).unwrap();
        assert_eq!(out.column_names(), vec!["keep"]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn second_run_reports_missing_column() {
        let once = PruneUnusedColumns.apply(table()).unwrap();
        let err = PruneUnusedColumns.apply(once.clone()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { ref stage, .. } if stage == "prune"));
        assert_eq!(once.column_names(), vec!["keep"]);
    }
}
