use crate::data::filter::retain_parsed;
use crate::data::model::{CellValue, RecordTable};
use crate::data::schema::{EDUCATION_LEVEL, RAW_EDUCATION};
use crate::error::Result;

use super::keywords::{contains_any, normalize};
use super::FieldTransform;

/// Education levels in priority order; the first rule that matches wins.
pub const EDUCATION_RULES: &[(i64, &[&str])] = &[
    (4, &["высшее", "higher"]),
    (3, &["неоконченное", "incomplete"]),
    (2, &["специальное", "special"]),
    (1, &["среднее", "secondary"]),
];

/// Ordinal education level: 4 higher, 3 incomplete higher, 2 specialized
/// secondary, 1 secondary. Rows matching no rule are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EducationTransform;

pub fn parse_education_level(text: &str) -> Option<i64> {
    let lowered = normalize(Some(text));
    EDUCATION_RULES
        .iter()
        .find(|(_, keywords)| contains_any(&lowered, keywords))
        .map(|(level, _)| *level)
}

impl FieldTransform for EducationTransform {
    fn name(&self) -> &'static str {
        "education"
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![RAW_EDUCATION]
    }

    fn produces(&self) -> Vec<&'static str> {
        vec![EDUCATION_LEVEL]
    }

    fn apply(&self, table: RecordTable) -> Result<RecordTable> {
        let parsed: Vec<Option<i64>> = table
            .text_values(self.name(), RAW_EDUCATION)?
            .into_iter()
            .map(|text| text.and_then(parse_education_level))
            .collect();

        let (mut table, levels) = retain_parsed(table, self.name(), parsed);

        table.push_column(
            EDUCATION_LEVEL,
            levels.into_iter().map(CellValue::Integer).collect(),
        )?;
        table.drop_column(self.name(), RAW_EDUCATION)?;
        Ok(table)
    }
}
