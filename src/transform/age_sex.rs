use crate::data::filter::retain_parsed;
use crate::data::model::{CellValue, RecordTable};
use crate::data::schema::{AGE, RAW_SEX_AGE, SEX};
use crate::error::Result;

use super::keywords::digit_runs;
use super::FieldTransform;

/// Sex tokens coded as `0`. Every other token, expected or not, is coded `1`.
pub const FEMALE_TOKENS: &[&str] = &["Female", "Женщина"];

/// Splits "Мужчина , 39 лет , родился ..." into a 0/1 sex flag and an age.
///
/// Rows with fewer than two comma-separated parts, or without a positive
/// age in the second part, are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeSexTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SexAge {
    pub sex: i64,
    pub age: i64,
}

/// Parse one sex/age cell. `None` marks the row for removal.
pub fn parse_sex_age(text: &str) -> Option<SexAge> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }

    let sex = if FEMALE_TOKENS.contains(&parts[0]) { 0 } else { 1 };

    // First digit run of the second part, so "39 лет" and "9 лет" both parse.
    let age: i64 = digit_runs(parts[1]).first()?.parse().ok()?;
    if age <= 0 {
        return None;
    }

    Some(SexAge { sex, age })
}

impl FieldTransform for AgeSexTransform {
    fn name(&self) -> &'static str {
        "age_sex"
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![RAW_SEX_AGE]
    }

    fn produces(&self) -> Vec<&'static str> {
        vec![SEX, AGE]
    }

    fn apply(&self, table: RecordTable) -> Result<RecordTable> {
        let parsed: Vec<Option<SexAge>> = table
            .text_values(self.name(), RAW_SEX_AGE)?
            .into_iter()
            .map(|text| text.and_then(parse_sex_age))
            .collect();

        let (mut table, values) = retain_parsed(table, self.name(), parsed);

        table.push_column(SEX, values.iter().map(|v| CellValue::Integer(v.sex)).collect())?;
        table.push_column(AGE, values.iter().map(|v| CellValue::Integer(v.age)).collect())?;
        table.drop_column(self.name(), RAW_SEX_AGE)?;
        Ok(table)
    }
}
