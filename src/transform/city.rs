use crate::data::model::{CellValue, RecordTable};
use crate::data::schema::{RAW_CITY, WILLING_TO_RELOCATE, WILLING_TO_TRAVEL};
use crate::error::Result;

use super::keywords::{contains_any, normalize};
use super::FieldTransform;

pub const RELOCATION_REFUSALS: &[&str] = &[
    "не готов к переезду",
    "не готова к переезду",
    "not willing to relocate",
];

pub const TRAVEL_REFUSALS: &[&str] = &[
    "не готов к командировкам",
    "не готова к командировкам",
    "not prepared for business trips",
    "not willing to travel",
];

/// Relocation and business-trip willingness from the location text. Both
/// default to willing unless a refusal phrase is present. Never drops rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityTransform;

impl FieldTransform for CityTransform {
    fn name(&self) -> &'static str {
        "city"
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![RAW_CITY]
    }

    fn produces(&self) -> Vec<&'static str> {
        vec![WILLING_TO_RELOCATE, WILLING_TO_TRAVEL]
    }

    fn apply(&self, mut table: RecordTable) -> Result<RecordTable> {
        let lowered: Vec<String> = table
            .text_values(self.name(), RAW_CITY)?
            .into_iter()
            .map(normalize)
            .collect();

        let relocate = lowered
            .iter()
            .map(|t| CellValue::from(!contains_any(t, RELOCATION_REFUSALS)))
            .collect();
        let travel = lowered
            .iter()
            .map(|t| CellValue::from(!contains_any(t, TRAVEL_REFUSALS)))
            .collect();

        table.push_column(WILLING_TO_RELOCATE, relocate)?;
        table.push_column(WILLING_TO_TRAVEL, travel)?;
        table.drop_column(self.name(), RAW_CITY)?;
        Ok(table)
    }
}
