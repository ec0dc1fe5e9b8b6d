use crate::config::CurrencyTable;
use crate::data::filter::retain_parsed;
use crate::data::model::{CellValue, RecordTable};
use crate::data::schema::{RAW_SALARY, SALARY};
use crate::error::Result;

use super::FieldTransform;

/// Thousands separator inside salary amounts.
const THOUSANDS_SEPARATOR: char = '\u{a0}';

/// Desired salary converted into the reference currency.
///
/// Rows whose amount does not parse or whose currency label is missing from
/// the table are dropped.
#[derive(Debug, Clone)]
pub struct IncomeTransform {
    currency: CurrencyTable,
}

impl IncomeTransform {
    pub fn new(currency: CurrencyTable) -> Self {
        IncomeTransform { currency }
    }

    /// Parse "60\u{a0}000 руб." into an amount in the reference currency.
    pub fn parse_salary(&self, text: &str) -> Option<f64> {
        let amount: f64 = text
            .split(' ')
            .next()?
            .chars()
            .filter(|c| *c != THOUSANDS_SEPARATOR)
            .collect::<String>()
            .parse()
            .ok()?;
        let label = text.split(' ').last()?;
        let rate = self.currency.rate(label)?;
        Some(amount * rate)
    }
}

impl FieldTransform for IncomeTransform {
    fn name(&self) -> &'static str {
        "income"
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![RAW_SALARY]
    }

    fn produces(&self) -> Vec<&'static str> {
        vec![SALARY]
    }

    fn apply(&self, table: RecordTable) -> Result<RecordTable> {
        let parsed: Vec<Option<f64>> = table
            .text_values(self.name(), RAW_SALARY)?
            .into_iter()
            .map(|text| text.and_then(|t| self.parse_salary(t)))
            .collect();

        let (mut table, salaries) = retain_parsed(table, self.name(), parsed);

        table.push_column(SALARY, salaries.into_iter().map(CellValue::Float).collect())?;
        table.drop_column(self.name(), RAW_SALARY)?;
        Ok(table)
    }
}
