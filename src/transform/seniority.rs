use std::fmt;

use crate::data::model::{CellValue, RecordTable};
use crate::data::schema::{EXPERIENCE_MONTHS, RAW_LAST_TITLE, SENIORITY};
use crate::error::{PipelineError, Result};

use super::keywords::{contains_any, normalize};
use super::FieldTransform;

pub const SENIOR_TITLE_KEYWORDS: &[&str] = &[
    "старш", "ведущ", "эксперт", "директор", "senior", "lead", "expert", "director",
];

pub const MIDDLE_TITLE_KEYWORDS: &[&str] = &["middle", "мидл"];

/// Months of experience from which a candidate counts as senior.
pub const SENIOR_MONTHS: i64 = 60;
/// Months of experience from which a candidate counts as middle.
pub const MIDDLE_MONTHS: i64 = 24;

/// Ordinal candidate level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seniority {
    Junior = 1,
    Middle = 2,
    Senior = 3,
}

impl Seniority {
    pub const ALL: [Seniority; 3] = [Seniority::Junior, Seniority::Middle, Seniority::Senior];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Seniority::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Middle => "middle",
            Seniority::Senior => "senior",
        }
    }

    /// First matching rule wins: senior by experience or title, then middle
    /// by experience or title, then junior.
    pub fn derive(experience_months: i64, title: &str) -> Self {
        let title = normalize(Some(title));
        if experience_months >= SENIOR_MONTHS || contains_any(&title, SENIOR_TITLE_KEYWORDS) {
            Seniority::Senior
        } else if (MIDDLE_MONTHS..SENIOR_MONTHS).contains(&experience_months)
            || contains_any(&title, MIDDLE_TITLE_KEYWORDS)
        {
            Seniority::Middle
        } else {
            Seniority::Junior
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Derives the seniority label from experience and the last job title, then
/// drops the title. Must run after the experience transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeniorityLabeler;

impl FieldTransform for SeniorityLabeler {
    fn name(&self) -> &'static str {
        "seniority"
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![RAW_LAST_TITLE]
    }

    fn reads(&self) -> Vec<&'static str> {
        vec![EXPERIENCE_MONTHS]
    }

    fn produces(&self) -> Vec<&'static str> {
        vec![SENIORITY]
    }

    fn apply(&self, mut table: RecordTable) -> Result<RecordTable> {
        let experience = table.column(self.name(), EXPERIENCE_MONTHS)?;
        let months: Vec<i64> = experience
            .values
            .iter()
            .enumerate()
            .map(|(row, v)| {
                v.as_i64().ok_or_else(|| PipelineError::NonNumeric {
                    column: EXPERIENCE_MONTHS.to_string(),
                    row,
                    value: v.to_string(),
                })
            })
            .collect::<Result<_>>()?;

        let labels: Vec<CellValue> = table
            .text_values(self.name(), RAW_LAST_TITLE)?
            .into_iter()
            .zip(months)
            .map(|(title, m)| CellValue::Integer(Seniority::derive(m, title.unwrap_or("")).code()))
            .collect();

        table.push_column(SENIORITY, labels)?;
        table.drop_column(self.name(), RAW_LAST_TITLE)?;
        Ok(table)
    }
}
