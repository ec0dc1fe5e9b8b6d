use crate::data::filter::retain_parsed;
use crate::data::model::{CellValue, RecordTable};
use crate::data::schema::{EXPERIENCE_MONTHS, RAW_EXPERIENCE};
use crate::error::Result;

use super::keywords::{contains_any, digit_runs, normalize};
use super::FieldTransform;

pub const MONTH_KEYWORDS: &[&str] = &["мес", "month"];

/// Total experience in months from the first line of the experience text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExperienceTransform;

/// Parse "Опыт работы 3 года 4 месяца" style text.
///
/// Two numbers are years and months; a single number is months when the
/// text mentions months and years otherwise. Anything else is `None`.
pub fn parse_experience_months(text: &str) -> Option<i64> {
    let first_line = text.split('\n').next().unwrap_or("");
    let numbers: Vec<i64> = digit_runs(first_line)
        .into_iter()
        .map(str::parse::<i64>)
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    match numbers.as_slice() {
        [years, months] => years.checked_mul(12)?.checked_add(*months),
        [single] if contains_any(&normalize(Some(first_line)), MONTH_KEYWORDS) => Some(*single),
        [years] => years.checked_mul(12),
        _ => None,
    }
}

impl FieldTransform for ExperienceTransform {
    fn name(&self) -> &'static str {
        "experience"
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![RAW_EXPERIENCE]
    }

    fn produces(&self) -> Vec<&'static str> {
        vec![EXPERIENCE_MONTHS]
    }

    fn apply(&self, table: RecordTable) -> Result<RecordTable> {
        let parsed: Vec<Option<i64>> = table
            .text_values(self.name(), RAW_EXPERIENCE)?
            .into_iter()
            .map(|text| text.and_then(parse_experience_months))
            .collect();

        let (mut table, months) = retain_parsed(table, self.name(), parsed);

        table.push_column(
            EXPERIENCE_MONTHS,
            months.into_iter().map(CellValue::Integer).collect(),
        )?;
        table.drop_column(self.name(), RAW_EXPERIENCE)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_and_months() {
        assert_eq!(parse_experience_months("3 года 4 месяца"), Some(40));
        assert_eq!(
            parse_experience_months("Опыт работы 16 лет 10 месяцев\nАвгуст 2010 — по настоящее время"),
            Some(202)
        );
        assert_eq!(parse_experience_months("Work experience 2 years 1 month"), Some(25));
    }

    #[test]
    fn single_number_depends_on_month_keyword() {
        assert_eq!(parse_experience_months("5 месяцев"), Some(5));
        assert_eq!(parse_experience_months("Work experience 7 Months"), Some(7));
        assert_eq!(parse_experience_months("Опыт работы 6 лет"), Some(72));
    }

    #[test]
    fn zero_or_three_numbers_are_rejected() {
        assert_eq!(parse_experience_months("Опыт работы"), None);
        assert_eq!(parse_experience_months("1 год 2 месяца 3 дня"), None);
        assert_eq!(parse_experience_months("\n3 года 4 месяца"), None);
    }

    #[test]
    fn drops_unparseable_rows() {
        let raw = ["5 месяцев", "1 2 3", "Опыт работы 2 года"];
        let mut table = RecordTable::new(vec!["a".into(), "b".into(), "c".into()]);
        table
            .push_column(RAW_EXPERIENCE, raw.iter().map(|v| CellValue::from_raw(v)).collect())
            .unwrap();

        let out = ExperienceTransform.apply(table).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.ids(), &["a".to_string(), "c".to_string()]);
        assert_eq!(
            out.column("test", EXPERIENCE_MONTHS).unwrap().values,
            vec![CellValue::Integer(5), CellValue::Integer(24)]
        );
        assert!(!out.has_column(RAW_EXPERIENCE));
    }
}
