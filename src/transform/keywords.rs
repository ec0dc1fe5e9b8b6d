//! Declarative keyword rules for free-text fields.
//!
//! Every rule is a set of trigger substrings (Russian and English stems
//! together) matched case-insensitively against the lowercased text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::model::{CellValue, RecordTable};
use crate::error::Result;

use super::FieldTransform;

/// One 0/1 feature column and the substrings that switch it on.
#[derive(Debug, Clone, Copy)]
pub struct Concept {
    pub column: &'static str,
    pub keywords: &'static [&'static str],
}

/// Lowercase a cell for matching. `Null` reads as empty text.
pub fn normalize(text: Option<&str>) -> String {
    text.unwrap_or("").to_lowercase()
}

/// Whether `lowered` (already lowercased) contains any of `keywords`.
pub fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|k| lowered.contains(k.to_lowercase().as_str()))
}

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Every contiguous ASCII digit run in `text`, in order.
pub fn digit_runs(text: &str) -> Vec<&str> {
    DIGIT_RUN.find_iter(text).map(|m| m.as_str()).collect()
}

// ---------------------------------------------------------------------------
// MembershipTransform – independent multi-concept flags
// ---------------------------------------------------------------------------

/// Turns one free-text column into one 0/1 column per concept. Concepts are
/// tested independently, so several can be set for the same row. Never drops
/// rows.
#[derive(Debug, Clone)]
pub struct MembershipTransform {
    pub name: &'static str,
    pub source: &'static str,
    pub concepts: &'static [Concept],
}

impl FieldTransform for MembershipTransform {
    fn name(&self) -> &'static str {
        self.name
    }

    fn consumes(&self) -> Vec<&'static str> {
        vec![self.source]
    }

    fn produces(&self) -> Vec<&'static str> {
        self.concepts.iter().map(|c| c.column).collect()
    }

    fn apply(&self, mut table: RecordTable) -> Result<RecordTable> {
        let lowered: Vec<String> = table
            .text_values(self.name, self.source)?
            .into_iter()
            .map(normalize)
            .collect();

        for concept in self.concepts {
            let flags = lowered
                .iter()
                .map(|text| CellValue::from(contains_any(text, concept.keywords)))
                .collect();
            table.push_column(concept.column, flags)?;
        }

        table.drop_column(self.name, self.source)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_in_both_scripts() {
        let text = normalize(Some("Полная занятость, PART time"));
        assert!(contains_any(&text, &["полная", "full"]));
        assert!(contains_any(&text, &["частичная", "Part"]));
        assert!(!contains_any(&text, &["волонтер", "volunteer"]));
    }

    #[test]
    fn digit_runs_skip_separators() {
        assert_eq!(digit_runs("3 года 4 месяца"), vec!["3", "4"]);
        assert_eq!(digit_runs("42\u{a0}года"), vec!["42"]);
        assert!(digit_runs("нет").is_empty());
    }

    #[test]
    fn null_reads_as_empty() {
        assert_eq!(normalize(None), "");
        assert!(!contains_any(&normalize(None), &["x"]));
    }
}
