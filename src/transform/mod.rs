//! Feature-normalization transforms and the fixed pipeline that chains them.
//!
//! ```text
//!  RecordTable (raw export columns)
//!        │
//!        ▼
//!  age_sex → employment → experience → education → income
//!        → schedule → seniority → city → prune
//!        │
//!        ▼
//!  RecordTable (numeric feature columns only)
//! ```
//!
//! Each stage declares the columns it consumes, reads and produces, and
//! `Pipeline::new` checks the chain against those declarations before any
//! data flows through it.

pub mod age_sex;
pub mod city;
pub mod education;
pub mod employment;
pub mod experience;
pub mod income;
pub mod keywords;
pub mod prune;
pub mod schedule;
pub mod seniority;

use std::collections::BTreeSet;

use crate::config::PipelineConfig;
use crate::data::model::RecordTable;
use crate::data::schema::RAW_COLUMNS;
use crate::error::{PipelineError, Result};

pub use age_sex::AgeSexTransform;
pub use city::CityTransform;
pub use education::EducationTransform;
pub use employment::employment_transform;
pub use experience::ExperienceTransform;
pub use income::IncomeTransform;
pub use keywords::{Concept, MembershipTransform};
pub use prune::PruneUnusedColumns;
pub use schedule::schedule_transform;
pub use seniority::{Seniority, SeniorityLabeler};

// ---------------------------------------------------------------------------
// FieldTransform – one stage of the chain
// ---------------------------------------------------------------------------

/// A single-responsibility table → table stage.
///
/// `apply` removes every `consumes` column, leaves `reads` columns in place,
/// and appends the `produces` columns in declaration order. A filtering
/// stage may drop rows whose source value fails to parse.
pub trait FieldTransform {
    fn name(&self) -> &'static str;

    /// Source columns removed by this stage.
    fn consumes(&self) -> Vec<&'static str>;

    /// Columns read but left in place.
    fn reads(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Columns appended by this stage.
    fn produces(&self) -> Vec<&'static str>;

    fn apply(&self, table: RecordTable) -> Result<RecordTable>;
}

// ---------------------------------------------------------------------------
// Pipeline – fixed, validated ordering of stages
// ---------------------------------------------------------------------------

pub struct Pipeline {
    source_columns: Vec<String>,
    stages: Vec<Box<dyn FieldTransform>>,
    output_columns: Vec<String>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .field("output_columns", &self.output_columns)
            .finish()
    }
}

impl Pipeline {
    /// Compose `stages` over a table that starts with `source_columns`.
    ///
    /// Fails when a stage consumes or reads a column no earlier stage (or
    /// the source) provides, or produces a column that already exists.
    pub fn new(source_columns: &[&str], stages: Vec<Box<dyn FieldTransform>>) -> Result<Self> {
        let mut columns: Vec<String> = source_columns.iter().map(|c| c.to_string()).collect();

        let mut unique = BTreeSet::new();
        if let Some(dup) = columns.iter().find(|c| !unique.insert(c.as_str())) {
            return Err(PipelineError::Composition(format!(
                "source column `{dup}` declared twice"
            )));
        }

        for stage in &stages {
            for needed in stage.consumes().iter().chain(stage.reads().iter()) {
                if !columns.iter().any(|c| c == needed) {
                    return Err(PipelineError::Composition(format!(
                        "stage `{}` needs column `{needed}` but no earlier stage provides it",
                        stage.name()
                    )));
                }
            }
            let consumed = stage.consumes();
            columns.retain(|c| !consumed.contains(&c.as_str()));
            for produced in stage.produces() {
                if columns.iter().any(|c| c == produced) {
                    return Err(PipelineError::Composition(format!(
                        "stage `{}` produces column `{produced}` which already exists",
                        stage.name()
                    )));
                }
                columns.push(produced.to_string());
            }
        }

        Ok(Pipeline {
            source_columns: source_columns.iter().map(|c| c.to_string()).collect(),
            stages,
            output_columns: columns,
        })
    }

    /// The standard resume chain over the raw export columns.
    pub fn standard(config: &PipelineConfig) -> Result<Self> {
        let stages: Vec<Box<dyn FieldTransform>> = vec![
            Box::new(AgeSexTransform),
            Box::new(employment_transform()),
            Box::new(ExperienceTransform),
            Box::new(EducationTransform),
            Box::new(IncomeTransform::new(config.currency.clone())),
            Box::new(schedule_transform()),
            Box::new(SeniorityLabeler),
            Box::new(CityTransform),
            Box::new(PruneUnusedColumns),
        ];
        Pipeline::new(&RAW_COLUMNS, stages)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Columns of the final table, in order.
    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }

    /// Run every stage in order. The input must carry all declared source
    /// columns; this is checked before the first stage runs.
    pub fn run(&self, table: RecordTable) -> Result<RecordTable> {
        if let Some(missing) = self.source_columns.iter().find(|c| !table.has_column(c)) {
            return Err(PipelineError::missing_column("load", missing));
        }

        let mut table = table;
        for stage in &self.stages {
            let before = table.len();
            table = stage.apply(table)?;
            log::info!(
                "stage {:<12} rows {before} -> {}",
                stage.name(),
                table.len()
            );
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::schema::*;

    fn raw_row() -> Vec<(&'static str, &'static str)> {
        vec![
            (RAW_SEX_AGE, "Мужчина ,  39 лет , родился 27 ноября 1979"),
            (RAW_SALARY, "29000 руб."),
            (RAW_DESIRED_POSITION, "Системный администратор"),
            (RAW_CITY, "Советск (Калининградская область) , не готов к переезду , готов к командировкам"),
            (RAW_EMPLOYMENT, "частичная занятость, проектная работа, полная занятость"),
            (RAW_SCHEDULE, "гибкий график, полный день, сменный график, удаленная работа"),
            (RAW_EXPERIENCE, "Опыт работы 16 лет 10 месяцев\nАвгуст 2010 — по настоящее время"),
            (RAW_LAST_WORKPLACE, "МАОУ \"СОШ № 1 г.Немана\""),
            (RAW_LAST_TITLE, "Системный администратор"),
            (RAW_EDUCATION, "Неоконченное высшее образование 2000"),
            (RAW_RESUME_UPDATED, "16.04.2019 15:59"),
            (RAW_CAR, "Имеется собственный автомобиль"),
        ]
    }

    fn raw_table() -> RecordTable {
        let mut table = RecordTable::new(vec!["0".to_string()]);
        for (name, value) in raw_row() {
            table.push_column(name, vec![CellValue::from_raw(value)]).unwrap();
        }
        table
    }

    #[test]
    fn standard_chain_output_schema() {
        let pipeline = Pipeline::standard(&PipelineConfig::default()).unwrap();
        assert_eq!(
            pipeline.output_columns(),
            &[
                SEX,
                AGE,
                EMPLOYMENT_FULL_TIME,
                EMPLOYMENT_PART_TIME,
                EMPLOYMENT_PROJECT,
                EMPLOYMENT_VOLUNTEER,
                EMPLOYMENT_INTERNSHIP,
                EXPERIENCE_MONTHS,
                EDUCATION_LEVEL,
                SALARY,
                SCHEDULE_FULL_DAY,
                SCHEDULE_REMOTE,
                SCHEDULE_FLEXIBLE,
                SCHEDULE_ROTATION,
                SCHEDULE_SHIFT,
                SENIORITY,
                WILLING_TO_RELOCATE,
                WILLING_TO_TRAVEL,
            ]
        );
    }

    #[test]
    fn run_matches_declared_schema() {
        let pipeline = Pipeline::standard(&PipelineConfig::default()).unwrap();
        let out = pipeline.run(raw_table()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.column_names(), pipeline.output_columns());

        let get = |name: &str| out.column("test", name).unwrap().values[0].clone();
        assert_eq!(get(SEX), CellValue::Integer(1));
        assert_eq!(get(AGE), CellValue::Integer(39));
        assert_eq!(get(EXPERIENCE_MONTHS), CellValue::Integer(16 * 12 + 10));
        assert_eq!(get(SALARY), CellValue::Float(29000.0));
        assert_eq!(get(SENIORITY), CellValue::Integer(3));
        assert_eq!(get(WILLING_TO_RELOCATE), CellValue::Integer(0));
        assert_eq!(get(WILLING_TO_TRAVEL), CellValue::Integer(1));
    }

    #[test]
    fn label_before_experience_is_rejected_at_composition() {
        let stages: Vec<Box<dyn FieldTransform>> =
            vec![Box::new(SeniorityLabeler), Box::new(ExperienceTransform)];
        let err = Pipeline::new(&RAW_COLUMNS, stages).unwrap_err();
        assert!(matches!(err, PipelineError::Composition(msg) if msg.contains(EXPERIENCE_MONTHS)));
    }

    #[test]
    fn title_consumed_twice_is_rejected_at_composition() {
        let stages: Vec<Box<dyn FieldTransform>> = vec![
            Box::new(ExperienceTransform),
            Box::new(SeniorityLabeler),
            Box::new(SeniorityLabeler),
        ];
        let err = Pipeline::new(&RAW_COLUMNS, stages).unwrap_err();
        assert!(matches!(err, PipelineError::Composition(msg) if msg.contains(RAW_LAST_TITLE)));
    }

    #[test]
    fn missing_source_column_aborts_before_any_stage() {
        let pipeline = Pipeline::standard(&PipelineConfig::default()).unwrap();
        let mut table = raw_table();
        table.drop_column("test", RAW_CITY).unwrap();
        let err = pipeline.run(table).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { column, .. } if column == RAW_CITY));
    }
}
