use crate::data::schema::{
    RAW_SCHEDULE, SCHEDULE_FLEXIBLE, SCHEDULE_FULL_DAY, SCHEDULE_REMOTE, SCHEDULE_ROTATION,
    SCHEDULE_SHIFT,
};

use super::keywords::{Concept, MembershipTransform};

pub const SCHEDULE_CONCEPTS: &[Concept] = &[
    Concept {
        column: SCHEDULE_FULL_DAY,
        keywords: &["полный", "full"],
    },
    Concept {
        column: SCHEDULE_REMOTE,
        keywords: &["удал", "remote"],
    },
    Concept {
        column: SCHEDULE_FLEXIBLE,
        keywords: &["гибк", "flexible"],
    },
    Concept {
        column: SCHEDULE_ROTATION,
        keywords: &["вахт", "rotation"],
    },
    Concept {
        column: SCHEDULE_SHIFT,
        keywords: &["смен", "shift"],
    },
];

/// Work-schedule flags: full day, remote, flexible, rotation, shift.
pub fn schedule_transform() -> MembershipTransform {
    MembershipTransform {
        name: "schedule",
        source: RAW_SCHEDULE,
        concepts: SCHEDULE_CONCEPTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RecordTable};
    use crate::transform::FieldTransform;

    #[test]
    fn flags_each_schedule_kind() {
        let values = [
            "гибкий график, полный день, сменный график, удаленная работа",
            "Rotation based work, shift schedule",
            "вахтовый метод",
        ];
        let mut table = RecordTable::new(vec!["a".into(), "b".into(), "c".into()]);
        table
            .push_column(RAW_SCHEDULE, values.iter().map(|v| CellValue::from_raw(v)).collect())
            .unwrap();
        let out = schedule_transform().apply(table).unwrap();

        let row = |i: usize| -> Vec<i64> {
            SCHEDULE_CONCEPTS
                .iter()
                .map(|c| out.column("test", c.column).unwrap().values[i].as_i64().unwrap())
                .collect()
        };
        assert_eq!(row(0), vec![1, 1, 1, 0, 1]);
        assert_eq!(row(1), vec![0, 0, 0, 1, 1]);
        assert_eq!(row(2), vec![0, 0, 0, 1, 0]);
        assert_eq!(out.column_names().len(), 5);
    }
}
