use crate::data::schema::{
    EMPLOYMENT_FULL_TIME, EMPLOYMENT_INTERNSHIP, EMPLOYMENT_PART_TIME, EMPLOYMENT_PROJECT,
    EMPLOYMENT_VOLUNTEER, RAW_EMPLOYMENT,
};

use super::keywords::{Concept, MembershipTransform};

pub const EMPLOYMENT_CONCEPTS: &[Concept] = &[
    Concept {
        column: EMPLOYMENT_FULL_TIME,
        keywords: &["полная", "full"],
    },
    Concept {
        column: EMPLOYMENT_PART_TIME,
        keywords: &["частичная", "part"],
    },
    Concept {
        column: EMPLOYMENT_PROJECT,
        keywords: &["проект", "project"],
    },
    Concept {
        column: EMPLOYMENT_VOLUNTEER,
        keywords: &["волонтер", "volunteer"],
    },
    Concept {
        column: EMPLOYMENT_INTERNSHIP,
        keywords: &["стаж", "placement", "internship"],
    },
];

/// Employment-type flags: full-time, part-time, project, volunteer, internship.
pub fn employment_transform() -> MembershipTransform {
    MembershipTransform {
        name: "employment",
        source: RAW_EMPLOYMENT,
        concepts: EMPLOYMENT_CONCEPTS,
    }
}
