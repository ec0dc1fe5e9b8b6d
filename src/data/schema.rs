//! Column names: the raw headers of the hh.ru resume export and the derived
//! feature columns the transforms append.
//!
//! Raw headers are spelled exactly as they appear in the export, typos
//! included.

// -- Raw source columns --

pub const RAW_SEX_AGE: &str = "Пол, возраст";
pub const RAW_SALARY: &str = "ЗП";
pub const RAW_DESIRED_POSITION: &str = "Ищет работу на должность:";
pub const RAW_CITY: &str = "Город";
pub const RAW_EMPLOYMENT: &str = "Занятость";
pub const RAW_SCHEDULE: &str = "График";
pub const RAW_EXPERIENCE: &str = "Опыт (двойное нажатие для полной версии)";
pub const RAW_LAST_WORKPLACE: &str = "Последенее/нынешнее место работы";
pub const RAW_LAST_TITLE: &str = "Последеняя/нынешняя должность";
pub const RAW_EDUCATION: &str = "Образование и ВУЗ";
pub const RAW_RESUME_UPDATED: &str = "Обновление резюме";
pub const RAW_CAR: &str = "Авто";

/// Raw columns in export order (after the identifier column).
pub const RAW_COLUMNS: [&str; 12] = [
    RAW_SEX_AGE,
    RAW_SALARY,
    RAW_DESIRED_POSITION,
    RAW_CITY,
    RAW_EMPLOYMENT,
    RAW_SCHEDULE,
    RAW_EXPERIENCE,
    RAW_LAST_WORKPLACE,
    RAW_LAST_TITLE,
    RAW_EDUCATION,
    RAW_RESUME_UPDATED,
    RAW_CAR,
];

// -- Derived feature columns --

pub const SEX: &str = "sex";
pub const AGE: &str = "age";

pub const EMPLOYMENT_FULL_TIME: &str = "employment_full_time";
pub const EMPLOYMENT_PART_TIME: &str = "employment_part_time";
pub const EMPLOYMENT_PROJECT: &str = "employment_project";
pub const EMPLOYMENT_VOLUNTEER: &str = "employment_volunteer";
pub const EMPLOYMENT_INTERNSHIP: &str = "employment_internship";

pub const EXPERIENCE_MONTHS: &str = "experience_months";
pub const EDUCATION_LEVEL: &str = "education_level";
pub const SALARY: &str = "salary";

pub const SCHEDULE_FULL_DAY: &str = "schedule_full_day";
pub const SCHEDULE_REMOTE: &str = "schedule_remote";
pub const SCHEDULE_FLEXIBLE: &str = "schedule_flexible";
pub const SCHEDULE_ROTATION: &str = "schedule_rotation";
pub const SCHEDULE_SHIFT: &str = "schedule_shift";

pub const SENIORITY: &str = "seniority";

pub const WILLING_TO_RELOCATE: &str = "willing_to_relocate";
pub const WILLING_TO_TRAVEL: &str = "willing_to_travel";
