//! Write a deterministic synthetic resume export for local runs.
//!
//! ```bash
//! generate_sample            # 200 rows to hh.csv
//! generate_sample 1000 data/hh.csv
//! ```

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use resume_pipeline::data::schema::RAW_COLUMNS;

const CITIES: &[&str] = &["Москва", "Санкт-Петербург", "Казань", "Новосибирск", "Минск", "Алматы"];

const RELOCATION: &[&str] = &[
    "не готов к переезду",
    "готов к переезду",
    "не готова к переезду",
    "хочу переехать",
];

const TRIPS: &[&str] = &[
    "не готов к командировкам",
    "готов к командировкам",
    "готова к редким командировкам",
    "не готова к командировкам",
];

const EMPLOYMENT: &[&str] = &[
    "полная занятость",
    "частичная занятость, полная занятость",
    "проектная работа, частичная занятость",
    "стажировка",
    "full time, part time",
    "волонтерство",
];

const SCHEDULE: &[&str] = &[
    "полный день",
    "удаленная работа",
    "гибкий график, удаленная работа",
    "сменный график",
    "вахтовый метод",
    "full day, flexible schedule",
];

const TITLES: &[&str] = &[
    "Программист",
    "Старший менеджер",
    "Ведущий инженер",
    "Бухгалтер",
    "Middle Python developer",
    "Senior Java developer",
    "Оператор call-центра",
    "Team Lead",
];

const EDUCATION: &[&str] = &[
    "Высшее образование 2010",
    "Неоконченное высшее образование 2018",
    "Среднее специальное образование 2005",
    "Среднее образование 2001",
    "Higher education 2012",
];

const CURRENCIES: &[(&str, f64)] = &[("руб.", 1.0), ("USD", 77.0), ("грн.", 1.79), ("KZT", 0.16)];

fn sex_age(rng: &mut StdRng) -> String {
    let female = rng.gen_bool(0.4);
    let age: u32 = rng.gen_range(18..65);
    let (sex, suffix) = if female {
        ("Женщина", "родилась")
    } else {
        ("Мужчина", "родился")
    };
    format!("{sex} ,  {age} лет , {suffix} {} года", 2019 - age)
}

fn salary(rng: &mut StdRng) -> String {
    let &(label, rate) = CURRENCIES.choose(rng).unwrap_or(&CURRENCIES[0]);
    let rub: u32 = rng.gen_range(20..300) * 1000;
    let amount = (rub as f64 / rate).round() as u64;
    format!("{amount} {label}")
}

fn experience(rng: &mut StdRng) -> String {
    let years: u32 = rng.gen_range(0..25);
    let months: u32 = rng.gen_range(1..12);
    let first = if years == 0 {
        format!("Опыт работы {months} месяцев")
    } else {
        format!("Опыт работы {years} лет {months} месяцев")
    };
    format!("{first}\nЯнварь {} — по настоящее время", 2019 - years.min(10))
}

fn city(rng: &mut StdRng) -> String {
    format!(
        "{} , {} , {}",
        CITIES.choose(rng).unwrap_or(&CITIES[0]),
        RELOCATION.choose(rng).unwrap_or(&RELOCATION[0]),
        TRIPS.choose(rng).unwrap_or(&TRIPS[0])
    )
}

fn pick(rng: &mut StdRng, pool: &[&str]) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

/// One row per filtering stage that the pipeline is expected to drop.
fn rejected_row(kind: usize, rng: &mut StdRng) -> [String; 12] {
    let mut row = valid_row(rng);
    match kind % 4 {
        0 => row[0] = "Мужчина".to_string(),
        1 => row[1] = "50000 XYZ".to_string(),
        2 => row[6] = "Нет опыта работы".to_string(),
        _ => row[9] = "Курсы повышения квалификации".to_string(),
    }
    row
}

fn valid_row(rng: &mut StdRng) -> [String; 12] {
    [
        sex_age(rng),
        salary(rng),
        pick(rng, TITLES),
        city(rng),
        pick(rng, EMPLOYMENT),
        pick(rng, SCHEDULE),
        experience(rng),
        "ООО \"Ромашка\"".to_string(),
        pick(rng, TITLES),
        pick(rng, EDUCATION),
        "16.04.2019 15:59".to_string(),
        if rng.gen_bool(0.3) {
            "Имеется собственный автомобиль".to_string()
        } else {
            "Не указано".to_string()
        },
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count `{n}`"))?,
        None => 200,
    };
    let output_path = args.next().unwrap_or_else(|| "hh.csv".to_string());

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("failed to create {output_path}"))?;

    let mut header = vec![""];
    header.extend(RAW_COLUMNS);
    writer.write_record(&header)?;

    let mut rejected = 0;
    for id in 0..rows {
        // Every tenth row fails one of the filtering stages.
        let row = if id % 10 == 9 {
            rejected += 1;
            rejected_row(rejected, &mut rng)
        } else {
            valid_row(&mut rng)
        };
        let id = id.to_string();
        writer.write_record(std::iter::once(id.as_str()).chain(row.iter().map(String::as_str)))?;
    }
    writer.flush()?;

    println!("Wrote {rows} resumes ({rejected} meant to be dropped) to {output_path}");
    Ok(())
}
