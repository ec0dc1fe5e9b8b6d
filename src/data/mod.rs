//! Data layer for the raw resume export.
//!
//! `loader` reads `.csv`/`.tsv` files into a column-oriented
//! [`model::RecordTable`], keeping the first source column as row ids.
//! `schema` names the raw and derived columns. `filter` is the shared
//! row-removal policy of the parsing transforms:
//!
//! ```text
//! hh.csv ──loader──▶ RecordTable ──parse──▶ Vec<Option<T>>
//!                                              │
//!                          filter::retain_parsed
//!                                              ▼
//!                          (filtered RecordTable, Vec<T>)
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
