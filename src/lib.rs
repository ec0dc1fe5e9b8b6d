//! Resume feature pipeline: turns a raw job-board resume export into numeric
//! feature matrices for a seniority classifier and a salary regressor.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod features;
pub mod model;
pub mod transform;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
