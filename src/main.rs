//! Dataset-processing entry point.
//!
//! ```bash
//! resume-pipeline hh.csv
//! RUST_LOG=debug resume-pipeline hh.csv --config pipeline.json
//! ```
//!
//! Runs the transform chain, draws the seniority chart and writes the
//! classification and regression arrays into the configured output
//! directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use resume_pipeline::app::{export_training_arrays, prepare_dataset};
use resume_pipeline::chart::save_bar_chart;
use resume_pipeline::export::preview;
use resume_pipeline::PipelineConfig;

/// Normalize a resume export into feature matrices.
#[derive(Parser, Debug)]
#[command(name = "resume-pipeline")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the hh.csv export.
    path: Option<PathBuf>,

    /// JSON config file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let Some(path) = args.path else {
        println!("Enter the path to hh.csv dataset");
        Args::command().print_help()?;
        return Ok(());
    };

    let config = PipelineConfig::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    let table = prepare_dataset(&path, &config)
        .with_context(|| format!("failed to process {}", path.display()))?;

    if config.chart.enabled {
        save_bar_chart(&table, &config.output_dir, &config.chart)
            .context("failed to draw seniority chart")?;
    }

    let arrays = export_training_arrays(&table, &config).context("failed to write arrays")?;
    for (x, y) in [&arrays.classification, &arrays.regression] {
        println!("{} {}", x.display(), y.display());
    }
    if log::log_enabled!(log::Level::Debug) {
        let (x_cls, _) = &arrays.classification;
        log::debug!("first rows of {}:\n{}", x_cls.display(), preview(x_cls, 5)?);
    }
    Ok(())
}
