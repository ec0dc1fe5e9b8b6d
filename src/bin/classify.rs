//! Train the seniority classifier on a raw export.
//!
//! ```bash
//! classify hh.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use resume_pipeline::app::{prepare_dataset, train_classifier};
use resume_pipeline::PipelineConfig;

/// Fit and persist the seniority classifier.
#[derive(Parser, Debug)]
#[command(name = "classify")]
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
    let report = train_classifier(&table, &config).context("failed to train classifier")?;
    println!("{report}");
    Ok(())
}
