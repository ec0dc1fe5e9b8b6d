//! Train the salary regressor on the exported regression pair, then predict
//! salaries for a feature file.
//!
//! ```bash
//! resume-pipeline hh.csv      # writes X_data.parquet / y_data.parquet
//! regress X_data.parquet
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use resume_pipeline::app::{predict_salaries, train_regressor};
use resume_pipeline::PipelineConfig;

/// Fit, persist and apply the salary model.
#[derive(Parser, Debug)]
#[command(name = "regress")]
#[command(version, about, long_about = None)]
struct Args {
    /// Feature file to predict, e.g. X_data.parquet.
    path: Option<PathBuf>,

    /// JSON config file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let Some(path) = args.path else {
        println!("Enter the path to X_data.parquet");
        Args::command().print_help()?;
        return Ok(());
    };

    let config = PipelineConfig::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    train_regressor(&config).context("failed to train salary model")?;

    let predictions = predict_salaries(&path, &config)
        .with_context(|| format!("failed to predict {}", path.display()))?;
    for value in predictions {
        println!("{value:.2}");
    }
    Ok(())
}
