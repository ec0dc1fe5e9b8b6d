use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Currency table
// ---------------------------------------------------------------------------

/// Multiplicative conversion rates into the reference currency.
///
/// Keys are the currency labels exactly as they trail the salary text,
/// including locale variants joined with U+00A0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyTable {
    pub version: u32,
    pub reference: String,
    pub rates: BTreeMap<String, f64>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let rates = [
            ("AZN", 45.0),
            ("BYN", 27.0),
            ("EUR", 91.0),
            ("KGS", 0.88),
            ("KZT", 0.16),
            ("RUB", 1.0),
            ("UAH", 1.79),
            ("USD", 77.0),
            ("бел.\u{a0}руб.", 26.81),
            ("грн.", 1.79),
            ("руб.", 1.0),
        ]
        .into_iter()
        .map(|(label, rate)| (label.to_string(), rate))
        .collect();

        CurrencyTable {
            version: 1,
            reference: "RUB".to_string(),
            rates,
        }
    }
}

impl CurrencyTable {
    /// Rate for a label, or `None` for an unknown currency.
    pub fn rate(&self, label: &str) -> Option<f64> {
        self.rates.get(label).copied()
    }
}

// ---------------------------------------------------------------------------
// Sub-sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Held-out share for the seniority classifier.
    pub classification_test_fraction: f64,
    /// Held-out share for the salary regressor.
    pub regression_test_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            classification_test_fraction: 0.25,
            regression_test_fraction: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub enabled: bool,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            enabled: true,
            file_name: "bar_chart.png".to_string(),
            width: 800,
            height: 500,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Everything the binaries can tune. Loaded from JSON; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where the feature/target arrays and the chart are written.
    pub output_dir: PathBuf,
    /// Where trained models are persisted.
    pub model_dir: PathBuf,
    /// Field separator override for the raw export.
    pub delimiter: Option<char>,
    pub currency: CurrencyTable,
    pub split: SplitConfig,
    pub ridge_alpha: f64,
    pub chart: ChartConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            output_dir: PathBuf::from("."),
            model_dir: PathBuf::from("resources"),
            delimiter: None,
            currency: CurrencyTable::default(),
            split: SplitConfig::default(),
            ridge_alpha: 1.0,
            chart: ChartConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// `from_file` when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                log::info!("loading config from {}", p.display());
                Self::from_file(p)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.ridge_alpha > 0.0 && self.ridge_alpha.is_finite()) {
            return Err(PipelineError::Config(format!(
                "ridge_alpha must be positive, got {}",
                self.ridge_alpha
            )));
        }
        for (name, fraction) in [
            ("classification_test_fraction", self.split.classification_test_fraction),
            ("regression_test_fraction", self.split.regression_test_fraction),
        ] {
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(PipelineError::Config(format!(
                    "{name} must lie in (0, 1), got {fraction}"
                )));
            }
        }
        if let Some((label, rate)) = self
            .currency
            .rates
            .iter()
            .find(|(_, r)| !(r.is_finite() && **r >= 0.0))
        {
            return Err(PipelineError::Config(format!(
                "currency `{label}` has invalid rate {rate}"
            )));
        }
        if let Some(d) = self.delimiter {
            if !d.is_ascii() {
                return Err(PipelineError::Config(format!(
                    "delimiter must be a single ASCII character, got {d:?}"
                )));
            }
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader wants.
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter.and_then(|d| u8::try_from(d).ok())
    }
}
