//! Consumers of the exported feature matrices.
//!
//! Both models are closed-form ridge fits on `ndarray`. A fitted model
//! remembers the feature names it was trained on and refuses to predict on
//! anything else. Models persist as JSON under fixed names in a
//! [`ModelStore`].

pub mod classifier;
pub mod metrics;
pub mod ridge;
pub mod split;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::features::FeatureMatrix;

pub use classifier::RidgeClassifier;
pub use metrics::{classification_report, r2_score, ClassificationReport};
pub use ridge::RidgeRegressor;
pub use split::{stratified_split, train_test_split, Split};

/// Store key of the seniority classifier.
pub const SENIORITY_MODEL: &str = "seniority_model";
/// Store key of the salary regressor.
pub const SALARY_MODEL: &str = "salary_model";

pub(crate) fn check_schema(expected: &[String], features: &FeatureMatrix) -> Result<()> {
    if expected != features.feature_names.as_slice() {
        return Err(PipelineError::SchemaMismatch {
            expected: expected.to_vec(),
            found: features.feature_names.clone(),
        });
    }
    Ok(())
}

/// Directory of named JSON model blobs.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ModelStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn save<M: Serialize>(&self, name: &str, model: &M) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PipelineError::io(&self.dir, e))?;
        let path = self.path(name);
        let json = serde_json::to_string_pretty(model)?;
        std::fs::write(&path, json).map_err(|e| PipelineError::io(&path, e))?;
        log::info!("saved model `{name}` to {}", path.display());
        Ok(path)
    }

    pub fn load<M: DeserializeOwned>(&self, name: &str) -> Result<M> {
        let path = self.path(name);
        let text = std::fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
        let model = serde_json::from_str(&text)?;
        log::info!("loaded model `{name}` from {}", path.display());
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TaskData;
    use ndarray::array;

    #[test]
    fn saved_model_loads_back_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("models"));
        let task = TaskData {
            features: FeatureMatrix {
                feature_names: vec!["age".into()],
                x: array![[20.0], [30.0], [40.0]],
            },
            target_name: "salary".into(),
            y: array![1.0, 2.0, 3.0],
        };
        let model = RidgeRegressor::fit(&task, 1.0).unwrap();

        let path = store.save(SALARY_MODEL, &model).unwrap();
        assert!(path.ends_with("salary_model.json"));
        let loaded: RidgeRegressor = store.load(SALARY_MODEL).unwrap();
        assert_eq!(loaded.feature_names, model.feature_names);
        assert!((loaded.coef[0] - model.coef[0]).abs() < 1e-12);
        assert!((loaded.intercept - model.intercept).abs() < 1e-9);
    }

    #[test]
    fn missing_model_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path());
        let err = store.load::<RidgeRegressor>(SENIORITY_MODEL).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
