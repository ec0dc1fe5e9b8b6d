use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::data::loader::load_file;
use crate::data::model::RecordTable;
use crate::data::schema::{SALARY, SENIORITY};
use crate::error::Result;
use crate::export::{read_features, read_task, write_task, CLASSIFICATION_FILES, REGRESSION_FILES};
use crate::features::split_target;
use crate::model::classifier::class_labels;
use crate::model::{
    classification_report, r2_score, stratified_split, train_test_split, ClassificationReport,
    ModelStore, RidgeClassifier, RidgeRegressor, SALARY_MODEL, SENIORITY_MODEL,
};
use crate::transform::{Pipeline, Seniority};

// ---------------------------------------------------------------------------
// Dataset preparation
// ---------------------------------------------------------------------------

/// Load the raw export and run the standard transform chain over it.
pub fn prepare_dataset(path: &Path, config: &PipelineConfig) -> Result<RecordTable> {
    let table = load_file(path, config.delimiter_byte())?;
    let pipeline = Pipeline::standard(config)?;
    pipeline.run(table)
}

/// Paths of the four arrays written by [`export_training_arrays`].
#[derive(Debug, Clone)]
pub struct ExportedArrays {
    pub classification: (PathBuf, PathBuf),
    pub regression: (PathBuf, PathBuf),
}

/// Write the classification pair (target `seniority`) and the regression
/// pair (target `salary`) into `config.output_dir`.
pub fn export_training_arrays(table: &RecordTable, config: &PipelineConfig) -> Result<ExportedArrays> {
    let classification = write_task(
        &config.output_dir,
        CLASSIFICATION_FILES,
        &split_target(table, SENIORITY)?,
    )?;
    let regression = write_task(
        &config.output_dir,
        REGRESSION_FILES,
        &split_target(table, SALARY)?,
    )?;
    Ok(ExportedArrays {
        classification,
        regression,
    })
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

/// Fit the seniority classifier on a prepared table, persist it, and return
/// its report on the held-out split.
pub fn train_classifier(table: &RecordTable, config: &PipelineConfig) -> Result<ClassificationReport> {
    let task = split_target(table, SENIORITY)?;
    let labels = class_labels(&task.y)?;
    let split = stratified_split(
        &labels,
        config.split.classification_test_fraction,
        config.split.seed,
    );
    log::info!(
        "classification split: {} train / {} test rows",
        split.train.len(),
        split.test.len()
    );

    let model = RidgeClassifier::fit(&task.select_rows(&split.train), config.ridge_alpha)?;
    let test = task.select_rows(&split.test);
    let predicted = model.predict(&test.features)?;
    let truth = class_labels(&test.y)?;

    let names = Seniority::ALL
        .iter()
        .map(|s| (s.code(), s.label().to_string()))
        .collect();
    let report = classification_report(&truth, &predicted).with_names(names);
    log::info!("seniority accuracy on held-out rows: {:.3}", report.accuracy);

    ModelStore::new(&config.model_dir).save(SENIORITY_MODEL, &model)?;
    Ok(report)
}

/// Fit the salary regressor on the exported regression pair and persist it.
/// Returns the R² on the held-out split.
pub fn train_regressor(config: &PipelineConfig) -> Result<f64> {
    let task = read_task(&config.output_dir, REGRESSION_FILES)?;
    let split = train_test_split(
        task.y.len(),
        config.split.regression_test_fraction,
        config.split.seed,
    );
    let model = RidgeRegressor::fit(&task.select_rows(&split.train), config.ridge_alpha)?;

    let test = task.select_rows(&split.test);
    let predicted = model.predict(&test.features)?;
    let truth = test.y.to_vec();
    let r2 = r2_score(&truth, &predicted);
    log::info!(
        "salary model: {} train / {} test rows, R² {r2:.3}",
        split.train.len(),
        split.test.len()
    );

    ModelStore::new(&config.model_dir).save(SALARY_MODEL, &model)?;
    Ok(r2)
}

/// Load the persisted salary model by name and predict every row of the
/// feature file.
pub fn predict_salaries(features_path: &Path, config: &PipelineConfig) -> Result<Vec<f64>> {
    let model: RidgeRegressor = ModelStore::new(&config.model_dir).load(SALARY_MODEL)?;
    let features = read_features(features_path)?;
    model.predict(&features)
}
