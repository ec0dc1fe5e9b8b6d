use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::features::{FeatureMatrix, TaskData};

use super::check_schema;
use super::ridge::solve_ridge;

/// Turn a float target into integer class labels.
pub fn class_labels(y: &Array1<f64>) -> Result<Vec<i64>> {
    y.iter()
        .enumerate()
        .map(|(row, v)| {
            if v.fract() == 0.0 && v.is_finite() {
                Ok(*v as i64)
            } else {
                Err(PipelineError::NonNumeric {
                    column: "target".to_string(),
                    row,
                    value: v.to_string(),
                })
            }
        })
        .collect()
}

/// One-vs-rest ridge classifier over standardised features with balanced
/// class weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeClassifier {
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub alpha: f64,
    pub classes: Vec<i64>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    /// Per class, one coefficient per feature.
    pub coef: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl RidgeClassifier {
    pub fn fit(task: &TaskData, alpha: f64) -> Result<Self> {
        let labels = class_labels(&task.y)?;
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for label in &labels {
            *counts.entry(*label).or_insert(0) += 1;
        }
        if counts.len() < 2 {
            return Err(PipelineError::Training(format!(
                "need at least two classes, found {}",
                counts.len()
            )));
        }
        let classes: Vec<i64> = counts.keys().copied().collect();

        let x = &task.features.x;
        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| PipelineError::Training("no training rows".to_string()))?;
        let scales = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });
        let xs = (x - &means) / &scales;

        // Balanced weights: n / (k * count_c).
        let n = labels.len() as f64;
        let k = classes.len() as f64;
        let weights = Array1::from_iter(labels.iter().map(|l| n / (k * counts[l] as f64)));

        let mut y = Array2::<f64>::from_elem((labels.len(), classes.len()), -1.0);
        for (i, label) in labels.iter().enumerate() {
            let c = classes.binary_search(label).unwrap_or_else(|pos| pos);
            y[[i, c]] = 1.0;
        }

        let solution = solve_ridge(&xs, &y, &weights, alpha)?;
        Ok(RidgeClassifier {
            feature_names: task.features.feature_names.clone(),
            target_name: task.target_name.clone(),
            alpha,
            classes,
            means: means.to_vec(),
            scales: scales.to_vec(),
            coef: solution.coef.columns().into_iter().map(|c| c.to_vec()).collect(),
            intercepts: solution.intercept.to_vec(),
        })
    }

    /// Highest-scoring class per row. The input must carry the training
    /// schema.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>> {
        check_schema(&self.feature_names, features)?;
        let means = Array1::from(self.means.clone());
        let scales = Array1::from(self.scales.clone());
        let xs = (&features.x - &means) / &scales;

        let predictions = xs
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = (f64::NEG_INFINITY, self.classes[0]);
                for ((coef, intercept), class) in
                    self.coef.iter().zip(&self.intercepts).zip(&self.classes)
                {
                    let score = row.iter().zip(coef).map(|(x, c)| x * c).sum::<f64>() + intercept;
                    if score > best.0 {
                        best = (score, *class);
                    }
                }
                best.1
            })
            .collect();
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn task() -> TaskData {
        // Class follows the first feature's band; the second is noise.
        TaskData {
            features: FeatureMatrix {
                feature_names: vec!["experience_months".into(), "noise".into()],
                x: array![
                    [1.0, 5.0],
                    [5.0, 1.0],
                    [8.0, 3.0],
                    [30.0, 2.0],
                    [36.0, 4.0],
                    [40.0, 5.0],
                    [90.0, 1.0],
                    [100.0, 3.0],
                    [120.0, 2.0],
                    [150.0, 4.0],
                ],
            },
            target_name: "seniority".into(),
            y: array![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0],
        }
    }

    #[test]
    fn separates_well_spaced_classes() {
        let task = task();
        let model = RidgeClassifier::fit(&task, 0.01).unwrap();
        assert_eq!(model.classes, vec![1, 2, 3]);
        let predicted = model.predict(&task.features).unwrap();
        assert_eq!(&predicted[6..], &[3, 3, 3, 3]);
        let correct = predicted
            .iter()
            .zip(class_labels(&task.y).unwrap())
            .filter(|(p, t)| **p == *t)
            .count();
        assert!(correct >= 7, "only {correct} of 10 correct");
    }

    #[test]
    fn single_class_is_rejected() {
        let mut task = task();
        task.y.fill(2.0);
        assert!(matches!(
            RidgeClassifier::fit(&task, 1.0),
            Err(PipelineError::Training(_))
        ));
    }

    #[test]
    fn fractional_labels_are_rejected() {
        assert!(class_labels(&array![1.0, 2.5]).is_err());
        assert_eq!(class_labels(&array![3.0, 1.0]).unwrap(), vec![3, 1]);
    }
}
