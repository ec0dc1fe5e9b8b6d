use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::features::{FeatureMatrix, TaskData};

use super::check_schema;

/// Coefficients of a fitted ridge problem: `coef` is features × outputs.
#[derive(Debug, Clone)]
pub struct RidgeSolution {
    pub coef: Array2<f64>,
    pub intercept: Array1<f64>,
}

/// Weighted ridge regression with intercept, one column of `y` per output.
///
/// Minimises `Σ wᵢ‖yᵢ − xᵢC − b‖² + α‖C‖²`. The intercept is not
/// penalised; it is recovered from the weighted means after solving the
/// centred problem `(XcᵀWXc + αI) C = XcᵀWYc` by Cholesky.
pub fn solve_ridge(
    x: &Array2<f64>,
    y: &Array2<f64>,
    weights: &Array1<f64>,
    alpha: f64,
) -> Result<RidgeSolution> {
    let n = x.nrows();
    if n == 0 {
        return Err(PipelineError::Training("no training rows".to_string()));
    }
    if y.nrows() != n || weights.len() != n {
        return Err(PipelineError::Training(format!(
            "row count mismatch: x {n}, y {}, weights {}",
            y.nrows(),
            weights.len()
        )));
    }

    let total = weights.sum();
    let x_mean = weights.dot(x) / total;
    let y_mean = weights.dot(y) / total;
    let sqrt_w = weights.mapv(f64::sqrt).insert_axis(Axis(1));

    let xc = (x - &x_mean) * &sqrt_w;
    let yc = (y - &y_mean) * &sqrt_w;

    let mut gram = xc.t().dot(&xc);
    for i in 0..gram.nrows() {
        gram[[i, i]] += alpha;
    }
    let rhs = xc.t().dot(&yc);

    let coef = cholesky_solve(&gram, &rhs)?;
    let intercept = &y_mean - &x_mean.dot(&coef);
    Ok(RidgeSolution { coef, intercept })
}

/// Solve `A X = B` for symmetric positive definite `A`.
fn cholesky_solve(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }
            if i == j {
                if !(sum > 0.0 && sum.is_finite()) {
                    return Err(PipelineError::Training(
                        "normal equations are not positive definite".to_string(),
                    ));
                }
                l[[i, i]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }

    let mut x = b.clone();
    for col in 0..x.ncols() {
        // L z = b
        for i in 0..n {
            let mut s = x[[i, col]];
            for k in 0..i {
                s -= l[[i, k]] * x[[k, col]];
            }
            x[[i, col]] = s / l[[i, i]];
        }
        // Lᵀ x = z
        for i in (0..n).rev() {
            let mut s = x[[i, col]];
            for k in (i + 1)..n {
                s -= l[[k, i]] * x[[k, col]];
            }
            x[[i, col]] = s / l[[i, i]];
        }
    }
    Ok(x)
}

// ---------------------------------------------------------------------------
// RidgeRegressor – salary model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeRegressor {
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub alpha: f64,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl RidgeRegressor {
    pub fn fit(task: &TaskData, alpha: f64) -> Result<Self> {
        let y = task.y.clone().insert_axis(Axis(1));
        let weights = Array1::<f64>::ones(task.y.len());
        let solution = solve_ridge(&task.features.x, &y, &weights, alpha)?;
        Ok(RidgeRegressor {
            feature_names: task.features.feature_names.clone(),
            target_name: task.target_name.clone(),
            alpha,
            coef: solution.coef.column(0).to_vec(),
            intercept: solution.intercept[0],
        })
    }

    /// One prediction per row. The input must carry the training schema.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        check_schema(&self.feature_names, features)?;
        let coef = Array1::from(self.coef.clone());
        Ok((features.x.dot(&coef) + self.intercept).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn task(x: Array2<f64>, y: Array1<f64>) -> TaskData {
        TaskData {
            features: FeatureMatrix {
                feature_names: (0..x.ncols()).map(|j| format!("f{j}")).collect(),
                x,
            },
            target_name: "salary".into(),
            y,
        }
    }

    #[test]
    fn tiny_alpha_recovers_a_linear_function() {
        let x = array![[0.0, 1.0], [1.0, 0.0], [2.0, 1.0], [3.0, 5.0], [4.0, 2.0]];
        let y = x.column(0).mapv(|v| 3.0 * v) + x.column(1).mapv(|v| -2.0 * v) + 10.0;
        let model = RidgeRegressor::fit(&task(x.clone(), y.clone()), 1e-9).unwrap();
        assert!((model.coef[0] - 3.0).abs() < 1e-6);
        assert!((model.coef[1] + 2.0).abs() < 1e-6);
        assert!((model.intercept - 10.0).abs() < 1e-6);

        let predicted = model.predict(&task(x, y.clone()).features).unwrap();
        for (p, t) in predicted.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-6);
        }
    }

    #[test]
    fn penalty_shrinks_coefficients() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![0.0, 2.0, 4.0, 6.0];
        let loose = RidgeRegressor::fit(&task(x.clone(), y.clone()), 1e-9).unwrap();
        let tight = RidgeRegressor::fit(&task(x, y), 10.0).unwrap();
        assert!((loose.coef[0] - 2.0).abs() < 1e-6);
        // Centred Σx² = 5, so the slope is 10 / (5 + 10).
        assert!((tight.coef[0] - 10.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn constant_feature_is_handled_by_the_penalty() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
        let y = array![1.0, 2.0, 3.0];
        let model = RidgeRegressor::fit(&task(x, y), 1.0).unwrap();
        assert_eq!(model.coef[0], 0.0);
    }

    #[test]
    fn schema_mismatch_is_rejected() {
        let x = array![[0.0], [1.0], [2.0]];
        let model = RidgeRegressor::fit(&task(x, array![1.0, 2.0, 3.0]), 1.0).unwrap();
        let other = FeatureMatrix {
            feature_names: vec!["g0".into()],
            x: array![[1.0]],
        };
        assert!(matches!(
            model.predict(&other),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn empty_training_set_is_an_error() {
        let x = Array2::<f64>::zeros((0, 2));
        let err = RidgeRegressor::fit(&task(x, Array1::zeros(0)), 1.0).unwrap_err();
        assert!(matches!(err, PipelineError::Training(_)));
    }
}
