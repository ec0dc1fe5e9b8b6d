use std::collections::BTreeSet;
use std::fmt;

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: i64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus overall accuracy on a held-out split.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
    /// Optional display name per label.
    pub names: Vec<(i64, String)>,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

pub fn classification_report(truth: &[i64], predicted: &[i64]) -> ClassificationReport {
    let labels: BTreeSet<i64> = truth.iter().chain(predicted).copied().collect();
    let pairs: Vec<(i64, i64)> = truth.iter().copied().zip(predicted.iter().copied()).collect();

    let classes = labels
        .into_iter()
        .map(|label| {
            let tp = pairs.iter().filter(|(t, p)| *t == label && *p == label).count();
            let predicted_n = pairs.iter().filter(|(_, p)| *p == label).count();
            let support = pairs.iter().filter(|(t, _)| *t == label).count();
            let precision = ratio(tp, predicted_n);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    let correct = pairs.iter().filter(|(t, p)| t == p).count();
    ClassificationReport {
        classes,
        accuracy: ratio(correct, pairs.len()),
        total: pairs.len(),
        names: Vec::new(),
    }
}

impl ClassificationReport {
    pub fn with_names(mut self, names: Vec<(i64, String)>) -> Self {
        self.names = names;
        self
    }

    fn name_of(&self, label: i64) -> String {
        self.names
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, n)| n.clone())
            .unwrap_or_else(|| label.to_string())
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                self.name_of(c.label),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f)?;
        write!(
            f,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.total
        )
    }
}

/// Coefficient of determination.
pub fn r2_score(truth: &[f64], predicted: &[f64]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let mean = truth.iter().sum::<f64>() / truth.len() as f64;
    let ss_tot: f64 = truth.iter().map(|t| (t - mean).powi(2)).sum();
    let ss_res: f64 = truth
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_class_scores() {
        let report = classification_report(&[1, 1, 2, 3], &[1, 2, 2, 3]);
        assert_eq!(report.total, 4);
        assert_eq!(report.accuracy, 0.75);
        let one = &report.classes[0];
        assert_eq!((one.label, one.precision, one.recall, one.support), (1, 1.0, 0.5, 2));
        let two = &report.classes[1];
        assert_eq!((two.precision, two.recall), (0.5, 1.0));
    }

    #[test]
    fn display_uses_names() {
        let report = classification_report(&[1, 3], &[1, 3])
            .with_names(vec![(1, "junior".into()), (3, "senior".into())]);
        let text = report.to_string();
        assert!(text.contains("junior"));
        assert!(text.contains("accuracy"));
    }

    #[test]
    fn r2_of_perfect_fit_is_one() {
        assert_eq!(r2_score(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 1.0);
        assert!(r2_score(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]).abs() < 1e-12);
    }
}
