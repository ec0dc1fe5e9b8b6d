use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of a single train/test split, each sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

fn test_size(n: usize, test_fraction: f64) -> usize {
    ((n as f64 * test_fraction).ceil() as usize).min(n)
}

fn finish(mut train: Vec<usize>, mut test: Vec<usize>) -> Split {
    train.sort_unstable();
    test.sort_unstable();
    Split { train, test }
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(n * test_fraction)`
/// rows.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    let test = indices.split_off(n - test_size(n, test_fraction));
    finish(indices, test)
}

/// Like `train_test_split`, but every label keeps roughly the same share in
/// both halves. Each class with at least two rows keeps one in each half.
pub fn stratified_split(labels: &[i64], test_fraction: f64, seed: u64) -> Split {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut by_class: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        by_class.entry(*label).or_default().push(i);
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (_, mut rows) in by_class {
        rows.shuffle(&mut rng);
        let n = rows.len();
        let mut n_test = (n as f64 * test_fraction).round() as usize;
        if n >= 2 {
            n_test = n_test.clamp(1, n - 1);
        } else {
            n_test = 0;
        }
        test.extend(rows.split_off(n - n_test));
        train.extend(rows);
    }
    finish(train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_partitions_all_rows() {
        let split = train_test_split(10, 0.25, 42);
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 7);
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(train_test_split(50, 0.2, 7), train_test_split(50, 0.2, 7));
        assert_eq!(
            stratified_split(&[1, 2, 3, 1, 2, 3, 1, 2], 0.25, 7),
            stratified_split(&[1, 2, 3, 1, 2, 3, 1, 2], 0.25, 7)
        );
    }

    #[test]
    fn stratified_keeps_every_class_in_both_halves() {
        let labels = [1, 1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3];
        let split = stratified_split(&labels, 0.25, 42);
        for class in [1, 2, 3] {
            assert!(split.train.iter().any(|&i| labels[i] == class));
            assert!(split.test.iter().any(|&i| labels[i] == class));
        }
        assert_eq!(split.train.len() + split.test.len(), labels.len());
    }

    #[test]
    fn singleton_class_stays_in_train() {
        let split = stratified_split(&[1, 2, 2, 2], 0.5, 1);
        assert!(split.train.contains(&0));
    }
}
