//! Stratified splitting, class weighting and synthetic minority oversampling

use ndarray::{Array2, ArrayView1, Axis};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sentinela_core::{Error, Result, Sentiment};

/// Train/test row indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified split preserving class proportions.
///
/// Every class present must have at least two examples so it can appear on
/// both sides; otherwise this is a training data error.
pub fn stratified_split(labels: &[usize], n_classes: usize, test_size: f64, seed: u64) -> Result<Split> {
    if labels.is_empty() {
        return Err(Error::training_data("dataset is empty"));
    }
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(Error::config(format!("test_size must be in (0, 1), got {test_size}")));
    }

    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (i, &c) in labels.iter().enumerate() {
        by_class
            .get_mut(c)
            .ok_or_else(|| Error::internal(format!("label index {c} out of range")))?
            .push(i);
    }

    let present = by_class.iter().filter(|rows| !rows.is_empty()).count();
    if present < 2 {
        return Err(Error::training_data(format!(
            "need at least two classes to train, found {present}"
        )));
    }

    for (c, rows) in by_class.iter().enumerate() {
        if rows.len() == 1 {
            let name = Sentiment::from_index(c).map(|s| s.as_str()).unwrap_or("unknown");
            return Err(Error::training_data(format!(
                "class {name} has 1 example; at least 2 are required to stratify"
            )));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut split = Split {
        train: Vec::new(),
        test: Vec::new(),
    };
    for mut rows in by_class.into_iter().filter(|rows| !rows.is_empty()) {
        rows.shuffle(&mut rng);
        let n_test = ((rows.len() as f64 * test_size).round() as usize).clamp(1, rows.len() - 1);
        split.test.extend_from_slice(&rows[..n_test]);
        split.train.extend_from_slice(&rows[n_test..]);
    }
    split.train.sort_unstable();
    split.test.sort_unstable();

    Ok(split)
}

/// Balanced class weights: `n / (classes_present * count)`, zero for absent classes
pub fn class_weights(labels: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n_classes];
    for &c in labels {
        if c < n_classes {
            counts[c] += 1;
        }
    }
    let present = counts.iter().filter(|c| **c > 0).count().max(1);
    counts
        .iter()
        .map(|&count| {
            if count == 0 {
                0.0
            } else {
                labels.len() as f64 / (present * count) as f64
            }
        })
        .collect()
}

/// Result of oversampling
#[derive(Debug, Clone)]
pub struct Resampled {
    pub x: Array2<f64>,
    pub y: Vec<usize>,
    pub synthetic: usize,
}

/// Oversample every minority class up to the majority count.
///
/// Each synthetic row interpolates between a minority row and one of its
/// `k` nearest same-class neighbours.
pub fn smote(x: &Array2<f64>, y: &[usize], n_classes: usize, k: usize, seed: u64) -> Resampled {
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (i, &c) in y.iter().enumerate() {
        if c < n_classes {
            by_class[c].push(i);
        }
    }
    let majority = by_class.iter().map(Vec::len).max().unwrap_or(0);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();

    for (class, members) in by_class.iter().enumerate() {
        if members.is_empty() || members.len() >= majority {
            continue;
        }
        let needed = majority - members.len();
        let neighbours = nearest_neighbours(x, members, k.min(members.len() - 1));

        for _ in 0..needed {
            let pick = rng.gen_range(0..members.len());
            let base = x.row(members[pick]);
            let row = match neighbours[pick].as_slice() {
                [] => base.to_vec(),
                candidates => {
                    let other = x.row(candidates[rng.gen_range(0..candidates.len())]);
                    let gap: f64 = rng.gen();
                    base.iter().zip(other.iter()).map(|(a, b)| a + gap * (b - a)).collect()
                }
            };
            rows.push(row);
            labels.push(class);
        }
    }

    let synthetic = rows.len();
    let mut out = Array2::zeros((x.nrows() + synthetic, x.ncols()));
    out.slice_mut(ndarray::s![..x.nrows(), ..]).assign(x);
    for (offset, row) in rows.into_iter().enumerate() {
        for (j, v) in row.into_iter().enumerate() {
            out[[x.nrows() + offset, j]] = v;
        }
    }
    let mut y_out = y.to_vec();
    y_out.extend(labels);

    Resampled {
        x: out,
        y: y_out,
        synthetic,
    }
}

/// For each member, the row indices of its `k` nearest same-class members
fn nearest_neighbours(x: &Array2<f64>, members: &[usize], k: usize) -> Vec<Vec<usize>> {
    members
        .iter()
        .map(|&i| {
            let row = x.row(i);
            let mut distances: Vec<(f64, usize)> = members
                .iter()
                .filter(|&&j| j != i)
                .map(|&j| (squared_distance(row, x.row(j)), j))
                .collect();
            distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            distances.truncate(k);
            distances.into_iter().map(|(_, j)| j).collect()
        })
        .collect()
}

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Select rows of a matrix
pub fn take_rows(x: &Array2<f64>, rows: &[usize]) -> Array2<f64> {
    x.select(Axis(0), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_split_is_stratified_and_disjoint() {
        let labels: Vec<usize> = [vec![0; 10], vec![1; 20], vec![2; 30]].concat();
        let split = stratified_split(&labels, 3, 0.2, 42).unwrap();
        assert_eq!(split.train.len() + split.test.len(), 60);
        assert!(split.test.iter().all(|i| !split.train.contains(i)));

        let test_counts: Vec<usize> = (0..3)
            .map(|c| split.test.iter().filter(|&&i| labels[i] == c).count())
            .collect();
        assert_eq!(test_counts, vec![2, 4, 6]);
    }

    #[test]
    fn test_split_is_reproducible() {
        let labels: Vec<usize> = (0..40).map(|i| i % 3).collect();
        assert_eq!(
            stratified_split(&labels, 3, 0.2, 7).unwrap(),
            stratified_split(&labels, 3, 0.2, 7).unwrap()
        );
    }

    #[test]
    fn test_singleton_class_is_training_error() {
        let labels = vec![0, 0, 0, 1, 1, 1, 2];
        let err = stratified_split(&labels, 3, 0.2, 42).unwrap_err();
        assert_eq!(err.kind(), "training_data_error");
        assert!(err.to_string().contains("Positive"));
    }

    #[test]
    fn test_single_class_is_training_error() {
        let err = stratified_split(&[1, 1, 1, 1], 3, 0.2, 42).unwrap_err();
        assert_eq!(err.kind(), "training_data_error");
    }

    #[test]
    fn test_class_weights_balanced() {
        let weights = class_weights(&[0, 1, 1, 1], 3);
        assert!((weights[0] - 2.0).abs() < 1e-12);
        assert!((weights[1] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(weights[2], 0.0);
    }

    #[test]
    fn test_smote_balances_classes() {
        let x = array![[0.0, 0.0], [0.2, 0.0], [0.0, 0.2], [5.0, 5.0], [5.0, 5.2], [5.2, 5.0], [5.1, 5.1], [4.9, 5.0]];
        let y = vec![0, 0, 0, 2, 2, 2, 2, 2];
        let resampled = smote(&x, &y, 3, 5, 42);

        assert_eq!(resampled.synthetic, 2);
        assert_eq!(resampled.y.iter().filter(|c| **c == 0).count(), 5);
        // synthetic rows stay inside the minority cluster
        for i in 8..resampled.x.nrows() {
            assert!(resampled.x[[i, 0]] <= 0.2 && resampled.x[[i, 1]] <= 0.2);
        }
        // originals untouched
        assert_eq!(resampled.x.row(3).to_vec(), vec![5.0, 5.0]);
    }
}
