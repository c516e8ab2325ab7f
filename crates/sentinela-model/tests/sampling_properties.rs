//! Properties of splitting and minority oversampling

use ndarray::Array2;
use proptest::prelude::*;
use sentinela_model::sampling::{smote, stratified_split};

fn rows_and_labels() -> impl Strategy<Value = (Vec<[f64; 2]>, Vec<usize>)> {
    prop::collection::vec(([-10.0f64..10.0, -10.0f64..10.0], 0usize..3), 2..40)
        .prop_map(|rows| {
            let labels = rows.iter().map(|(_, c)| *c).collect();
            let points = rows.into_iter().map(|([a, b], _)| [a, b]).collect();
            (points, labels)
        })
}

fn matrix(points: &[[f64; 2]]) -> Array2<f64> {
    Array2::from_shape_fn((points.len(), 2), |(i, j)| points[i][j])
}

proptest! {
    #[test]
    fn prop_smote_keeps_originals_and_balances((points, labels) in rows_and_labels(), seed in any::<u64>()) {
        let x = matrix(&points);
        let resampled = smote(&x, &labels, 3, 5, seed);
        let n = labels.len();

        prop_assert_eq!(resampled.x.nrows(), n + resampled.synthetic);
        prop_assert_eq!(resampled.y.len(), n + resampled.synthetic);
        prop_assert_eq!(&resampled.y[..n], &labels[..]);
        for i in 0..n {
            prop_assert_eq!(resampled.x.row(i).to_vec(), x.row(i).to_vec());
        }

        let majority = (0..3).map(|c| labels.iter().filter(|&&l| l == c).count()).max().unwrap();
        for c in 0..3 {
            let before = labels.iter().filter(|&&l| l == c).count();
            let after = resampled.y.iter().filter(|&&l| l == c).count();
            if before > 0 {
                prop_assert_eq!(after, majority);
            } else {
                prop_assert_eq!(after, 0);
            }
        }
    }

    #[test]
    fn prop_synthetic_rows_stay_inside_their_class((points, labels) in rows_and_labels(), seed in any::<u64>()) {
        let x = matrix(&points);
        let resampled = smote(&x, &labels, 3, 5, seed);

        for i in labels.len()..resampled.x.nrows() {
            let class = resampled.y[i];
            for j in 0..2 {
                let values: Vec<f64> = (0..labels.len())
                    .filter(|&r| labels[r] == class)
                    .map(|r| x[[r, j]])
                    .collect();
                let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let v = resampled.x[[i, j]];
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{} outside [{}, {}]", v, lo, hi);
            }
        }
    }

    #[test]
    fn prop_split_partitions_rows(counts in prop::array::uniform3(2usize..15), seed in any::<u64>()) {
        let labels: Vec<usize> = counts
            .iter()
            .enumerate()
            .flat_map(|(c, &n)| std::iter::repeat(c).take(n))
            .collect();
        let split = stratified_split(&labels, 3, 0.2, seed).unwrap();

        let mut all: Vec<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..labels.len()).collect::<Vec<_>>());
        for c in 0..3 {
            prop_assert!(split.train.iter().any(|&i| labels[i] == c));
            prop_assert!(split.test.iter().any(|&i| labels[i] == c));
        }
    }
}
