//! Multiclass gradient boosting
//!
//! One regression tree per class and stage, fitted to the Newton step of the
//! softmax cross-entropy (working response `r/h` with weight `h`).

use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;
use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BoostingConfig;
use crate::tree::{DecisionTree, TaskType, TreeConfig};

/// Working responses are clipped to this magnitude
const MAX_RESPONSE: f64 = 4.0;

/// Floor on the per-row hessian
const MIN_HESSIAN: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    learning_rate: f64,
    n_classes: usize,
    /// Log prior per class
    init: Vec<f64>,
    /// `stages[m][k]` is the class-k tree of stage m
    stages: Vec<Vec<DecisionTree>>,
}

impl GradientBoosting {
    pub fn fit(
        config: &BoostingConfig,
        x: &Array2<f64>,
        y: &[usize],
        weights: &[f64],
        n_classes: usize,
        seed: u64,
    ) -> Result<Self> {
        let n = x.nrows();
        if n == 0 || n_classes < 2 {
            return Err(Error::training_data(
                "gradient boosting needs rows and at least two classes",
            ));
        }

        let total_weight: f64 = weights.iter().sum();
        let mut class_weight = vec![0.0; n_classes];
        for (&c, &w) in y.iter().zip(weights) {
            class_weight[c] += w;
        }
        let init: Vec<f64> = class_weight
            .iter()
            .map(|w| ((w + 1e-3) / (total_weight + 1e-3 * n_classes as f64)).ln())
            .collect();

        let mut scores = Array2::from_shape_fn((n, n_classes), |(_, k)| init[k]);
        let all_rows: Vec<usize> = (0..n).collect();
        let shrink = config.learning_rate * (n_classes as f64 - 1.0) / n_classes as f64;
        let mut stages = Vec::with_capacity(config.n_estimators);

        for stage in 0..config.n_estimators {
            let probs = softmax_rows(&scores);

            let trees: Vec<DecisionTree> = (0..n_classes)
                .into_par_iter()
                .map(|k| {
                    let mut response = Vec::with_capacity(n);
                    let mut hess_weights = Vec::with_capacity(n);
                    for i in 0..n {
                        let p = probs[[i, k]];
                        let target = if y[i] == k { 1.0 } else { 0.0 };
                        let h = (p * (1.0 - p)).max(MIN_HESSIAN);
                        response.push(((target - p) / h).clamp(-MAX_RESPONSE, MAX_RESPONSE));
                        hess_weights.push(weights[i] * h);
                    }
                    let tree_config = TreeConfig {
                        max_depth: config.max_depth,
                        min_samples_split: 2,
                        min_samples_leaf: config.min_samples_leaf,
                        max_features: config.max_features,
                        seed: seed
                            .wrapping_add((stage * n_classes + k) as u64)
                            .wrapping_mul(0x9E37_79B9),
                        task: TaskType::Regression,
                    };
                    DecisionTree::fit(tree_config, x, &response, &hess_weights, &all_rows)
                })
                .collect::<Result<_>>()?;

            for (i, row) in x.axis_iter(Axis(0)).enumerate() {
                for (k, tree) in trees.iter().enumerate() {
                    scores[[i, k]] += shrink * tree.predict_row(row)[0];
                }
            }
            stages.push(trees);
        }

        debug!(
            n_stages = stages.len(),
            learning_rate = config.learning_rate,
            "Gradient boosting trained"
        );

        Ok(Self {
            learning_rate: config.learning_rate,
            n_classes,
            init,
            stages,
        })
    }

    pub fn predict_proba(&self, row: ArrayView1<f64>) -> Vec<f64> {
        let shrink = self.learning_rate * (self.n_classes as f64 - 1.0) / self.n_classes as f64;
        let mut scores = self.init.clone();
        for trees in &self.stages {
            for (score, tree) in scores.iter_mut().zip(trees) {
                *score += shrink * tree.predict_row(row).first().copied().unwrap_or(0.0);
            }
        }
        softmax(&scores)
    }

    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }
}

pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn softmax_rows(scores: &Array2<f64>) -> Array2<f64> {
    let mut out = scores.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let probs = softmax(&row.to_vec());
        row.iter_mut().zip(probs).for_each(|(r, p)| *r = p);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1.0, 2.0, 1000.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[2] > 0.99);
    }

    #[test]
    fn test_boosting_learns_threshold() {
        let x = array![[0.0], [0.1], [0.2], [0.3], [1.0], [1.1], [1.2], [1.3], [2.0], [2.1], [2.2], [2.3]];
        let y = vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2];
        let config = BoostingConfig {
            n_estimators: 30,
            learning_rate: 0.3,
            max_depth: 2,
            ..BoostingConfig::default()
        };
        let model = GradientBoosting::fit(&config, &x, &y, &[1.0; 12], 3, 42).unwrap();
        assert_eq!(model.n_stages(), 30);

        let p0 = model.predict_proba(array![0.15].view());
        let p1 = model.predict_proba(array![1.15].view());
        let p2 = model.predict_proba(array![2.15].view());
        assert!(p0[0] > p0[1] && p0[0] > p0[2], "{p0:?}");
        assert!(p1[1] > p1[0] && p1[1] > p1[2], "{p1:?}");
        assert!(p2[2] > p2[0] && p2[2] > p2[1], "{p2:?}");
    }
}
