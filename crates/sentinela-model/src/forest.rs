//! Bagged random forest classifier

use ndarray::{Array2, ArrayView1};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ForestConfig;
use crate::tree::{DecisionTree, TaskType, TreeConfig};

/// Random forest over bootstrap samples, trees built in parallel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Train on `x` with class indices `y` and per-row weights
    pub fn fit(
        config: &ForestConfig,
        x: &Array2<f64>,
        y: &[usize],
        weights: &[f64],
        n_classes: usize,
        seed: u64,
    ) -> Result<Self> {
        let n_samples = x.nrows();
        if n_samples == 0 || config.n_trees == 0 {
            return Err(Error::training_data("random forest needs rows and at least one tree"));
        }

        let n_features = x.ncols();
        let max_features = config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .max(1);
        let targets: Vec<f64> = y.iter().map(|&c| c as f64).collect();

        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_seed = seed.wrapping_add(i as u64);
                let sample = bootstrap_indices(n_samples, tree_seed);
                let tree_config = TreeConfig {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: tree_seed,
                    task: TaskType::Classification { n_classes },
                };
                DecisionTree::fit(tree_config, x, &targets, weights, &sample)
            })
            .collect::<Result<_>>()?;

        let avg_depth = trees.iter().map(|t| t.depth()).sum::<usize>() as f64 / trees.len() as f64;
        debug!(n_trees = trees.len(), max_features, avg_depth, "Random forest trained");

        Ok(Self { trees, n_classes })
    }

    /// Mean class distribution over all trees
    pub fn predict_proba(&self, row: ArrayView1<f64>) -> Vec<f64> {
        let mut probs = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (p, v) in probs.iter_mut().zip(tree.predict_row(row)) {
                *p += v;
            }
        }
        let n = self.trees.len().max(1) as f64;
        probs.iter_mut().for_each(|p| *p /= n);
        probs
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}
