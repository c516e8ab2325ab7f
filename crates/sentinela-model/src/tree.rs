//! Weighted CART decision tree
//!
//! Shared by the bagged forest (classification, gini impurity) and the boosted
//! model (regression on Newton targets, squared error).

use ndarray::{Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    Classification { n_classes: usize },
    Regression,
}

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in each child
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    pub seed: u64,
    pub task: TaskType,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
            task: TaskType::Classification { n_classes: 3 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    /// Class distribution, or a single regression value
    Leaf { value: Vec<f64> },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Sufficient statistics of a node
#[derive(Debug, Clone)]
enum NodeStats {
    Classes { weights: Vec<f64>, total: f64 },
    Moments { w: f64, wz: f64, wz2: f64 },
}

impl NodeStats {
    fn empty(task: TaskType) -> Self {
        match task {
            TaskType::Classification { n_classes } => Self::Classes {
                weights: vec![0.0; n_classes],
                total: 0.0,
            },
            TaskType::Regression => Self::Moments {
                w: 0.0,
                wz: 0.0,
                wz2: 0.0,
            },
        }
    }

    fn add(&mut self, target: f64, weight: f64) {
        match self {
            Self::Classes { weights, total } => {
                weights[target as usize] += weight;
                *total += weight;
            }
            Self::Moments { w, wz, wz2 } => {
                *w += weight;
                *wz += weight * target;
                *wz2 += weight * target * target;
            }
        }
    }

    fn minus(&self, other: &Self) -> Self {
        match (self, other) {
            (
                Self::Classes { weights, total },
                Self::Classes {
                    weights: ow,
                    total: ot,
                },
            ) => Self::Classes {
                weights: weights.iter().zip(ow).map(|(a, b)| (a - b).max(0.0)).collect(),
                total: (total - ot).max(0.0),
            },
            (Self::Moments { w, wz, wz2 }, Self::Moments { w: ow, wz: owz, wz2: owz2 }) => {
                Self::Moments {
                    w: (w - ow).max(0.0),
                    wz: wz - owz,
                    wz2: wz2 - owz2,
                }
            }
            _ => self.clone(),
        }
    }

    /// Weight-scaled impurity: W * gini, or the weighted sum of squared errors
    fn impurity(&self) -> f64 {
        match self {
            Self::Classes { weights, total } => {
                if *total <= 0.0 {
                    0.0
                } else {
                    total - weights.iter().map(|c| c * c).sum::<f64>() / total
                }
            }
            Self::Moments { w, wz, wz2 } => {
                if *w <= 0.0 {
                    0.0
                } else {
                    (wz2 - wz * wz / w).max(0.0)
                }
            }
        }
    }

    fn leaf_value(&self) -> Vec<f64> {
        match self {
            Self::Classes { weights, total } => {
                if *total <= 0.0 {
                    vec![1.0 / weights.len() as f64; weights.len()]
                } else {
                    weights.iter().map(|c| c / total).collect()
                }
            }
            Self::Moments { w, wz, .. } => vec![if *w > 0.0 { wz / w } else { 0.0 }],
        }
    }
}

struct FitData<'a> {
    x: &'a Array2<f64>,
    targets: &'a [f64],
    weights: &'a [f64],
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Weighted decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: TreeNode,
    n_features: usize,
}

impl DecisionTree {
    /// Fit a tree on the rows listed in `sample` (repeats allowed).
    ///
    /// `targets` holds class indices for classification, real values for regression.
    pub fn fit(
        config: TreeConfig,
        x: &Array2<f64>,
        targets: &[f64],
        weights: &[f64],
        sample: &[usize],
    ) -> Result<Self> {
        if targets.len() != x.nrows() || weights.len() != x.nrows() {
            return Err(Error::internal(format!(
                "tree input mismatch: {} rows, {} targets, {} weights",
                x.nrows(),
                targets.len(),
                weights.len()
            )));
        }
        if let TaskType::Classification { n_classes } = config.task {
            if let Some(bad) = targets.iter().find(|t| **t < 0.0 || **t as usize >= n_classes) {
                return Err(Error::internal(format!("class target {bad} out of range")));
            }
        }

        let data = FitData { x, targets, weights };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let tree = Self {
            root: TreeNode::Leaf { value: Vec::new() },
            n_features: x.ncols(),
            config,
        };
        let root = tree.build(&data, sample.to_vec(), 0, &mut rng);
        Ok(Self { root, ..tree })
    }

    fn stats(&self, data: &FitData<'_>, indices: &[usize]) -> NodeStats {
        let mut stats = NodeStats::empty(self.config.task);
        for &i in indices {
            stats.add(data.targets[i], data.weights[i]);
        }
        stats
    }

    fn build(
        &self,
        data: &FitData<'_>,
        indices: Vec<usize>,
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let stats = self.stats(data, &indices);
        let impurity = stats.impurity();

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || indices.len() < 2 * self.config.min_samples_leaf.max(1)
            || impurity < 1e-12
        {
            return TreeNode::Leaf {
                value: stats.leaf_value(),
            };
        }

        let Some(best) = self.find_best_split(data, &indices, &stats, rng) else {
            return TreeNode::Leaf {
                value: stats.leaf_value(),
            };
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| data.x[[i, best.feature]] <= best.threshold);

        let left = self.build(data, left_idx, depth + 1, rng);
        let right = self.build(data, right_idx, depth + 1, rng);

        TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn find_best_split(
        &self,
        data: &FitData<'_>,
        indices: &[usize],
        parent: &NodeStats,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let max_features = self
            .config
            .max_features
            .unwrap_or(self.n_features)
            .clamp(1, self.n_features.max(1));

        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);
        features.truncate(max_features);

        let parent_impurity = parent.impurity();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let mut best: Option<BestSplit> = None;

        let mut order: Vec<(f64, usize)> = Vec::with_capacity(indices.len());
        for feature in features {
            order.clear();
            order.extend(indices.iter().map(|&i| (data.x[[i, feature]], i)));
            order.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (first, last) = match (order.first(), order.last()) {
                (Some(f), Some(l)) => (f.0, l.0),
                _ => continue,
            };
            if first == last {
                continue;
            }

            let mut left = NodeStats::empty(self.config.task);
            for pos in 0..order.len() - 1 {
                let (value, i) = order[pos];
                left.add(data.targets[i], data.weights[i]);

                let next = order[pos + 1].0;
                if value == next {
                    continue;
                }
                let n_left = pos + 1;
                if n_left < min_leaf || order.len() - n_left < min_leaf {
                    continue;
                }

                let right = parent.minus(&left);
                let gain = parent_impurity - left.impurity() - right.impurity();
                if gain > best.as_ref().map_or(1e-12, |b| b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (value + next) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Leaf value for a row: class distribution, or a one-element regression output
    pub fn predict_row(&self, row: ArrayView1<f64>) -> &[f64] {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = row.get(*feature).copied().unwrap_or(0.0);
                    node = if v <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}
