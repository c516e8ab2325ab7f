//! Training configuration

use serde::{Deserialize, Serialize};

/// Training hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed for the split, resampling and every learner
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default)]
    pub tfidf: TfidfConfig,

    #[serde(default)]
    pub forest: ForestConfig,

    #[serde(default)]
    pub boosting: BoostingConfig,

    #[serde(default)]
    pub linear: LinearConfig,

    #[serde(default)]
    pub smote: SmoteConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
            seed: default_seed(),
            tfidf: TfidfConfig::default(),
            forest: ForestConfig::default(),
            boosting: BoostingConfig::default(),
            linear: LinearConfig::default(),
            smote: SmoteConfig::default(),
        }
    }
}

/// N-gram TF-IDF settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfConfig {
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Minimum number of documents a term must appear in
    #[serde(default = "default_min_df")]
    pub min_df: usize,

    /// Maximum share of documents a term may appear in
    #[serde(default = "default_max_df")]
    pub max_df: f64,

    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,

    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            min_df: default_min_df(),
            max_df: default_max_df(),
            ngram_min: default_ngram_min(),
            ngram_max: default_ngram_max(),
        }
    }
}

/// Bagged-tree settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,

    #[serde(default = "default_forest_depth")]
    pub max_depth: usize,

    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,

    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,

    /// Features tried per split, square root of the total when unset
    #[serde(default)]
    pub max_features: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            max_depth: default_forest_depth(),
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            max_features: None,
        }
    }
}

/// Boosted-tree settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostingConfig {
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    #[serde(default = "default_boosting_lr")]
    pub learning_rate: f64,

    #[serde(default = "default_boosting_depth")]
    pub max_depth: usize,

    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,

    /// Features tried per split, all when unset
    #[serde(default)]
    pub max_features: Option<usize>,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: default_n_estimators(),
            learning_rate: default_boosting_lr(),
            max_depth: default_boosting_depth(),
            min_samples_leaf: default_min_samples_leaf(),
            max_features: None,
        }
    }
}

/// Multinomial logistic regression settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearConfig {
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    #[serde(default = "default_linear_lr")]
    pub learning_rate: f64,

    /// L2 penalty on the weights (not the bias)
    #[serde(default = "default_l2")]
    pub l2: f64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            learning_rate: default_linear_lr(),
            l2: default_l2(),
        }
    }
}

/// Synthetic minority oversampling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_k_neighbors")]
    pub k_neighbors: usize,
}

impl Default for SmoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            k_neighbors: default_k_neighbors(),
        }
    }
}

fn default_test_size() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_max_features() -> usize {
    500
}

fn default_min_df() -> usize {
    2
}

fn default_max_df() -> f64 {
    0.95
}

fn default_ngram_min() -> usize {
    1
}

fn default_ngram_max() -> usize {
    2
}

fn default_n_trees() -> usize {
    100
}

fn default_forest_depth() -> usize {
    20
}

fn default_min_samples_split() -> usize {
    2
}

fn default_min_samples_leaf() -> usize {
    1
}

fn default_n_estimators() -> usize {
    60
}

fn default_boosting_lr() -> f64 {
    0.1
}

fn default_boosting_depth() -> usize {
    3
}

fn default_epochs() -> usize {
    300
}

fn default_linear_lr() -> f64 {
    0.5
}

fn default_l2() -> f64 {
    1e-3
}

fn default_k_neighbors() -> usize {
    5
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.tfidf.max_features, 500);
        assert_eq!(config.tfidf.ngram_max, 2);
        assert_eq!(config.forest.n_trees, 100);
        assert!(config.smote.enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TrainingConfig =
            serde_json::from_str(r#"{"seed": 7, "forest": {"n_trees": 5}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.forest.n_trees, 5);
        assert_eq!(config.forest.max_depth, 20);
        assert_eq!(config.boosting.n_estimators, 60);
    }
}
