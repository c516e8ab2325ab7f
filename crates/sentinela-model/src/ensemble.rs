//! Soft-voting ensemble over the three base learners

use ndarray::{Array2, ArrayView1};
use sentinela_core::{Probabilities, Result, Sentiment};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::boosting::GradientBoosting;
use crate::config::TrainingConfig;
use crate::forest::RandomForest;
use crate::linear::LogisticRegression;

const N_CLASSES: usize = Sentiment::ALL.len();

/// Averages the class distributions of a bagged forest, a boosted model and
/// a logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingEnsemble {
    forest: RandomForest,
    boosting: GradientBoosting,
    linear: LogisticRegression,
}

impl VotingEnsemble {
    /// Fit all three learners on the same (already resampled) matrix
    pub fn fit(config: &TrainingConfig, x: &Array2<f64>, y: &[usize], weights: &[f64]) -> Result<Self> {
        let forest = RandomForest::fit(&config.forest, x, y, weights, N_CLASSES, config.seed)?;
        let boosting = GradientBoosting::fit(&config.boosting, x, y, weights, N_CLASSES, config.seed)?;
        let linear = LogisticRegression::fit(&config.linear, x, y, weights, N_CLASSES)?;

        info!(
            n_trees = forest.n_trees(),
            n_stages = boosting.n_stages(),
            linear_loss = linear.final_loss(),
            "Voting ensemble trained"
        );

        Ok(Self {
            forest,
            boosting,
            linear,
        })
    }

    pub fn predict_proba(&self, row: ArrayView1<f64>) -> Probabilities {
        let mut scores = [0.0; N_CLASSES];
        for distribution in [
            self.forest.predict_proba(row),
            self.boosting.predict_proba(row),
            self.linear.predict_proba(row),
        ] {
            for (score, p) in scores.iter_mut().zip(distribution) {
                *score += p / 3.0;
            }
        }
        Probabilities::from_scores(scores)
    }

    /// Width of the fused feature vector the learners were trained on
    pub fn n_features(&self) -> usize {
        self.linear.n_features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoostingConfig, ForestConfig};
    use ndarray::array;

    #[test]
    fn test_ensemble_votes() {
        let x = array![
            [0.0, 1.0],
            [0.1, 0.9],
            [0.0, 0.8],
            [0.5, 0.5],
            [0.4, 0.5],
            [0.5, 0.4],
            [1.0, 0.0],
            [0.9, 0.1],
            [0.8, 0.0]
        ];
        let y = vec![0, 0, 0, 1, 1, 1, 2, 2, 2];
        let config = TrainingConfig {
            forest: ForestConfig {
                n_trees: 10,
                ..ForestConfig::default()
            },
            boosting: BoostingConfig {
                n_estimators: 10,
                ..BoostingConfig::default()
            },
            ..TrainingConfig::default()
        };
        let ensemble = VotingEnsemble::fit(&config, &x, &y, &[1.0; 9]).unwrap();
        assert_eq!(ensemble.n_features(), 2);

        let p = ensemble.predict_proba(array![1.0, 0.0].view());
        assert!((p.total() - 1.0).abs() < 1e-6);
        assert_eq!(p.argmax(), Sentiment::Positive, "{p:?}");

        let p = ensemble.predict_proba(array![0.0, 1.0].view());
        assert_eq!(p.argmax(), Sentiment::Negative, "{p:?}");
    }
}
