//! Multinomial logistic regression
//!
//! Full-batch gradient descent on the weighted softmax cross-entropy with an
//! L2 penalty.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boosting::softmax;
use crate::config::LinearConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// (n_features, n_classes)
    coefficients: Array2<f64>,
    intercept: Array1<f64>,
    /// Loss after the final epoch
    final_loss: f64,
}

impl LogisticRegression {
    pub fn fit(
        config: &LinearConfig,
        x: &Array2<f64>,
        y: &[usize],
        weights: &[f64],
        n_classes: usize,
    ) -> Result<Self> {
        let (n, d) = x.dim();
        if n == 0 || y.len() != n || weights.len() != n {
            return Err(Error::training_data(format!(
                "logistic regression input mismatch: {n} rows, {} labels, {} weights",
                y.len(),
                weights.len()
            )));
        }

        let mut onehot = Array2::<f64>::zeros((n, n_classes));
        for (i, &c) in y.iter().enumerate() {
            onehot[[i, c]] = 1.0;
        }
        let sample_weights = Array1::from_vec(weights.to_vec());
        let total_weight = sample_weights.sum().max(f64::EPSILON);

        let mut coefficients = Array2::<f64>::zeros((d, n_classes));
        let mut intercept = Array1::<f64>::zeros(n_classes);
        let mut loss = f64::INFINITY;

        for _ in 0..config.epochs {
            let logits = x.dot(&coefficients) + &intercept;
            let probs = softmax_matrix(&logits);

            // Weighted residuals
            let mut residual = &probs - &onehot;
            for (mut row, w) in residual.axis_iter_mut(Axis(0)).zip(sample_weights.iter()) {
                row *= *w / total_weight;
            }

            let grad_w = x.t().dot(&residual) + &(&coefficients * config.l2);
            let grad_b = residual.sum_axis(Axis(0));

            coefficients.scaled_add(-config.learning_rate, &grad_w);
            intercept.scaled_add(-config.learning_rate, &grad_b);

            loss = cross_entropy(&probs, y, &sample_weights, total_weight);
        }

        debug!(epochs = config.epochs, loss, "Logistic regression trained");

        Ok(Self {
            coefficients,
            intercept,
            final_loss: loss,
        })
    }

    pub fn predict_proba(&self, row: ArrayView1<f64>) -> Vec<f64> {
        let logits = row.dot(&self.coefficients) + &self.intercept;
        softmax(&logits.to_vec())
    }

    pub fn final_loss(&self) -> f64 {
        self.final_loss
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.nrows()
    }
}

fn softmax_matrix(logits: &Array2<f64>) -> Array2<f64> {
    let mut out = logits.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let probs = softmax(&row.to_vec());
        row.iter_mut().zip(probs).for_each(|(r, p)| *r = p);
    }
    out
}

fn cross_entropy(probs: &Array2<f64>, y: &[usize], weights: &Array1<f64>, total: f64) -> f64 {
    y.iter()
        .enumerate()
        .map(|(i, &c)| -weights[i] * probs[[i, c]].max(1e-12).ln())
        .sum::<f64>()
        / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_linear_separation() {
        let x = array![
            [1.0, 0.0],
            [0.9, 0.1],
            [0.0, 1.0],
            [0.1, 0.9],
            [-1.0, -1.0],
            [-0.9, -1.1]
        ];
        let y = vec![2, 2, 0, 0, 1, 1];
        let config = LinearConfig {
            epochs: 500,
            learning_rate: 0.5,
            l2: 0.0,
        };
        let model = LogisticRegression::fit(&config, &x, &y, &[1.0; 6], 3).unwrap();

        let p = model.predict_proba(array![1.0, 0.0].view());
        assert!(p[2] > 0.8, "{p:?}");
        let p = model.predict_proba(array![0.0, 1.0].view());
        assert!(p[0] > 0.8, "{p:?}");
        assert!(model.final_loss() < 0.3);
    }

    #[test]
    fn test_row_count_mismatch() {
        let x = array![[1.0], [2.0]];
        let err = LogisticRegression::fit(&LinearConfig::default(), &x, &[0], &[1.0, 1.0], 3)
            .unwrap_err();
        assert_eq!(err.kind(), "training_data_error");
    }
}
