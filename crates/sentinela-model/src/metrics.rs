//! Classification metrics

use sentinela_core::Sentiment;
use serde::{Deserialize, Serialize};

/// Per-class precision, recall and F1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: Sentiment,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    /// Support-weighted mean F1
    pub weighted_f1: f64,
    pub per_class: Vec<ClassMetrics>,
    /// `confusion[actual][predicted]`
    pub confusion: Vec<Vec<usize>>,
}

impl ClassificationReport {
    pub fn compute(actual: &[usize], predicted: &[usize], n_classes: usize) -> Self {
        let mut confusion = vec![vec![0usize; n_classes]; n_classes];
        for (&a, &p) in actual.iter().zip(predicted) {
            if a < n_classes && p < n_classes {
                confusion[a][p] += 1;
            }
        }

        let total = actual.len();
        let correct: usize = (0..n_classes).map(|c| confusion[c][c]).sum();
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };

        let per_class: Vec<ClassMetrics> = (0..n_classes)
            .filter_map(|c| {
                let label = Sentiment::from_index(c)?;
                let tp = confusion[c][c] as f64;
                let predicted_c: usize = (0..n_classes).map(|a| confusion[a][c]).sum();
                let support: usize = confusion[c].iter().sum();
                let precision = ratio(tp, predicted_c as f64);
                let recall = ratio(tp, support as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);
                Some(ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support,
                })
            })
            .collect();

        let weighted_f1 = if total == 0 {
            0.0
        } else {
            per_class.iter().map(|m| m.f1 * m.support as f64).sum::<f64>() / total as f64
        };

        Self {
            accuracy,
            weighted_f1,
            per_class,
            confusion,
        }
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}
