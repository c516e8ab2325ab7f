//! End-to-end training of a [`ModelArtifact`]

use chrono::Utc;
use ndarray::{Array2, Axis};
use sentinela_core::{Error, Result, Sentiment};
use tracing::{debug, info};

use crate::artifact::{ClassCount, ModelArtifact, TrainingMetadata, ARTIFACT_VERSION};
use crate::config::TrainingConfig;
use crate::ensemble::VotingEnsemble;
use crate::metrics::ClassificationReport;
use crate::sampling::{class_weights, smote, stratified_split, take_rows, Resampled};
use crate::scaler::StandardScaler;
use crate::vectorizer::TfidfVectorizer;

const N_CLASSES: usize = Sentiment::ALL.len();

/// Featurized, labeled rows ready for training
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    /// Cleaned text per row
    pub texts: Vec<String>,
    /// Dense feature row per row, in `dense_columns` order
    pub dense: Vec<Vec<f64>>,
    pub dense_columns: Vec<String>,
    pub labels: Vec<Sentiment>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows per class in canonical order
    pub fn class_counts(&self) -> [usize; N_CLASSES] {
        let mut counts = [0; N_CLASSES];
        for label in &self.labels {
            counts[label.index()] += 1;
        }
        counts
    }

    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::training_data("dataset is empty"));
        }
        if self.texts.len() != self.len() || self.dense.len() != self.len() {
            return Err(Error::training_data(format!(
                "{} labels, {} texts and {} feature rows",
                self.len(),
                self.texts.len(),
                self.dense.len()
            )));
        }
        let width = self.dense_columns.len();
        if let Some(i) = self.dense.iter().position(|row| row.len() != width) {
            return Err(Error::feature_mismatch(format!(
                "row {i} has {} dense values, expected {width}",
                self.dense[i].len()
            )));
        }
        Ok(())
    }

    fn dense_matrix(&self) -> Array2<f64> {
        let width = self.dense_columns.len();
        Array2::from_shape_fn((self.len(), width), |(i, j)| self.dense[i][j])
    }
}

/// Fits the vectorizer, scaler and ensemble and evaluates on a held-out split
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train an artifact. `stopwords` are excluded from the n-gram vocabulary.
    pub fn train(&self, set: &TrainingSet, stopwords: Vec<String>) -> Result<ModelArtifact> {
        set.validate()?;
        let config = &self.config;
        let y: Vec<usize> = set.labels.iter().map(|l| l.index()).collect();

        let split = stratified_split(&y, N_CLASSES, config.test_size, config.seed)?;
        info!(
            train = split.train.len(),
            test = split.test.len(),
            seed = config.seed,
            "Stratified split"
        );

        let train_texts: Vec<String> = split.train.iter().map(|&i| set.texts[i].clone()).collect();
        let mut vectorizer = TfidfVectorizer::new(config.tfidf.clone(), stopwords);
        vectorizer.fit(&train_texts)?;

        let dense = set.dense_matrix();
        let scaler = StandardScaler::fit(&take_rows(&dense, &split.train))?;
        debug!(
            n_terms = vectorizer.n_terms(),
            n_dense = scaler.n_features(),
            "Feature space fitted"
        );

        let x_train = fuse(&vectorizer, &scaler, set, &dense, &split.train)?;
        let y_train: Vec<usize> = split.train.iter().map(|&i| y[i]).collect();

        let Resampled { x, y: y_fit, synthetic } = if config.smote.enabled {
            smote(&x_train, &y_train, N_CLASSES, config.smote.k_neighbors, config.seed)
        } else {
            Resampled {
                x: x_train,
                y: y_train,
                synthetic: 0,
            }
        };
        if synthetic > 0 {
            info!(synthetic, rows = y_fit.len(), "Minority classes oversampled");
        }

        let per_class = class_weights(&y_fit, N_CLASSES);
        let weights: Vec<f64> = y_fit.iter().map(|&c| per_class[c]).collect();

        let ensemble = VotingEnsemble::fit(config, &x, &y_fit, &weights)?;

        let x_test = fuse(&vectorizer, &scaler, set, &dense, &split.test)?;
        let y_test: Vec<usize> = split.test.iter().map(|&i| y[i]).collect();
        let predicted: Vec<usize> = x_test
            .axis_iter(Axis(0))
            .map(|row| ensemble.predict_proba(row).argmax().index())
            .collect();
        let report = ClassificationReport::compute(&y_test, &predicted, N_CLASSES);

        info!(
            accuracy = report.accuracy,
            weighted_f1 = report.weighted_f1,
            "Held-out evaluation"
        );

        let counts = set.class_counts();
        let artifact = ModelArtifact {
            version: ARTIFACT_VERSION,
            dense_columns: set.dense_columns.clone(),
            label_map: Sentiment::ALL.to_vec(),
            metadata: TrainingMetadata {
                accuracy: report.accuracy,
                weighted_f1: report.weighted_f1,
                train_size: split.train.len(),
                test_size: split.test.len(),
                synthetic_rows: synthetic,
                n_features: scaler.n_features() + vectorizer.n_terms(),
                class_distribution: Sentiment::ALL
                    .iter()
                    .map(|&label| ClassCount {
                        label,
                        count: counts[label.index()],
                    })
                    .collect(),
                report,
                trained_at: Utc::now(),
            },
            vectorizer,
            scaler,
            ensemble,
        };
        artifact.validate()?;

        Ok(artifact)
    }
}

/// Scaled dense block followed by the TF-IDF block, for the selected rows
fn fuse(
    vectorizer: &TfidfVectorizer,
    scaler: &StandardScaler,
    set: &TrainingSet,
    dense: &Array2<f64>,
    rows: &[usize],
) -> Result<Array2<f64>> {
    let scaled = scaler.transform(&take_rows(dense, rows))?;
    let n_dense = scaled.ncols();
    let mut out = Array2::zeros((rows.len(), n_dense + vectorizer.n_terms()));
    for (r, &i) in rows.iter().enumerate() {
        for j in 0..n_dense {
            out[[r, j]] = scaled[[r, j]];
        }
        for (j, v) in vectorizer.transform(&set.texts[i]).into_iter().enumerate() {
            out[[r, n_dense + j]] = v;
        }
    }
    Ok(out)
}
