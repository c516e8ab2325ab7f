//! Trained model artifact and its on-disk form
//!
//! The artifact bundles everything inference needs: the fitted n-gram
//! vocabulary, the dense scaler, the ensemble, the fused column order and the
//! label map. It is written once per training run and read-only afterwards.

use chrono::{DateTime, Utc};
use ndarray::Array1;
use sentinela_core::{Error, Probabilities, Result, Sentiment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::ensemble::VotingEnsemble;
use crate::metrics::ClassificationReport;
use crate::scaler::StandardScaler;
use crate::vectorizer::TfidfVectorizer;

/// Bumped whenever the serialized layout changes
pub const ARTIFACT_VERSION: u32 = 1;

/// Prefix of n-gram columns in [`ModelArtifact::feature_columns`]
pub const TFIDF_PREFIX: &str = "tfidf:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCount {
    pub label: Sentiment,
    pub count: usize,
}

/// Facts recorded about a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub accuracy: f64,
    pub weighted_f1: f64,
    pub train_size: usize,
    pub test_size: usize,
    /// Rows added by minority oversampling
    pub synthetic_rows: usize,
    pub n_features: usize,
    /// Label distribution of the full dataset
    pub class_distribution: Vec<ClassCount>,
    pub report: ClassificationReport,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub vectorizer: TfidfVectorizer,
    pub scaler: StandardScaler,
    pub ensemble: VotingEnsemble,
    /// Dense column names in the order the scaler was fitted
    pub dense_columns: Vec<String>,
    /// Label for each class index
    pub label_map: Vec<Sentiment>,
    pub metadata: TrainingMetadata,
}

impl ModelArtifact {
    /// Fused column order: dense columns, then one column per n-gram
    pub fn feature_columns(&self) -> Vec<String> {
        self.dense_columns
            .iter()
            .cloned()
            .chain(
                self.vectorizer
                    .terms()
                    .iter()
                    .map(|t| format!("{TFIDF_PREFIX}{t}")),
            )
            .collect()
    }

    pub fn n_features(&self) -> usize {
        self.dense_columns.len() + self.vectorizer.n_terms()
    }

    /// Check internal consistency of a freshly built or loaded artifact
    pub fn validate(&self) -> Result<()> {
        if self.version != ARTIFACT_VERSION {
            return Err(Error::config(format!(
                "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
                self.version
            )));
        }
        if self.label_map != Sentiment::ALL {
            return Err(Error::feature_mismatch(format!(
                "label map {:?} differs from canonical order {:?}",
                self.label_map,
                Sentiment::ALL
            )));
        }
        if self.scaler.n_features() != self.dense_columns.len() {
            return Err(Error::feature_mismatch(format!(
                "scaler fitted on {} columns but artifact lists {}",
                self.scaler.n_features(),
                self.dense_columns.len()
            )));
        }
        if self.ensemble.n_features() != self.n_features() {
            return Err(Error::feature_mismatch(format!(
                "ensemble expects {} features but artifact describes {}",
                self.ensemble.n_features(),
                self.n_features()
            )));
        }
        Ok(())
    }

    /// Write the artifact as JSON, replacing `path` atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        info!(
            path = %path.display(),
            n_features = self.n_features(),
            "Model artifact saved"
        );
        Ok(())
    }

    /// Read and validate an artifact
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file))?;
        artifact.validate()?;

        info!(
            path = %path.display(),
            n_features = artifact.n_features(),
            accuracy = artifact.metadata.accuracy,
            trained_at = %artifact.metadata.trained_at,
            "Model artifact loaded"
        );
        Ok(artifact)
    }

    /// Build the fused feature vector for one comment.
    ///
    /// Dense values are aligned to the trained column order by name. Trained
    /// columns missing from `columns` are filled with zero.
    pub fn vectorize(&self, cleaned: &str, columns: &[String], values: &[f64]) -> Result<Array1<f64>> {
        if columns.len() != values.len() {
            return Err(Error::feature_mismatch(format!(
                "{} column names for {} values",
                columns.len(),
                values.len()
            )));
        }

        let provided: HashMap<&str, f64> = columns
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
            .collect();

        let mut missing = Vec::new();
        let dense: Vec<f64> = self
            .dense_columns
            .iter()
            .map(|name| match provided.get(name.as_str()) {
                Some(v) => *v,
                None => {
                    missing.push(name.as_str());
                    0.0
                }
            })
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "Zero-filling feature columns absent at inference");
        }

        let scaled = self.scaler.transform_row(Array1::from_vec(dense).view())?;
        let mut fused = scaled;
        fused.extend(self.vectorizer.transform(cleaned));
        Ok(Array1::from_vec(fused))
    }

    /// Ensemble probabilities for one comment
    pub fn predict_proba(&self, cleaned: &str, columns: &[String], values: &[f64]) -> Result<Probabilities> {
        let row = self.vectorize(cleaned, columns, values)?;
        Ok(self.ensemble.predict_proba(row.view()))
    }
}
