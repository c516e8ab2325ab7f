//! The sentiment service: dataset lifecycle, training, persistence and
//! single/batch inference

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use sentinela_core::{AnalysisRecord, Error, Prediction, Result, Sentiment};
use sentinela_lexicon::{Featurizer, TextFeatures};
use sentinela_model::{ModelArtifact, Trainer, TrainingMetadata, TrainingSet};
use sentinela_policy::DecisionOverlay;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, InMemoryCache, PredictionCache};
use crate::columns::ColumnResolver;
use crate::config::ServiceConfig;
use crate::dataset::{ingest, IngestReport, LabelNormalizer, LabeledDataset, Table};
use crate::metrics;

/// An artifact together with the publish that installed it
#[derive(Clone)]
struct Published {
    artifact: Arc<ModelArtifact>,
    generation: u64,
}

struct LoadedDataset {
    dataset: LabeledDataset,
    report: IngestReport,
}

/// Share of one class in the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassShare {
    pub label: Sentiment,
    pub count: usize,
    /// Percentage of all rows, rounded to two decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub total_rows: usize,
    pub distribution: Vec<ClassShare>,
    pub ingest: IngestReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub is_trained: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TrainingMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
    pub rules: Vec<String>,
}

/// Orchestrates the hybrid classifier.
///
/// Constructed once and shared by reference. The trained artifact is
/// immutable once published; training replaces it under an exclusive lock
/// while readers keep serving from the previous one. Cache keys carry the
/// publish generation, so a prediction made against a replaced artifact is
/// never served after the swap.
pub struct SentimentService {
    config: ServiceConfig,
    featurizer: Featurizer,
    overlay: DecisionOverlay,
    dense_columns: Vec<String>,
    resolver: ColumnResolver,
    normalizer: LabelNormalizer,
    published: RwLock<Option<Published>>,
    generations: AtomicU64,
    dataset: RwLock<Option<Arc<LoadedDataset>>>,
    training: Mutex<()>,
    cache: Option<Arc<dyn PredictionCache>>,
}

impl SentimentService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let featurizer = Featurizer::spanish()?;
        let overlay = DecisionOverlay::new(featurizer.lexicon().clone(), config.overlay.clone())?;
        let cache: Option<Arc<dyn PredictionCache>> = if config.cache.enabled {
            Some(Arc::new(InMemoryCache::new()))
        } else {
            None
        };

        info!(
            rules = ?overlay.rule_names(),
            max_batch_size = config.max_batch_size,
            max_text_length = config.max_text_length,
            cache = config.cache.enabled,
            "Sentiment service initialized"
        );

        Ok(Self {
            config,
            featurizer,
            overlay,
            dense_columns: TextFeatures::columns(),
            resolver: ColumnResolver::default(),
            normalizer: LabelNormalizer::default(),
            published: RwLock::new(None),
            generations: AtomicU64::new(0),
            dataset: RwLock::new(None),
            training: Mutex::new(()),
            cache,
        })
    }

    /// Use a caller-supplied cache regardless of configuration
    pub fn with_cache(mut self, cache: Arc<dyn PredictionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Ingest a table as the training dataset, replacing any previous one
    pub fn load_dataset(&self, table: &Table) -> Result<IngestReport> {
        let (dataset, report) = ingest(table, &self.resolver, &self.normalizer)?;
        *self.dataset.write() = Some(Arc::new(LoadedDataset {
            dataset,
            report: report.clone(),
        }));
        Ok(report)
    }

    /// Train on the loaded dataset and publish the new artifact.
    ///
    /// Training runs are serialized; inference continues against the
    /// previous artifact until the new one is published.
    pub fn train(&self) -> Result<TrainingMetadata> {
        let _guard = self.training.lock();
        let loaded = self
            .dataset
            .read()
            .clone()
            .ok_or_else(|| Error::training_data("no dataset loaded"))?;

        let started = Instant::now();
        let set = self.training_set(&loaded.dataset);
        let trainer = Trainer::new(self.config.training.clone());
        let artifact = trainer.train(&set, self.featurizer.lexicon().stopwords())?;
        let metadata = artifact.metadata.clone();

        self.publish(artifact);
        info!(
            rows = set.len(),
            accuracy = metadata.accuracy,
            weighted_f1 = metadata.weighted_f1,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model trained"
        );
        Ok(metadata)
    }

    /// Save the current artifact, to `path` or the configured model path
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let published = self.published()?;
        published.artifact.save(path.unwrap_or(&self.config.model_path))
    }

    /// Load an artifact, from `path` or the configured model path
    pub fn load(&self, path: Option<&Path>) -> Result<()> {
        let _guard = self.training.lock();
        let artifact = ModelArtifact::load(path.unwrap_or(&self.config.model_path))?;
        if artifact.dense_columns != self.dense_columns {
            warn!(
                trained = artifact.dense_columns.len(),
                current = self.dense_columns.len(),
                "Artifact dense columns differ from the current featurizer"
            );
        }
        self.publish(artifact);
        Ok(())
    }

    pub fn is_trained(&self) -> bool {
        self.published.read().is_some()
    }

    /// Number of artifacts published so far, `None` before the first
    pub fn generation(&self) -> Option<u64> {
        self.published.read().as_ref().map(|p| p.generation)
    }

    /// Classify one comment
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        self.validate_text(text)?;
        let Published { artifact, generation } = self.published()?;

        let key = self.cache.as_ref().map(|_| cache_key(generation, text));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(hit) = cache.get(key) {
                debug!("Prediction cache hit");
                return Ok(hit);
            }
        }

        let started = Instant::now();
        let features = self.featurizer.featurize(text);
        let probabilities = artifact.predict_proba(&features.cleaned, &self.dense_columns, &features.dense())?;
        let decision = self.overlay.decide(text, &probabilities, &features.lexical);
        let prediction = Prediction::new(decision.label, probabilities, features.snapshot(), decision.source);

        metrics::record_prediction(prediction.label, &prediction.decided_by, started.elapsed());

        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            cache.set(key, prediction.clone(), Duration::from_secs(self.config.cache.ttl_secs));
        }
        Ok(prediction)
    }

    /// Classify one comment, reporting failure inside the record
    pub fn analyze_single(&self, text: &str) -> AnalysisRecord {
        match self.predict(text) {
            Ok(prediction) => AnalysisRecord::from_prediction(text, prediction),
            Err(err) => {
                metrics::record_error(err.kind());
                debug!(error = %err, "Analysis failed");
                AnalysisRecord::failure(text, &err)
            }
        }
    }

    /// Classify a batch, one record per input in input order.
    ///
    /// Per-item failures are reported inline. Once `cancel` fires, every
    /// item not yet started is reported as cancelled.
    pub fn analyze_batch(&self, texts: &[String], cancel: Option<&CancellationToken>) -> Result<Vec<AnalysisRecord>> {
        if texts.len() > self.config.max_batch_size {
            return Err(Error::input(format!(
                "batch of {} exceeds the maximum of {}",
                texts.len(),
                self.config.max_batch_size
            )));
        }

        let mut records = Vec::with_capacity(texts.len());
        let mut cancelled = 0usize;
        for text in texts {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                cancelled += 1;
                records.push(AnalysisRecord::failure(text.as_str(), &Error::Cancelled));
                continue;
            }
            records.push(self.analyze_single(text));
        }

        let failed = records.iter().filter(|r| !r.is_ok()).count();
        info!(items = texts.len(), failed, cancelled, "Batch analyzed");
        Ok(records)
    }

    /// Row count and class distribution of the loaded dataset
    pub fn dataset_info(&self) -> Result<DatasetInfo> {
        let loaded = self
            .dataset
            .read()
            .clone()
            .ok_or_else(|| Error::training_data("no dataset loaded"))?;
        let total = loaded.dataset.len();
        let counts = loaded.dataset.distribution();

        let distribution = Sentiment::ALL
            .iter()
            .map(|&label| {
                let count = counts[label.index()];
                let percentage = if total == 0 {
                    0.0
                } else {
                    (count as f64 / total as f64 * 10_000.0).round() / 100.0
                };
                ClassShare {
                    label,
                    count,
                    percentage,
                }
            })
            .collect();

        Ok(DatasetInfo {
            total_rows: total,
            distribution,
            ingest: loaded.report.clone(),
        })
    }

    pub fn model_info(&self) -> ModelInfo {
        let published = self.published.read().clone();
        ModelInfo {
            is_trained: published.is_some(),
            metadata: published.as_ref().map(|p| p.artifact.metadata.clone()),
            n_features: published.as_ref().map(|p| p.artifact.n_features()),
            rules: self.overlay.rule_names().into_iter().map(String::from).collect(),
        }
    }

    fn published(&self) -> Result<Published> {
        self.published
            .read()
            .clone()
            .ok_or_else(|| Error::untrained("train or load a model before analyzing"))
    }

    fn publish(&self, artifact: ModelArtifact) {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        *self.published.write() = Some(Published {
            artifact: Arc::new(artifact),
            generation,
        });
        debug!(generation, "Artifact published");
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn validate_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::input("text is empty"));
        }
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(Error::input(format!(
                "text has {length} characters, the maximum is {}",
                self.config.max_text_length
            )));
        }
        Ok(())
    }

    fn training_set(&self, dataset: &LabeledDataset) -> TrainingSet {
        let featurized: Vec<TextFeatures> = dataset
            .texts
            .par_iter()
            .map(|text| self.featurizer.featurize(text))
            .collect();

        let (texts, dense): (Vec<String>, Vec<Vec<f64>>) = featurized
            .into_iter()
            .map(|f| {
                let row = f.dense();
                (f.cleaned, row)
            })
            .unzip();

        TrainingSet {
            texts,
            dense,
            dense_columns: self.dense_columns.clone(),
            labels: dataset.labels.clone(),
        }
    }
}
