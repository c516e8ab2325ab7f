//! Sentinela Service
//!
//! Orchestrates the hybrid classifier: dataset ingestion, training,
//! artifact persistence and single or batch analysis.
//!
//! ```no_run
//! use sentinela_service::{SentimentService, ServiceConfig, Table};
//!
//! # fn main() -> sentinela_core::Result<()> {
//! let service = SentimentService::new(ServiceConfig::default())?;
//! service.load_dataset(&Table::from_path("comentarios.csv")?)?;
//! service.train()?;
//! let record = service.analyze_single("Excelente universidad");
//! println!("{:?}", record.label);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cache;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod metrics;

pub use analyzer::{ClassShare, DatasetInfo, ModelInfo, SentimentService};
pub use cache::{cache_key, InMemoryCache, PredictionCache};
pub use columns::{ColumnPattern, ColumnResolver, ResolvedColumns};
pub use config::{CacheConfig, ConfigOverrides, ServiceConfig};
pub use dataset::{ingest, IngestReport, LabelNormalizer, LabeledDataset, NormalizedLabel, Table, PLACEHOLDER_TEXT};
