//! Command-line arguments

use clap::{Parser, Subcommand};
use sentinela_service::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentinela")]
#[command(about = "Hybrid sentiment classifier for Spanish social-media comments", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "sentinela.yaml", env = "SENTINELA_CONFIG")]
    pub config: PathBuf,

    /// Model artifact path, overrides the configuration
    #[arg(short, long, global = true)]
    pub model_path: Option<PathBuf>,

    /// Largest accepted batch, overrides the configuration
    #[arg(long, global = true)]
    pub max_batch_size: Option<usize>,

    /// Longest accepted comment in characters, overrides the configuration
    #[arg(long, global = true)]
    pub max_text_length: Option<usize>,

    /// Training seed, overrides the configuration
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Enable the in-memory prediction cache
    #[arg(long, global = true)]
    pub cache: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest a labeled CSV, train and save the model
    Train {
        /// CSV with a text column and a label column
        #[arg(short, long)]
        dataset: PathBuf,
    },

    /// Classify one comment
    Analyze {
        /// Comment text
        text: String,
    },

    /// Classify one comment per line, writing JSON lines to stdout
    Batch {
        /// Input file, one comment per line
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show model metadata, and dataset statistics when a dataset is given
    Info {
        /// CSV to summarize
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model_path: self.model_path.clone(),
            max_batch_size: self.max_batch_size,
            max_text_length: self.max_text_length,
            seed: self.seed,
            cache_enabled: self.cache.then_some(true),
        }
    }
}
