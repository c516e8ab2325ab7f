//! Error types for Sentinela

/// Result type alias using Sentinela's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Sentinela operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty or invalid text, oversized text or batch
    #[error("input error: {0}")]
    Input(String),

    /// Inference attempted with no loaded artifact
    #[error("model is not trained: {0}")]
    UntrainedModel(String),

    /// Artifact feature columns disagree with the columns produced at inference
    #[error("feature mismatch: {0}")]
    FeatureMismatch(String),

    /// Missing columns, empty dataset, or a class too small to stratify
    #[error("training data error: {0}")]
    TrainingData(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Batch processing stopped before this item was reached
    #[error("operation cancelled")]
    Cancelled,

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a new untrained-model error
    pub fn untrained(msg: impl Into<String>) -> Self {
        Self::UntrainedModel(msg.into())
    }

    /// Create a new feature mismatch error
    pub fn feature_mismatch(msg: impl Into<String>) -> Self {
        Self::FeatureMismatch(msg.into())
    }

    /// Create a new training data error
    pub fn training_data(msg: impl Into<String>) -> Self {
        Self::TrainingData(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable identifier, used in inline error records
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input_error",
            Self::UntrainedModel(_) => "untrained_model",
            Self::FeatureMismatch(_) => "feature_mismatch",
            Self::TrainingData(_) => "training_data_error",
            Self::Config(_) => "config_error",
            Self::Cancelled => "cancelled",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_stable() {
        assert_eq!(Error::input("empty").kind(), "input_error");
        assert_eq!(Error::untrained("no artifact").kind(), "untrained_model");
        assert_eq!(Error::training_data("tiny class").kind(), "training_data_error");
        assert_eq!(Error::Cancelled.kind(), "cancelled");
    }

    #[test]
    fn test_display_includes_message() {
        let err = Error::training_data("class Positive has 1 example");
        assert_eq!(
            err.to_string(),
            "training data error: class Positive has 1 example"
        );
    }
}
