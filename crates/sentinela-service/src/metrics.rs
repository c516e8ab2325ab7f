//! Service metrics
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! these calls are no-ops.

use sentinela_core::{DecisionSource, Sentiment};
use std::time::Duration;

pub const PREDICTIONS_TOTAL: &str = "sentinela_predictions_total";
pub const RULE_OVERRIDES_TOTAL: &str = "sentinela_rule_overrides_total";
pub const ANALYSIS_ERRORS_TOTAL: &str = "sentinela_analysis_errors_total";
pub const INFERENCE_LATENCY_US: &str = "sentinela_inference_latency_us";

/// Register descriptions with whatever recorder is installed
pub fn describe() {
    metrics::describe_counter!(PREDICTIONS_TOTAL, "Predictions emitted by final label");
    metrics::describe_counter!(
        RULE_OVERRIDES_TOTAL,
        "Predictions whose label was decided by an overlay rule"
    );
    metrics::describe_counter!(ANALYSIS_ERRORS_TOTAL, "Failed analyses by error kind");
    metrics::describe_histogram!(
        INFERENCE_LATENCY_US,
        metrics::Unit::Microseconds,
        "Single-comment inference latency in microseconds"
    );
}

pub(crate) fn record_prediction(label: Sentiment, source: &DecisionSource, latency: Duration) {
    metrics::counter!(PREDICTIONS_TOTAL, "label" => label.as_str()).increment(1);
    if let DecisionSource::Rule { name } = source {
        metrics::counter!(RULE_OVERRIDES_TOTAL, "rule" => name.clone()).increment(1);
    }
    metrics::histogram!(INFERENCE_LATENCY_US).record(latency.as_micros() as f64);
}

pub(crate) fn record_error(kind: &'static str) {
    metrics::counter!(ANALYSIS_ERRORS_TOTAL, "kind" => kind).increment(1);
}
