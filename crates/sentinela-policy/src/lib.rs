//! Sentinela Policy
//!
//! The decision overlay sits between the ensemble's probabilities and the
//! emitted label. It is an ordered list of [`Rule`] objects evaluated
//! first-match-wins, followed by a length-tiered [`ThresholdPolicy`].
//!
//! Built-in chain:
//! 1. courtesy / very short text → Neutral
//! 2. concession with strong positive cues → Positive
//! 3. emoji/text contradiction → Negative
//! 4. sarcasm and irony → Negative
//! 5. informational questions → Neutral
//! 6. lukewarm expressions → Neutral
//!
//! Cutoffs are configured through [`OverlayConfig`], loadable from YAML.

pub mod config;
pub mod engine;
pub mod rule;
pub mod rules;
pub mod thresholds;

pub use config::{LongTextCutoffs, OverlayConfig, ShortTextCutoffs};
pub use engine::{Decision, DecisionOverlay};
pub use rule::{Rule, RuleContext};
pub use thresholds::ThresholdPolicy;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::OverlayConfig;
    pub use crate::engine::{Decision, DecisionOverlay};
    pub use crate::rule::{Rule, RuleContext};
}
