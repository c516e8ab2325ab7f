//! Decision overlay engine

use sentinela_core::{DecisionSource, Probabilities, Result, Sentiment};
use sentinela_lexicon::{LexicalFeatures, SentimentLexicon};
use std::sync::Arc;
use tracing::debug;

use crate::config::OverlayConfig;
use crate::rule::{Rule, RuleContext};
use crate::rules::default_rules;
use crate::thresholds::ThresholdPolicy;

/// Final label and what produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub label: Sentiment,
    pub source: DecisionSource,
}

/// Ordered, first-match-wins rule chain over ensemble probabilities, with a
/// length-tiered threshold fallback.
///
/// The probabilities are never modified; only the label is chosen.
pub struct DecisionOverlay {
    lexicon: Arc<SentimentLexicon>,
    rules: Vec<Box<dyn Rule>>,
    thresholds: ThresholdPolicy,
}

impl DecisionOverlay {
    /// Overlay with the built-in rule chain
    pub fn new(lexicon: Arc<SentimentLexicon>, config: OverlayConfig) -> Result<Self> {
        config.validate()?;
        let rules = default_rules(&config)?;
        Ok(Self::with_rules(lexicon, rules, config))
    }

    /// Overlay with a caller-supplied chain
    pub fn with_rules(lexicon: Arc<SentimentLexicon>, rules: Vec<Box<dyn Rule>>, config: OverlayConfig) -> Self {
        Self {
            lexicon,
            rules,
            thresholds: ThresholdPolicy::new(config),
        }
    }

    /// Append a rule after the existing ones
    pub fn push_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn decide(&self, text: &str, probabilities: &Probabilities, features: &LexicalFeatures) -> Decision {
        let ctx = RuleContext::new(text, probabilities, features, &self.lexicon);

        for rule in &self.rules {
            if let Some(label) = rule.evaluate(&ctx) {
                debug!(rule = rule.name(), %label, "Overlay rule fired");
                return Decision {
                    label,
                    source: DecisionSource::Rule {
                        name: rule.name().to_string(),
                    },
                };
            }
        }

        let (label, source) = self.thresholds.decide(probabilities, ctx.token_count());
        Decision { label, source }
    }
}
