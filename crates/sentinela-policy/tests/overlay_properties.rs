use proptest::prelude::*;
use sentinela_core::{DecisionSource, Probabilities, Sentiment};
use sentinela_lexicon::Featurizer;
use sentinela_policy::{DecisionOverlay, OverlayConfig};

fn setup() -> (Featurizer, DecisionOverlay) {
    let featurizer = Featurizer::spanish().unwrap();
    let overlay = DecisionOverlay::new(featurizer.lexicon().clone(), OverlayConfig::default()).unwrap();
    (featurizer, overlay)
}

proptest! {
    #[test]
    fn prop_overlay_is_deterministic(
        text in "\\PC{0,60}",
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        c in 0.0f64..1.0,
    ) {
        let (featurizer, overlay) = setup();
        let probs = Probabilities::from_scores([a, b, c]);
        let features = featurizer.featurize(&text).lexical;

        let first = overlay.decide(&text, &probs, &features);
        let second = overlay.decide(&text, &probs, &features);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_courtesy_is_neutral_whatever_the_punctuation(
        word in prop::sample::select(vec!["gracias", "Gracias", "ok", "Muchas gracias", "saludos"]),
        prefix in "[¡!¿. ]{0,3}",
        suffix in "[!?.… ]{0,4}",
        p in 0.0f64..1.0,
    ) {
        let (featurizer, overlay) = setup();
        let text = format!("{prefix}{word}{suffix}");
        let features = featurizer.featurize(&text).lexical;
        let probs = Probabilities::from_scores([1.0 - p, 0.0, p]);

        let decision = overlay.decide(&text, &probs, &features);
        prop_assert_eq!(decision.label, Sentiment::Neutral);
        prop_assert_eq!(decision.source, DecisionSource::Rule { name: "courtesy".to_string() });
    }
}
