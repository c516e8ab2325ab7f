//! Property tests for the text analysis pipeline

use proptest::prelude::*;
use sentinela_lexicon::{Featurizer, TextFeatures};

fn featurizer() -> Featurizer {
    Featurizer::spanish().expect("built-in lexicon")
}

proptest! {
    #[test]
    fn cleaning_is_idempotent(text in "\\PC{0,80}") {
        let featurizer = featurizer();
        let cleaner = featurizer.scorer().cleaner();
        let once = cleaner.clean(&text);
        prop_assert_eq!(cleaner.clean(&once), once);
    }

    #[test]
    fn spanish_like_cleaning_is_idempotent(
        words in prop::collection::vec("[a-zA-ZáéíóúñÑ!?¿¡@#.]{1,10}", 0..12)
    ) {
        let featurizer = featurizer();
        let cleaner = featurizer.scorer().cleaner();
        let text = words.join(" ");
        let once = cleaner.clean(&text);
        prop_assert_eq!(cleaner.clean(&once), once);
    }

    #[test]
    fn featurization_never_panics_and_is_finite(text in "\\PC{0,120}") {
        let features = featurizer().featurize(&text);
        let row = features.dense();
        prop_assert_eq!(row.len(), TextFeatures::columns().len());
        prop_assert!(row.iter().all(|v| v.is_finite()));
        prop_assert!(features.lexical.overall_sentiment.abs() <= 1.0);
    }

    #[test]
    fn negation_flips_direction(
        word in prop::sample::select(vec!["bueno", "excelente", "genial", "perfecto", "malo", "horrible", "terrible"])
    ) {
        let featurizer = featurizer();
        let plain = featurizer.featurize(&format!("el servicio es {word} hoy")).lexical;
        let negated = featurizer.featurize(&format!("el servicio no es {word} hoy")).lexical;
        prop_assert!(plain.sentiment_diff != 0.0);
        prop_assert!(plain.sentiment_diff.signum() == -negated.sentiment_diff.signum());
    }

    #[test]
    fn courtesy_ignores_punctuation(
        phrase in prop::sample::select(vec!["gracias", "muchas gracias", "ok", "hola", "saludos", "buenas tardes"]),
        punct in "[!?.¡¿ ]{0,4}"
    ) {
        let features = featurizer().featurize(&format!("{punct}{phrase}{punct}"));
        prop_assert!(features.lexical.is_simple_courtesy);
    }
}
