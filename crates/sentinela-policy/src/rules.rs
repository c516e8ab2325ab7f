//! Built-in overlay rules, in evaluation order

use sentinela_core::{Result, Sentiment};
use sentinela_lexicon::CueSet;

use crate::config::OverlayConfig;
use crate::rule::{Rule, RuleContext};

/// Explicitly negative phrases that outweigh a positive emoji
const NEGATIVE_PHRASES: &[&str] = &[
    "no me gusta",
    "no me gustó",
    "no me gusto",
    "odio",
    "detesto",
    "no quiero",
    "no sirve",
    "qué asco",
    "que asco",
];

/// Evidence that something is broken
const PROBLEM_KEYWORDS: &[&str] = &[
    "se cayó",
    "se cayo",
    "se cae",
    "no funciona",
    "no carga",
    "roto",
    "rota",
    "problema",
    "problemas",
    "falla",
    "caído",
    "caida",
    "caída",
    "error",
];

/// Sad context that turns laughter into mockery
const LAUGH_NEGATIVE_CONTEXT: &[&str] = &["pena", "triste", "queja", "problema", "vergüenza", "verguenza"];

const AFFECTION: &[&str] = &["amo", "me encanta", "adoro"];

const INFO_KEYWORDS: &[&str] = &[
    "horario",
    "horarios",
    "link",
    "enlace",
    "fecha",
    "fechas",
    "dónde",
    "cuándo",
    "cuál",
    "información",
    "informacion",
    "info",
    "inscripción",
    "inscripciones",
    "matrícula",
    "requisitos",
    "convocatoria",
    "informes",
    "datos",
];

/// Words strong enough to keep a question or an info request out of Neutral
const STRONG_SENTIMENT: &[&str] = &[
    "excelente",
    "increíble",
    "perfecto",
    "pésimo",
    "pésima",
    "horrible",
    "terrible",
    "odio",
    "maravilloso",
    "maravillosa",
    "genial",
    "amo",
    "me encanta",
    "asco",
    "lo mejor",
    "lo peor",
    "detesto",
];

/// Colloquial "so-so" expressions
const LUKEWARM_EXPRESSIONS: &[&str] = &[
    "no está mal",
    "no esta mal",
    "está bien",
    "esta bien",
    "más o menos",
    "mas o menos",
    "ni fu ni fa",
    "no es perfecto",
    "podría mejorar",
    "podria mejorar",
    "regular",
    "aceptable",
];

const LUKEWARM_BLOCKERS: &[&str] = &["excelente", "increíble", "perfecto", "pésimo", "horrible", "odio"];

/// Emoji weight from which an emoji counts as clearly positive
const POSITIVE_EMOJI_WEIGHT: f64 = 1.5;

/// Emoji weight up to which an emoji counts as clearly negative
const NEGATIVE_EMOJI_WEIGHT: f64 = -1.5;

/// Emoji weight magnitude treated as strong sentiment
const STRONG_EMOJI_WEIGHT: f64 = 2.0;

/// The built-in chain: courtesy, concession, emoji contradiction, sarcasm,
/// informational, lukewarm
pub fn default_rules(config: &OverlayConfig) -> Result<Vec<Box<dyn Rule>>> {
    Ok(vec![
        Box::new(CourtesyRule),
        Box::new(ConcessionRule::default()),
        Box::new(EmojiContradictionRule::new()?),
        Box::new(SarcasmRule::new()?),
        Box::new(InformationalRule::new()?),
        Box::new(LukewarmRule::new(config.lukewarm_neutral)?),
    ])
}

/// Short acknowledgements and very short comments are Neutral
pub struct CourtesyRule;

impl Rule for CourtesyRule {
    fn name(&self) -> &'static str {
        "courtesy"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment> {
        ctx.features.is_simple_courtesy.then_some(Sentiment::Neutral)
    }
}

/// "A pesar de X" with enough strong positive cues is Positive
pub struct ConcessionRule {
    min_cues: usize,
}

impl Default for ConcessionRule {
    fn default() -> Self {
        Self { min_cues: 2 }
    }
}

impl Rule for ConcessionRule {
    fn name(&self) -> &'static str {
        "concession"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment> {
        let marker = ctx.lexicon.context.concession.is_match(&ctx.lowered);
        (marker && ctx.features.strong_positive_cues >= self.min_cues).then_some(Sentiment::Positive)
    }
}

/// Text polarity wins over emoji polarity
pub struct EmojiContradictionRule {
    negative_phrases: CueSet,
}

impl EmojiContradictionRule {
    pub fn new() -> Result<Self> {
        Ok(Self {
            negative_phrases: CueSet::new("negative phrase", NEGATIVE_PHRASES)?,
        })
    }
}

impl Rule for EmojiContradictionRule {
    fn name(&self) -> &'static str {
        "emoji_contradiction"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment> {
        let negative_text_positive_emoji = self.negative_phrases.is_match(&ctx.lowered)
            && ctx.has_emoji_at_least(POSITIVE_EMOJI_WEIGHT);
        let positive_text_negative_emoji =
            ctx.features.pos_word_score > 0.0 && ctx.has_emoji_at_most(NEGATIVE_EMOJI_WEIGHT);

        (negative_text_positive_emoji || positive_text_negative_emoji).then_some(Sentiment::Negative)
    }
}

/// Praise undercut by a smirk, a laugh or an obvious problem is Negative
pub struct SarcasmRule {
    problems: CueSet,
    laugh_context: CueSet,
    affection: CueSet,
}

impl SarcasmRule {
    pub fn new() -> Result<Self> {
        Ok(Self {
            problems: CueSet::new("problem keyword", PROBLEM_KEYWORDS)?,
            laugh_context: CueSet::new("laugh context", LAUGH_NEGATIVE_CONTEXT)?,
            affection: CueSet::new("affection", AFFECTION)?,
        })
    }
}

impl Rule for SarcasmRule {
    fn name(&self) -> &'static str {
        "sarcasm"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment> {
        let vocab = &ctx.lexicon.context;
        let lowered = ctx.lowered.as_str();
        let praise = vocab.exaggerated_positive.is_match(lowered);
        let smirk = ctx.features.context.has_sarcastic_emoji || ctx.text.contains(vocab.sarcastic_emoji);
        let laughing = vocab.laughing_emojis.is_match(ctx.text);

        let sarcastic = (praise && smirk)
            || (praise && self.problems.is_match(lowered))
            || (praise && laughing)
            || (laughing && self.laugh_context.is_match(lowered))
            || ctx.features.context.has_ironic_laugh_complaint
            || (self.affection.is_match(lowered) && vocab.wait_complaints.is_match(lowered));

        sarcastic.then_some(Sentiment::Negative)
    }
}

/// Questions and information requests without strong sentiment are Neutral
pub struct InformationalRule {
    info: CueSet,
    strong: CueSet,
}

impl InformationalRule {
    pub fn new() -> Result<Self> {
        Ok(Self {
            info: CueSet::new("informational keyword", INFO_KEYWORDS)?,
            strong: CueSet::new("strong sentiment", STRONG_SENTIMENT)?,
        })
    }

    fn has_strong_sentiment(&self, ctx: &RuleContext<'_>) -> bool {
        let f = ctx.features;
        self.strong.is_match(&ctx.lowered)
            || f.pos_word_score.max(f.neg_word_score) >= 3.0
            || f.neg_pattern_score > 0.0
            || f.pos_pattern_score > 0.0
            || ctx
                .lexicon
                .emoji_matches(ctx.text)
                .any(|(_, _, w)| w.abs() >= STRONG_EMOJI_WEIGHT)
    }
}

impl Rule for InformationalRule {
    fn name(&self) -> &'static str {
        "informational"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment> {
        if self.has_strong_sentiment(ctx) {
            return None;
        }
        let asks_info = self.info.is_match(&ctx.lowered);
        let plain_question = ctx.is_question() && !ctx.features.context.rhetorical_question;

        // "gracias por" + info request is covered by asks_info
        (asks_info || plain_question).then_some(Sentiment::Neutral)
    }
}

/// "Más o menos", "ni fu ni fa" and friends are Neutral when the model
/// already leans that way
pub struct LukewarmRule {
    expressions: CueSet,
    blockers: CueSet,
    neutral_floor: f64,
}

impl LukewarmRule {
    pub fn new(neutral_floor: f64) -> Result<Self> {
        Ok(Self {
            expressions: CueSet::new("lukewarm expression", LUKEWARM_EXPRESSIONS)?,
            blockers: CueSet::new("lukewarm blocker", LUKEWARM_BLOCKERS)?,
            neutral_floor,
        })
    }
}

impl Rule for LukewarmRule {
    fn name(&self) -> &'static str {
        "lukewarm"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Sentiment> {
        let lukewarm = self.expressions.is_match(&ctx.lowered)
            && !self.blockers.is_match(&ctx.lowered)
            && ctx.probabilities.neutral > self.neutral_floor;
        lukewarm.then_some(Sentiment::Neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinela_core::Probabilities;
    use sentinela_lexicon::{Featurizer, LexicalFeatures};

    struct Fixture {
        featurizer: Featurizer,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                featurizer: Featurizer::spanish().unwrap(),
            }
        }

        fn features(&self, text: &str) -> LexicalFeatures {
            self.featurizer.featurize(text).lexical
        }

        fn eval(&self, rule: &dyn Rule, text: &str, probs: Probabilities) -> Option<Sentiment> {
            let features = self.features(text);
            let ctx = RuleContext::new(text, &probs, &features, self.featurizer.lexicon());
            rule.evaluate(&ctx)
        }
    }

    fn flat() -> Probabilities {
        Probabilities::uniform()
    }

    #[test]
    fn test_courtesy_rule() {
        let fx = Fixture::new();
        assert_eq!(fx.eval(&CourtesyRule, "Gracias!!", flat()), Some(Sentiment::Neutral));
        assert_eq!(fx.eval(&CourtesyRule, "ok 👍", flat()), Some(Sentiment::Neutral));
        assert_eq!(fx.eval(&CourtesyRule, "Excelente universidad", flat()), None);
    }

    #[test]
    fn test_concession_needs_two_cues() {
        let fx = Fixture::new();
        let rule = ConcessionRule::default();
        let low_positive = Probabilities::from_scores([0.6, 0.3, 0.1]);
        assert_eq!(
            fx.eval(&rule, "Nro 1 a pesar de Jerí 🙌", low_positive),
            Some(Sentiment::Positive)
        );
        assert_eq!(fx.eval(&rule, "A pesar de todo, bien", flat()), None);
    }

    #[test]
    fn test_emoji_contradiction() {
        let fx = Fixture::new();
        let rule = EmojiContradictionRule::new().unwrap();
        let positive = Probabilities::from_scores([0.1, 0.2, 0.7]);
        assert_eq!(fx.eval(&rule, "No me gusta nada esto ❤️", positive), Some(Sentiment::Negative));
        assert_eq!(fx.eval(&rule, "Estoy muy feliz 😢", positive), Some(Sentiment::Negative));
        assert_eq!(fx.eval(&rule, "Me gusta mucho ❤️", positive), None);
    }

    #[test]
    fn test_sarcasm() {
        let fx = Fixture::new();
        let rule = SarcasmRule::new().unwrap();
        let positive = Probabilities::from_scores([0.1, 0.2, 0.7]);
        for text in [
            "Claro que sí, excelente servicio 😏",
            "Increíble, se cayó el sistema otra vez 🔥",
            "Amo esperar 3 horas en la cola 👏",
            "Que pena me da 😂",
        ] {
            assert_eq!(fx.eval(&rule, text, positive), Some(Sentiment::Negative), "{text}");
        }
        assert_eq!(fx.eval(&rule, "Excelente servicio de la biblioteca", positive), None);
    }

    #[test]
    fn test_informational() {
        let fx = Fixture::new();
        let rule = InformationalRule::new().unwrap();
        assert_eq!(fx.eval(&rule, "¿Cuál es el horario?", flat()), Some(Sentiment::Neutral));
        assert_eq!(
            fx.eval(&rule, "Gracias por la información del horario", flat()),
            Some(Sentiment::Neutral)
        );
        assert_eq!(fx.eval(&rule, "¿Por qué es tan pésimo el servicio?", flat()), None);
        assert_eq!(fx.eval(&rule, "Gracias por ayudarme ❤️", flat()), None);
    }

    #[test]
    fn test_lukewarm_requires_neutral_mass() {
        let fx = Fixture::new();
        let rule = LukewarmRule::new(0.3).unwrap();
        let leaning = Probabilities::from_scores([0.2, 0.35, 0.45]);
        let confident = Probabilities::from_scores([0.05, 0.15, 0.8]);
        assert_eq!(
            fx.eval(&rule, "Está bien, más o menos", leaning),
            Some(Sentiment::Neutral)
        );
        assert_eq!(fx.eval(&rule, "Está bien, más o menos", confident), None);
        assert_eq!(fx.eval(&rule, "Más o menos, pero el profe es excelente", leaning), None);
    }

    #[test]
    fn test_default_chain_order() {
        let names: Vec<&str> = default_rules(&OverlayConfig::default())
            .unwrap()
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(
            names,
            vec!["courtesy", "concession", "emoji_contradiction", "sarcasm", "informational", "lukewarm"]
        );
    }
}
