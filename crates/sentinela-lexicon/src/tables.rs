//! Built-in Spanish lexicon tables
//!
//! Weights are positive magnitudes for word lists; emoji and slang weights are
//! signed (negative weight = negative polarity).

pub(crate) const EMOJIS: &[(&str, f64)] = &[
    // Positive
    ("❤️", 2.0),
    ("❤", 2.0),
    ("💖", 2.0),
    ("💕", 2.0),
    ("💙", 1.5),
    ("😍", 2.5),
    ("🥰", 2.5),
    ("😊", 1.5),
    ("🙂", 1.0),
    ("😀", 1.5),
    ("😃", 1.5),
    ("😄", 1.5),
    ("😁", 1.5),
    ("👍", 1.5),
    ("👏", 1.5),
    ("🙌", 2.0),
    ("🎉", 2.0),
    ("🥳", 2.0),
    ("🔥", 1.5),
    ("💪", 1.5),
    ("🏆", 2.0),
    ("⭐", 1.0),
    ("✨", 1.0),
    ("💯", 2.0),
    ("😂", 1.0),
    ("🤣", 1.0),
    // Negative
    ("😢", -2.0),
    ("😭", -2.0),
    ("😠", -2.5),
    ("😡", -2.5),
    ("🤬", -3.0),
    ("👎", -2.0),
    ("💔", -2.5),
    ("😤", -1.5),
    ("😓", -1.5),
    ("😩", -2.0),
    ("😞", -2.0),
    ("😔", -1.5),
    ("🤮", -3.0),
    ("💀", -1.0),
    ("😒", -1.5),
    ("🙄", -1.5),
    ("😕", -1.0),
    ("⚠️", -0.5),
    // Context-dependent, no intrinsic polarity
    ("😏", 0.0),
    ("🤔", 0.0),
    ("😐", 0.0),
    ("😅", 0.0),
    ("🙃", 0.0),
];

pub(crate) const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("excelente", 3.0),
    ("excelentes", 3.0),
    ("increíble", 2.5),
    ("maravilloso", 2.5),
    ("maravillosa", 2.5),
    ("genial", 2.0),
    ("bueno", 1.5),
    ("buena", 1.5),
    ("buen", 1.5),
    ("buenísimo", 2.5),
    ("mejor", 2.0),
    ("mejores", 2.0),
    ("orgullo", 2.5),
    ("orgulloso", 2.5),
    ("orgullosa", 2.5),
    ("feliz", 2.0),
    ("contento", 1.5),
    ("contenta", 1.5),
    ("alegre", 1.5),
    ("encanta", 2.5),
    ("amo", 2.5),
    ("adoro", 2.5),
    ("gusta", 1.5),
    ("perfecto", 2.0),
    ("perfecta", 2.0),
    ("fantástico", 2.5),
    ("espectacular", 2.5),
    ("impresionante", 2.0),
    ("brillante", 2.0),
    ("felicitaciones", 2.5),
    ("felicito", 2.0),
    ("bonito", 1.5),
    ("bonita", 1.5),
    ("hermoso", 2.0),
    ("hermosa", 2.0),
    ("lindo", 1.5),
    ("linda", 1.5),
    ("recomiendo", 2.0),
    ("admiro", 2.0),
    ("apoyo", 1.0),
    ("éxito", 2.0),
    ("exitoso", 2.0),
    ("calidad", 1.0),
    ("gracias", 0.5),
    ("ayuda", 0.5),
    ("decana", 1.0),
    ("logro", 1.5),
    ("ganamos", 1.5),
    ("bien", 1.0),
];

pub(crate) const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("pésimo", 3.0),
    ("pésima", 3.0),
    ("pesimo", 3.0),
    ("pesima", 3.0),
    ("horrible", 3.0),
    ("terrible", 3.0),
    ("malo", 2.0),
    ("mala", 2.0),
    ("mal", 1.5),
    ("malísimo", 2.5),
    ("lamentable", 2.5),
    ("decepción", 2.5),
    ("decepcionante", 2.5),
    ("odio", 3.0),
    ("detesto", 3.0),
    ("triste", 2.0),
    ("vergüenza", 2.5),
    ("verguenza", 2.5),
    ("peor", 2.5),
    ("peores", 2.5),
    ("problema", 1.5),
    ("problemas", 1.5),
    ("caos", 2.0),
    ("caótico", 2.0),
    ("desastre", 3.0),
    ("desastroso", 3.0),
    ("fatal", 2.5),
    ("deficiente", 2.0),
    ("ineficiente", 2.0),
    ("lento", 1.5),
    ("cerrado", 1.0),
    ("cerrada", 1.0),
    ("queja", 1.5),
    ("reclamo", 1.5),
    ("pena", 1.5),
    ("lástima", 2.0),
    ("asco", 3.0),
    ("basura", 3.0),
    ("injusto", 2.0),
    ("abandono", 2.0),
    ("corrupto", 3.0),
    ("corrupción", 3.0),
    ("robo", 3.0),
    ("indignante", 3.0),
    ("vergonzoso", 2.5),
    ("abuso", 2.5),
];

/// Regional slang, signed
pub(crate) const SLANG: &[(&str, f64)] = &[
    ("chévere", 2.0),
    ("chevere", 2.0),
    ("bacán", 2.0),
    ("bacan", 2.0),
    ("mostro", 2.0),
    ("trome", 2.0),
    ("crack", 2.0),
    ("joya", 1.5),
    ("roche", -1.5),
    ("piña", -1.5),
    ("misio", -1.0),
    ("asado", -1.5),
    ("palta", -1.0),
    ("huevada", -2.0),
    ("cagada", -2.5),
];

pub(crate) const NEGATIVE_PATTERNS: &[(&str, f64)] = &[
    ("no me gusta", 2.0),
    ("no sirve", 2.0),
    ("no funciona", 2.0),
    ("se cayó", 1.5),
    ("se cayo", 1.5),
    ("qué vergüenza", 2.5),
    ("que verguenza", 2.5),
    ("qué pena", 2.0),
    ("que pena", 2.0),
    ("qué asco", 3.0),
    ("que asco", 3.0),
    ("ya no aguanto", 2.5),
    ("nunca más", 2.0),
    ("mala gestión", 2.0),
    ("una burla", 2.5),
    ("no quiero", 1.5),
    ("da pena", 2.0),
    ("deja mucho que desear", 2.5),
    ("siempre cerrada", 1.5),
    ("siempre cerrado", 1.5),
];

pub(crate) const POSITIVE_PATTERNS: &[(&str, f64)] = &[
    ("lo mejor", 2.0),
    ("la mejor", 2.0),
    ("el mejor", 2.0),
    ("orgullo sanmarquino", 3.0),
    ("orgullo de", 2.0),
    ("me encanta", 2.5),
    ("muchas felicitaciones", 2.5),
    ("de corazón", 2.0),
    ("siempre san marcos", 2.5),
    ("decana de américa", 2.0),
    ("decana de america", 2.0),
    ("vale la pena", 2.0),
    ("sigan así", 2.0),
    ("sigue así", 2.0),
    ("nro 1", 2.0),
    ("número 1", 2.0),
];

pub(crate) const NEUTRAL_PATTERNS: &[(&str, f64)] = &[
    ("más o menos", 1.5),
    ("mas o menos", 1.5),
    ("ni fu ni fa", 2.0),
    ("no está mal", 1.0),
    ("no esta mal", 1.0),
    ("podría mejorar", 1.0),
    ("podria mejorar", 1.0),
    ("qué hora", 1.5),
    ("que hora", 1.5),
    ("cuál es", 1.0),
    ("cual es", 1.0),
    ("información", 1.0),
    ("informacion", 1.0),
    ("horario", 1.0),
    ("depende", 1.0),
];

pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("muy", 1.5),
    ("super", 1.5),
    ("súper", 1.5),
    ("demasiado", 1.5),
    ("totalmente", 1.5),
    ("bastante", 1.3),
    ("tan", 1.3),
    ("mucho", 1.3),
    ("realmente", 1.4),
    ("sumamente", 1.8),
    ("extremadamente", 2.0),
    ("increíblemente", 1.8),
];

pub(crate) const NEGATIONS: &[&str] = &[
    "no", "nunca", "jamás", "jamas", "tampoco", "ni", "nada", "sin", "nadie", "ningún", "ninguna",
    "ninguno",
];

/// Tokens that make up short acknowledgements
pub(crate) const COURTESY: &[&str] = &[
    "gracias", "graciass", "muchas", "mil", "ok", "okey", "okay", "oki", "vale", "listo", "saludos",
    "hola", "buenas", "buenos", "dias", "días", "tardes", "noches", "thanks", "thank", "you", "tqm",
    "entendido",
];

/// Informal contractions, expanded token-wise during cleaning
pub(crate) const CONTRACTIONS: &[(&str, &str)] = &[
    ("q", "que"),
    ("k", "que"),
    ("xq", "porque"),
    ("pq", "porque"),
    ("porq", "porque"),
    ("x", "por"),
    ("d", "de"),
    ("tb", "también"),
    ("tmb", "también"),
    ("bn", "bien"),
    ("tqm", "te quiero mucho"),
    ("pa", "para"),
    ("xfa", "por favor"),
    ("porfa", "por favor"),
    ("nd", "nada"),
    ("msj", "mensaje"),
    ("info", "información"),
];

/// Stop tokens removed before n-gram vectorization.
///
/// Negation and intensifier tokens are deliberately absent.
pub(crate) const STOPWORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "por", "un", "para", "con",
    "una", "su", "al", "lo", "como", "pero", "sus", "le", "ya", "o", "este", "porque", "esta",
    "entre", "cuando", "sobre", "también", "me", "hasta", "hay", "donde", "quien", "desde", "nos",
    "durante", "uno", "les", "contra", "ese", "eso", "ante", "e", "esto", "mí", "antes", "unos",
    "yo", "otro", "otras", "otra", "él", "esa", "estos", "quienes", "cual", "ella", "estar",
    "estas", "algo", "nosotros", "mi", "mis", "tú", "te", "ti", "tu", "tus", "ellas", "es", "son",
    "fue", "era", "ser", "ha", "han", "he", "esos", "esas", "estoy", "está", "están", "u",
];

// Contextual vocabulary

pub(crate) const EXAGGERATED_POSITIVE: &[&str] = &[
    "claro que sí",
    "claro que si",
    "qué maravilla",
    "que maravilla",
    "qué bonito",
    "que bonito",
    "por supuesto",
    "justo lo que necesitaba",
    "excelente",
    "increíble",
    "maravilloso",
    "maravillosa",
    "perfecto",
    "genial",
];

pub(crate) const CONTRASTIVE: &[&str] = &["pero", "aunque", "sin embargo", "no obstante"];

pub(crate) const RHETORICAL: &[&str] = &[
    "acaso",
    "hasta cuándo",
    "hasta cuando",
    "cómo es posible",
    "como es posible",
    "en serio",
    "de verdad",
    "quién",
];

pub(crate) const CONCESSION_MARKERS: &[&str] = &["a pesar de", "apesar de", "pese a", "aún con", "aun con"];

pub(crate) const STRONG_POSITIVE_CUES: &[&str] = &[
    "siempre",
    "corazón",
    "nro 1",
    "número 1",
    "mejor",
    "encanta",
    "orgullo",
    "amo",
    "excelente",
    "❤️",
    "❤",
    "💖",
    "🔥",
    "👏",
    "🙌",
    "🎉",
    "🥰",
];

pub(crate) const LAUGHING_EMOJIS: &[&str] = &["😂", "🤣"];

pub(crate) const WAIT_COMPLAINTS: &[&str] = &[
    "cola", "fila", "esperar", "espera", "esperando", "tardar", "tarda", "demora", "horas",
];

pub(crate) const BEST_TOKENS: &[&str] = &["mejor", "mejores"];

pub(crate) const WORST_TOKENS: &[&str] = &["peor", "peores"];

pub(crate) const HEDGES: &[&str] = &[
    "que yo sepa",
    "hasta donde sé",
    "hasta donde se",
    "no estoy seguro",
    "no estoy segura",
    "tal vez",
    "quizás",
    "quizas",
    "a lo mejor",
    "supongo",
];

pub(crate) const SARCASTIC_EMOJI: &str = "😏";
