//! Text normalization
//!
//! Cleaning is idempotent: feeding cleaned text back through [`TextCleaner::clean`]
//! returns it unchanged.

use regex::Regex;
use sentinela_core::{Error, Result};
use std::sync::Arc;

use crate::lexicon::SentimentLexicon;

pub const POSITIVE_EMOJI_TOKEN: &str = "emojipositivo";
pub const NEGATIVE_EMOJI_TOKEN: &str = "emojinegativo";
pub const URL_TOKEN: &str = "urltoken";
pub const MENTION_TOKEN: &str = "mentiontoken";
pub const HASHTAG_TOKEN: &str = "hashtagtoken";

/// Normalizes raw comments into lowercase, letter-only token streams
#[derive(Clone)]
pub struct TextCleaner {
    lexicon: Arc<SentimentLexicon>,
    url_regex: Regex,
    mention_regex: Regex,
    hashtag_regex: Regex,
    non_letter_regex: Regex,
}

impl TextCleaner {
    pub fn new(lexicon: Arc<SentimentLexicon>) -> Result<Self> {
        Ok(Self {
            lexicon,
            url_regex: Regex::new(r"https?://\S+|www\.\S+")
                .map_err(|e| Error::config(format!("Failed to compile URL regex: {e}")))?,
            mention_regex: Regex::new(r"@\w+")
                .map_err(|e| Error::config(format!("Failed to compile mention regex: {e}")))?,
            hashtag_regex: Regex::new(r"#\w+")
                .map_err(|e| Error::config(format!("Failed to compile hashtag regex: {e}")))?,
            non_letter_regex: Regex::new(r"[^a-záéíóúüñ\s]")
                .map_err(|e| Error::config(format!("Failed to compile letter regex: {e}")))?,
        })
    }

    /// Full cleaning pipeline
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let with_sentinels = self.replace_emoji(&lowered);

        let replaced = self.url_regex.replace_all(&with_sentinels, " urltoken ");
        let replaced = self.mention_regex.replace_all(&replaced, " mentiontoken ");
        let replaced = self.hashtag_regex.replace_all(&replaced, " hashtagtoken ");

        let collapsed = collapse_runs(&replaced);
        let letters_only = self.non_letter_regex.replace_all(&collapsed, " ");

        let mut out = String::with_capacity(letters_only.len());
        for token in letters_only.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(self.lexicon.expand_contraction(token).unwrap_or(token));
        }
        out
    }

    /// Light normalization used by the courtesy shortcut.
    ///
    /// Emoji and punctuation are dropped, contractions are left as written.
    pub fn courtesy_tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut without_emoji = String::with_capacity(lowered.len());
        let mut last = 0;
        for (start, end, _) in self.lexicon.emoji_matches(&lowered) {
            without_emoji.push_str(&lowered[last..start]);
            without_emoji.push(' ');
            last = end;
        }
        without_emoji.push_str(&lowered[last..]);

        let collapsed = collapse_runs(&without_emoji);
        self.non_letter_regex
            .replace_all(&collapsed, " ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    fn replace_emoji(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 16);
        let mut last = 0;
        for (start, end, weight) in self.lexicon.emoji_matches(text) {
            out.push_str(&text[last..start]);
            out.push(' ');
            if weight > 0.0 {
                out.push_str(POSITIVE_EMOJI_TOKEN);
            } else if weight < 0.0 {
                out.push_str(NEGATIVE_EMOJI_TOKEN);
            }
            out.push(' ');
            last = end;
        }
        out.push_str(&text[last..]);
        out
    }
}

/// Collapse runs of three or more identical characters to two
pub fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> TextCleaner {
        TextCleaner::new(Arc::new(SentimentLexicon::spanish().unwrap())).unwrap()
    }

    #[test]
    fn test_clean_basic() {
        let cleaned = cleaner().clean("¡¡Excelente Universidad!! 😍 @sanmarcos #orgullo");
        assert_eq!(
            cleaned,
            "excelente universidad emojipositivo mentiontoken hashtagtoken"
        );
    }

    #[test]
    fn test_clean_urls_and_contractions() {
        let cleaned = cleaner().clean("xq no ponen la info en https://unmsm.edu.pe/x?y=1");
        assert_eq!(cleaned, "porque no ponen la información en urltoken");
    }

    #[test]
    fn test_collapse_elongation() {
        assert_eq!(collapse_runs("siiiii"), "sii");
        assert_eq!(cleaner().clean("Graciaaaas!!!"), "graciaas");
    }

    #[test]
    fn test_accents_preserved() {
        assert_eq!(cleaner().clean("Pésimo, ¿dónde está?"), "pésimo dónde está");
    }

    #[test]
    fn test_neutral_emoji_removed() {
        assert_eq!(cleaner().clean("bueno 🤔"), "bueno");
        assert_eq!(cleaner().clean("mal 😢"), "mal emojinegativo");
    }

    #[test]
    fn test_idempotent_on_examples() {
        let cleaner = cleaner();
        for text in [
            "Holaaaa xq no responden??? 😡😡",
            "tqm San Marcos ❤️ www.unmsm.edu.pe",
            "   ",
            "Ñandú ÜBER",
        ] {
            let once = cleaner.clean(text);
            assert_eq!(cleaner.clean(&once), once, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn test_courtesy_tokens_keep_contractions() {
        assert_eq!(cleaner().courtesy_tokens("Gracias!!! 😊"), vec!["gracias"]);
        assert_eq!(cleaner().courtesy_tokens("tqm"), vec!["tqm"]);
    }
}
