//! Text and label column resolution over table headers

use sentinela_core::{Error, Result};

/// A header pattern: every keyword must occur in the trimmed, lowercased header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPattern {
    keywords: Vec<String>,
}

impl ColumnPattern {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(|k| k.into().to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        !self.keywords.is_empty() && self.keywords.iter().all(|k| header.contains(k.as_str()))
    }
}

/// Header indices of the resolved columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub text: usize,
    pub label: usize,
}

/// Resolves columns by an ordered list of candidate patterns.
///
/// Candidates are tried in priority order; the first header matching a
/// candidate wins.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    text: Vec<ColumnPattern>,
    label: Vec<ColumnPattern>,
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self {
            text: vec![
                ColumnPattern::new(["texto", "comentario"]),
                ColumnPattern::new(["texto"]),
                ColumnPattern::new(["comentario"]),
                ColumnPattern::new(["comment"]),
                ColumnPattern::new(["text"]),
            ],
            label: vec![
                ColumnPattern::new(["sentimiento"]),
                ColumnPattern::new(["sentiment"]),
                ColumnPattern::new(["label"]),
                ColumnPattern::new(["rating"]),
            ],
        }
    }
}

impl ColumnResolver {
    pub fn new(text: Vec<ColumnPattern>, label: Vec<ColumnPattern>) -> Self {
        Self { text, label }
    }

    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns> {
        let text = find(&self.text, headers, None).ok_or_else(|| {
            Error::training_data(format!("no text column among headers {headers:?}"))
        })?;
        let label = find(&self.label, headers, Some(text)).ok_or_else(|| {
            Error::training_data(format!("no label column among headers {headers:?}"))
        })?;
        Ok(ResolvedColumns { text, label })
    }
}

fn find(patterns: &[ColumnPattern], headers: &[String], skip: Option<usize>) -> Option<usize> {
    patterns.iter().find_map(|pattern| {
        headers
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .find(|(_, h)| pattern.matches(h))
            .map(|(i, _)| i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compound_pattern_has_priority() {
        let h = headers(&["Texto", "Texto del comentario", "Sentimiento"]);
        let resolved = ColumnResolver::default().resolve(&h).unwrap();
        assert_eq!(resolved, ResolvedColumns { text: 1, label: 2 });
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let h = headers(&["  id ", " COMMENT ", "Label "]);
        let resolved = ColumnResolver::default().resolve(&h).unwrap();
        assert_eq!(resolved, ResolvedColumns { text: 1, label: 2 });
    }

    #[test]
    fn test_priority_order_beats_header_order() {
        let h = headers(&["rating", "text", "sentiment"]);
        let resolved = ColumnResolver::default().resolve(&h).unwrap();
        assert_eq!(resolved.label, 2);
    }

    #[test]
    fn test_missing_label_is_training_data_error() {
        let err = ColumnResolver::default()
            .resolve(&headers(&["comentario", "fecha"]))
            .unwrap_err();
        assert_eq!(err.kind(), "training_data_error");
    }
}
