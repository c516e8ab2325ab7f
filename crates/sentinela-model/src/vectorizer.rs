//! N-gram TF-IDF vectorizer
//!
//! Vocabulary is fixed at fit time: terms are pruned by document frequency,
//! capped to the most frequent `max_features`, then indexed alphabetically.

use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::TfidfConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    stopwords: HashSet<String>,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(config: TfidfConfig, stopwords: impl IntoIterator<Item = String>) -> Self {
        Self {
            config,
            stopwords: stopwords.into_iter().collect(),
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
        }
    }

    /// N-grams of a whitespace-tokenized document, stop tokens removed first
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let tokens: Vec<&str> = document
            .split_whitespace()
            .filter(|t| !self.stopwords.contains(*t))
            .collect();

        let min_n = self.config.ngram_min.max(1);
        let max_n = self.config.ngram_max.max(min_n);

        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if tokens.len() < n {
                break;
            }
            grams.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        grams
    }

    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(Error::training_data("cannot fit vectorizer on zero documents"));
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let grams = self.analyze(doc);
            for gram in &grams {
                *term_freq.entry(gram.clone()).or_insert(0) += 1;
            }
            let unique: HashSet<String> = grams.into_iter().collect();
            for gram in unique {
                *doc_freq.entry(gram).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len();
        let max_count = (self.config.max_df * n_docs as f64).floor() as usize;

        let mut kept: Vec<(String, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.config.min_df && *df <= max_count)
            .collect();

        // Most frequent first, alphabetical among equals
        kept.sort_by(|a, b| {
            let fa = term_freq.get(&a.0).copied().unwrap_or(0);
            let fb = term_freq.get(&b.0).copied().unwrap_or(0);
            fb.cmp(&fa).then_with(|| a.0.cmp(&b.0))
        });
        kept.truncate(self.config.max_features);
        kept.sort_by(|a, b| a.0.cmp(&b.0));

        if kept.is_empty() {
            return Err(Error::training_data(format!(
                "no n-gram survives document-frequency pruning (min_df={}, max_df={})",
                self.config.min_df, self.config.max_df
            )));
        }

        self.vocabulary.clear();
        self.terms.clear();
        self.idf.clear();
        for (idx, (term, df)) in kept.into_iter().enumerate() {
            // Smoothed idf
            self.idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
            self.vocabulary.insert(term.clone(), idx);
            self.terms.push(term);
        }

        Ok(())
    }

    /// L2-normalized TF-IDF vector; unknown terms are ignored
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.terms.len()];
        for gram in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                vector[idx] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<String> {
        [
            "excelente universidad",
            "excelente atención",
            "pésimo servicio",
            "pésimo servicio de la universidad",
            "horario de la biblioteca",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn vectorizer(min_df: usize) -> TfidfVectorizer {
        TfidfVectorizer::new(
            TfidfConfig {
                min_df,
                max_df: 1.0,
                ..TfidfConfig::default()
            },
            vec!["de".to_string(), "la".to_string()],
        )
    }

    #[test]
    fn test_bigrams_skip_stopwords() {
        let v = vectorizer(1);
        assert_eq!(
            v.analyze("servicio de la universidad"),
            vec!["servicio", "universidad", "servicio universidad"]
        );
    }

    #[test]
    fn test_min_df_prunes() {
        let mut v = vectorizer(2);
        v.fit(&docs()).unwrap();
        assert_eq!(
            v.terms(),
            &["excelente", "pésimo", "pésimo servicio", "servicio", "universidad"]
        );
    }

    #[test]
    fn test_transform_is_normalized() {
        let mut v = vectorizer(1);
        v.fit(&docs()).unwrap();
        let vector = v.transform("excelente universidad");
        let norm: f64 = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(v.transform("palabras desconocidas").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_empty_vocabulary_is_training_error() {
        let mut v = vectorizer(10);
        let err = v.fit(&docs()).unwrap_err();
        assert_eq!(err.kind(), "training_data_error");
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut v = TfidfVectorizer::new(
            TfidfConfig {
                min_df: 1,
                max_df: 1.0,
                max_features: 2,
                ..TfidfConfig::default()
            },
            vec!["de".to_string(), "la".to_string()],
        );
        v.fit(&docs()).unwrap();
        // All surviving terms occur twice; ties resolve alphabetically
        assert_eq!(v.terms(), &["excelente", "pésimo"]);
    }
}
