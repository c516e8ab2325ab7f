//! Prediction cache
//!
//! Purely a latency optimization: entries are keyed by a hash of the
//! artifact generation and the exact text, and expire after a TTL.
//! Correctness never depends on it.

use parking_lot::RwLock;
use sentinela_core::Prediction;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache interface consulted by the service around single analyses
pub trait PredictionCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Prediction>;

    fn set(&self, key: &str, value: Prediction, ttl: Duration);

    /// Remove an entry, returning whether it existed
    fn delete(&self, key: &str) -> bool;

    fn exists(&self, key: &str) -> bool;

    /// Drop every entry
    fn clear(&self);
}

/// SHA-256 of the artifact generation and the exact text.
///
/// Casing and spacing are model inputs, so the text is hashed unchanged.
pub fn cache_key(generation: u64, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(generation.to_le_bytes());
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

struct Entry {
    value: Prediction,
    expires_at: Instant,
}

/// In-process cache with per-entry expiry
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.write().retain(|_, e| e.expires_at > now);
    }
}

impl PredictionCache for InMemoryCache {
    fn get(&self, key: &str) -> Option<Prediction> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone())
    }

    fn set(&self, key: &str, value: Prediction, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .write()
            .insert(key.to_string(), Entry { value, expires_at });
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinela_core::{DecisionSource, FeatureSnapshot, Probabilities, Sentiment};

    fn prediction() -> Prediction {
        Prediction::new(
            Sentiment::Positive,
            Probabilities::from_scores([0.1, 0.2, 0.7]),
            FeatureSnapshot::default(),
            DecisionSource::Threshold,
        )
    }

    #[test]
    fn test_key_keeps_case_and_spacing() {
        assert_eq!(cache_key(1, "Excelente universidad"), cache_key(1, "Excelente universidad"));
        assert_ne!(cache_key(1, "PÉSIMO SERVICIO"), cache_key(1, "pésimo servicio"));
        assert_ne!(cache_key(1, "pésimo  servicio"), cache_key(1, "pésimo servicio"));
        assert_eq!(cache_key(1, "x").len(), 64);
    }

    #[test]
    fn test_key_depends_on_generation() {
        assert_ne!(cache_key(1, "Excelente"), cache_key(2, "Excelente"));
    }

    #[test]
    fn test_set_get_delete() {
        let cache = InMemoryCache::new();
        let key = cache_key(1, "Excelente");
        assert!(!cache.exists(&key));

        cache.set(&key, prediction(), Duration::from_secs(60));
        assert!(cache.exists(&key));
        assert_eq!(cache.get(&key).map(|p| p.label), Some(Sentiment::Positive));
        assert_eq!(cache.len(), 1);

        assert!(cache.delete(&key));
        assert!(!cache.delete(&key));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entries_are_invisible() {
        let cache = InMemoryCache::new();
        cache.set("k", prediction(), Duration::ZERO);
        assert!(cache.get("k").is_none());
        assert!(!cache.exists("k"));

        cache.purge_expired();
        assert!(!cache.delete("k"));
    }
}
