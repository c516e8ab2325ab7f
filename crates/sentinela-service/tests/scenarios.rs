//! End-to-end scenarios against a small labeled corpus

use proptest::prelude::*;
use sentinela_core::{DecisionSource, FeatureSnapshot, Prediction, Probabilities, Sentiment};
use sentinela_service::{cache_key, InMemoryCache, PredictionCache, SentimentService, ServiceConfig, Table};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/comentarios.csv")
}

fn small_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.training.forest.n_trees = 15;
    config.training.boosting.n_estimators = 15;
    config
}

fn trained_with(config: ServiceConfig) -> SentimentService {
    let service = SentimentService::new(config).unwrap();
    service.load_dataset(&Table::from_path(fixture()).unwrap()).unwrap();
    service.train().unwrap();
    service
}

fn shared() -> &'static SentimentService {
    static SERVICE: OnceLock<SentimentService> = OnceLock::new();
    SERVICE.get_or_init(|| trained_with(small_config()))
}

#[test]
fn test_clear_praise_is_positive() {
    let prediction = shared().predict("Excelente universidad").unwrap();
    assert_eq!(prediction.label, Sentiment::Positive);
    assert!(prediction.confidence > 0.5, "confidence {}", prediction.confidence);
}

#[test]
fn test_clear_complaint_is_negative() {
    let prediction = shared().predict("Pésimo servicio").unwrap();
    assert_eq!(prediction.label, Sentiment::Negative);
}

#[test]
fn test_information_request_is_neutral() {
    let prediction = shared().predict("¿Cuál es el horario?").unwrap();
    assert_eq!(prediction.label, Sentiment::Neutral);
    assert_eq!(
        prediction.decided_by,
        DecisionSource::Rule {
            name: "informational".into()
        }
    );
}

#[test]
fn test_courtesy_is_neutral() {
    let prediction = shared().predict("Gracias").unwrap();
    assert_eq!(prediction.label, Sentiment::Neutral);
    assert_eq!(prediction.decided_by.to_string(), "rule:courtesy");
}

#[test]
fn test_batch_reports_failures_inline() {
    let texts = vec![
        "Excelente universidad".to_string(),
        "   ".to_string(),
        "Pésimo servicio".to_string(),
    ];
    let records = shared().analyze_batch(&texts, None).unwrap();

    assert_eq!(records.len(), 3);
    assert!(records[0].is_ok());
    assert_eq!(records[1].error.as_ref().map(|e| e.kind.as_str()), Some("input_error"));
    assert!(records[1].label.is_none());
    assert!(records[2].is_ok());
    assert_eq!(records[2].text, "Pésimo servicio");
}

#[test]
fn test_records_serialize_as_json_lines() {
    let ok = serde_json::to_value(shared().analyze_single("Excelente universidad")).unwrap();
    assert_eq!(ok["label"], "Positive");
    assert!(ok.get("error").is_none());
    assert!(ok["decided_by"]["type"].is_string());

    let failed = serde_json::to_value(shared().analyze_single("")).unwrap();
    assert!(failed.get("label").is_none());
    assert_eq!(failed["error"]["kind"], "input_error");
    assert_eq!(failed["confidence_level"], serde_json::to_value(sentinela_core::ConfidenceLevel::Low).unwrap());
}

#[test]
fn test_cancelled_batch_keeps_length() {
    let token = CancellationToken::new();
    token.cancel();
    let texts: Vec<String> = (0..5).map(|i| format!("comentario {i}")).collect();
    let records = shared().analyze_batch(&texts, Some(&token)).unwrap();

    assert_eq!(records.len(), texts.len());
    assert!(records
        .iter()
        .all(|r| r.error.as_ref().map(|e| e.kind.as_str()) == Some("cancelled")));
}

#[test]
fn test_oversized_inputs_are_rejected() {
    let service = shared();
    let long = "a".repeat(service.config().max_text_length + 1);
    assert_eq!(service.predict(&long).unwrap_err().kind(), "input_error");

    let batch = vec!["hola".to_string(); service.config().max_batch_size + 1];
    assert_eq!(service.analyze_batch(&batch, None).unwrap_err().kind(), "input_error");
}

#[test]
fn test_untrained_service_reports_error_record() {
    let service = SentimentService::new(small_config()).unwrap();
    assert!(!service.is_trained());

    let record = service.analyze_single("Excelente universidad");
    assert_eq!(record.error.map(|e| e.kind), Some("untrained_model".to_string()));
    assert!(record.probabilities.is_none());
    assert!(!service.model_info().is_trained);
}

#[test]
fn test_singleton_class_is_training_data_error() {
    let data = "\
texto,sentimiento
Excelente universidad,Positivo
Me encanta,Positivo
Genial noticia,Positivo
El examen es el lunes,Neutral
La charla será virtual,Neutral
El aula queda lejos,Neutral
Pésimo servicio,Negativo
";
    let service = SentimentService::new(small_config()).unwrap();
    service.load_dataset(&Table::from_csv(data.as_bytes()).unwrap()).unwrap();
    assert_eq!(service.train().unwrap_err().kind(), "training_data_error");
    assert!(!service.is_trained());
}

#[test]
fn test_train_without_dataset_fails() {
    let service = SentimentService::new(small_config()).unwrap();
    assert_eq!(service.train().unwrap_err().kind(), "training_data_error");
}

#[test]
fn test_dataset_and_model_info() {
    let service = shared();
    let info = service.dataset_info().unwrap();
    assert_eq!(info.total_rows, 72);
    assert_eq!(info.ingest.text_column, "Texto del comentario");
    assert_eq!(info.ingest.label_column, "Sentimiento");
    for share in &info.distribution {
        assert_eq!(share.count, 24);
        assert!((share.percentage - 33.33).abs() < 1e-9);
    }

    let model = service.model_info();
    assert!(model.is_trained);
    let metadata = model.metadata.unwrap();
    assert_eq!(metadata.train_size + metadata.test_size, 72);
    assert_eq!(model.rules.first().map(String::as_str), Some("courtesy"));
    assert!(model.n_features.unwrap() > 46);
}

#[test]
fn test_training_is_deterministic() {
    let other = trained_with(small_config());
    for text in ["Excelente trabajo", "Servicio lento", "La oficina abre el lunes"] {
        let a = shared().predict(text).unwrap();
        let b = other.predict(text).unwrap();
        assert!(a.same_outcome(&b), "{text}: {a:?} vs {b:?}");
    }
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models/sentinela.json");
    shared().save(Some(&path)).unwrap();

    let restored = SentimentService::new(small_config()).unwrap();
    restored.load(Some(&path)).unwrap();
    assert!(restored.is_trained());

    for text in ["Excelente universidad", "Pésimo servicio", "El examen es el sábado"] {
        let a = shared().predict(text).unwrap();
        let b = restored.predict(text).unwrap();
        assert_eq!(a.label, b.label, "{text}");
        assert_eq!(a.decided_by, b.decided_by, "{text}");
        for label in Sentiment::ALL {
            assert!((a.probabilities.get(label) - b.probabilities.get(label)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_load_missing_artifact_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = SentimentService::new(small_config()).unwrap();
    let err = service.load(Some(&dir.path().join("absent.json"))).unwrap_err();
    assert_eq!(err.kind(), "io_error");
}

fn cached_service(cache: Arc<InMemoryCache>) -> (SentimentService, tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    shared().save(Some(&path)).unwrap();

    let service = SentimentService::new(small_config()).unwrap().with_cache(cache);
    service.load(Some(&path)).unwrap();
    (service, dir, path)
}

#[test]
fn test_cache_serves_repeated_text() {
    let cache = Arc::new(InMemoryCache::new());
    let (service, _dir, _) = cached_service(cache.clone());

    let first = service.predict("Excelente universidad").unwrap();
    let second = service.predict("Excelente universidad").unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(first.timestamp, second.timestamp);
    assert!(first.same_outcome(&second));
}

#[test]
fn test_cache_keeps_case_variants_apart() {
    let cache = Arc::new(InMemoryCache::new());
    let (service, _dir, path) = cached_service(cache.clone());
    let uncached = SentimentService::new(small_config()).unwrap();
    uncached.load(Some(&path)).unwrap();

    service.predict("pésimo servicio").unwrap();
    let shouted = service.predict("PÉSIMO SERVICIO").unwrap();
    assert_eq!(cache.len(), 2);
    assert!(shouted.same_outcome(&uncached.predict("PÉSIMO SERVICIO").unwrap()));
}

#[test]
fn test_entries_from_replaced_artifact_are_not_served() {
    let cache = Arc::new(InMemoryCache::new());
    let (service, _dir, path) = cached_service(cache.clone());
    let text = "Excelente universidad";
    let planted = || {
        Prediction::new(
            Sentiment::Neutral,
            Probabilities::uniform(),
            FeatureSnapshot::default(),
            DecisionSource::Rule { name: "planted".into() },
        )
    };

    // Entries under the live generation are what `predict` reads
    let live = service.generation().unwrap();
    cache.set(&cache_key(live, text), planted(), Duration::from_secs(60));
    assert_eq!(service.predict(text).unwrap().decided_by.to_string(), "rule:planted");

    // A write that lands after a swap carries the old generation
    service.load(Some(&path)).unwrap();
    let current = service.generation().unwrap();
    assert_eq!(current, live + 1);
    cache.set(&cache_key(live, text), planted(), Duration::from_secs(60));

    let fresh = service.predict(text).unwrap();
    assert_ne!(fresh.decided_by.to_string(), "rule:planted");
    assert_eq!(fresh.label, Sentiment::Positive);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_probabilities_sum_to_one(text in "[a-záéíóúñ¿?! ]{1,60}") {
        prop_assume!(!text.trim().is_empty());
        let prediction = shared().predict(&text).unwrap();
        prop_assert!((prediction.probabilities.total() - 1.0).abs() < 1e-6);
        prop_assert!(prediction.confidence >= prediction.probabilities.get(prediction.label) - 1e-12);
    }
}
