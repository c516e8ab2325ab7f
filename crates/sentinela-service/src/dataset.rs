//! Dataset ingestion
//!
//! No row is ever dropped. Blank, null or unmapped labels become Neutral and
//! blank texts become [`PLACEHOLDER_TEXT`]; both are counted in the
//! [`IngestReport`].

use sentinela_core::{Error, Result, Sentiment};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::columns::ColumnResolver;

/// Text stored for rows whose text cell is blank
pub const PLACEHOLDER_TEXT: &str = "[sin texto]";

/// Label cells treated as missing
const NULL_LABELS: &[&str] = &["", "nan", "null", "none", "n/a", "na", "-"];

/// A header row plus string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a CSV with a header row; short records are padded with blanks
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record.map_err(csv_error)?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv(file)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn csv_error(e: csv::Error) -> Error {
    Error::training_data(format!("unreadable CSV: {e}"))
}

/// Outcome of normalizing one label cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedLabel {
    /// Recognized label
    Mapped(Sentiment),
    /// Blank, null or unrecognized, defaulted to Neutral
    Defaulted,
}

impl NormalizedLabel {
    pub fn sentiment(self) -> Sentiment {
        match self {
            Self::Mapped(s) => s,
            Self::Defaulted => Sentiment::Neutral,
        }
    }
}

/// Maps free-form label strings onto the three classes by substring keywords.
///
/// Negative keywords are checked before positive ones, then neutral ones.
#[derive(Debug, Clone)]
pub struct LabelNormalizer {
    negative: Vec<&'static str>,
    positive: Vec<&'static str>,
    neutral: Vec<&'static str>,
}

impl Default for LabelNormalizer {
    fn default() -> Self {
        Self {
            negative: vec![
                "negativ", "neg/", "mal", "trist", "frustrac", "enojo", "molest", "decepc", "critic",
                "queja", "negative", "bad",
            ],
            positive: vec![
                "positiv", "posit/", "buen", "excel", "alegr", "feliz", "orgullo", "admirac",
                "entusias", "positive", "good",
            ],
            neutral: vec!["neutr", "indiferen", "informativ"],
        }
    }
}

impl LabelNormalizer {
    pub fn normalize(&self, raw: &str) -> NormalizedLabel {
        let label = raw.trim().to_lowercase();
        if NULL_LABELS.contains(&label.as_str()) {
            return NormalizedLabel::Defaulted;
        }
        let hit = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));
        if hit(&self.negative) {
            NormalizedLabel::Mapped(Sentiment::Negative)
        } else if hit(&self.positive) {
            NormalizedLabel::Mapped(Sentiment::Positive)
        } else if hit(&self.neutral) {
            NormalizedLabel::Mapped(Sentiment::Neutral)
        } else {
            NormalizedLabel::Defaulted
        }
    }
}

/// Ingested comments with normalized labels
#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    pub texts: Vec<String>,
    pub labels: Vec<Sentiment>,
}

impl LabeledDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows per class in canonical order
    pub fn distribution(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for label in &self.labels {
            counts[label.index()] += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub total_rows: usize,
    pub text_column: String,
    pub label_column: String,
    /// Labels that were blank, null or unrecognized
    pub defaulted_labels: usize,
    /// Texts replaced by the placeholder
    pub placeholder_texts: usize,
    /// Rows per class in canonical order
    pub distribution: [usize; 3],
}

/// Resolve columns, normalize every row and report what was defaulted
pub fn ingest(
    table: &Table,
    resolver: &ColumnResolver,
    normalizer: &LabelNormalizer,
) -> Result<(LabeledDataset, IngestReport)> {
    if table.is_empty() {
        return Err(Error::training_data("dataset has no rows"));
    }
    let columns = resolver.resolve(&table.headers)?;

    let mut dataset = LabeledDataset::default();
    let mut defaulted_labels = 0;
    let mut placeholder_texts = 0;

    for row in &table.rows {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let text = cell(columns.text).trim();
        if text.is_empty() {
            placeholder_texts += 1;
            dataset.texts.push(PLACEHOLDER_TEXT.to_string());
            dataset.labels.push(Sentiment::Neutral);
            continue;
        }

        let label = normalizer.normalize(cell(columns.label));
        if label == NormalizedLabel::Defaulted {
            defaulted_labels += 1;
        }
        dataset.texts.push(text.to_string());
        dataset.labels.push(label.sentiment());
    }

    let distribution = dataset.distribution();
    let report = IngestReport {
        total_rows: table.len(),
        text_column: table.headers[columns.text].clone(),
        label_column: table.headers[columns.label].clone(),
        defaulted_labels,
        placeholder_texts,
        distribution,
    };

    if distribution.iter().sum::<usize>() != report.total_rows {
        return Err(Error::internal(format!(
            "ingested {} rows but the distribution sums to {}",
            report.total_rows,
            distribution.iter().sum::<usize>()
        )));
    }

    if defaulted_labels > 0 || placeholder_texts > 0 {
        warn!(
            defaulted_labels,
            placeholder_texts, "Rows defaulted to Neutral during ingestion"
        );
    }
    info!(
        rows = report.total_rows,
        text_column = %report.text_column,
        label_column = %report.label_column,
        negative = distribution[0],
        neutral = distribution[1],
        positive = distribution[2],
        "Dataset ingested"
    );

    Ok((dataset, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_keywords() {
        let n = LabelNormalizer::default();
        assert_eq!(n.normalize("Negativo"), NormalizedLabel::Mapped(Sentiment::Negative));
        assert_eq!(n.normalize(" POSITIVO "), NormalizedLabel::Mapped(Sentiment::Positive));
        assert_eq!(n.normalize("Neutral"), NormalizedLabel::Mapped(Sentiment::Neutral));
        assert_eq!(n.normalize("Tristeza"), NormalizedLabel::Mapped(Sentiment::Negative));
        assert_eq!(n.normalize("Orgullo"), NormalizedLabel::Mapped(Sentiment::Positive));
        assert_eq!(n.normalize("good"), NormalizedLabel::Mapped(Sentiment::Positive));
        assert_eq!(n.normalize("nan"), NormalizedLabel::Defaulted);
        assert_eq!(n.normalize("sorpresa"), NormalizedLabel::Defaulted);
        assert_eq!(n.normalize("sorpresa").sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn test_negative_checked_before_positive() {
        // "mal" and "buen" both occur
        let n = LabelNormalizer::default();
        assert_eq!(n.normalize("mal/buen"), NormalizedLabel::Mapped(Sentiment::Negative));
    }

    #[test]
    fn test_csv_with_bom_and_short_rows() {
        let data = "\u{feff}comentario,sentimiento\n\"Hola, qué tal\",Neutral\nsolo texto\n";
        let table = Table::from_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["comentario", "sentimiento"]);
        assert_eq!(table.rows[0][0], "Hola, qué tal");
        assert_eq!(table.rows[1], vec!["solo texto".to_string(), String::new()]);
    }

    #[test]
    fn test_rows_are_never_dropped() {
        let data = "\
texto,sentimiento
Excelente universidad,Positivo
Pésimo servicio,Negativo
¿Cuál es el horario?,
,Positivo
Me da igual,sorpresa
Gracias,nan
Todo bien,Positivo
";
        let table = Table::from_csv(data.as_bytes()).unwrap();
        let (dataset, report) =
            ingest(&table, &ColumnResolver::default(), &LabelNormalizer::default()).unwrap();

        assert_eq!(dataset.len(), 7);
        assert_eq!(report.total_rows, 7);
        assert_eq!(report.defaulted_labels, 3);
        assert_eq!(report.placeholder_texts, 1);
        assert_eq!(report.distribution, [1, 4, 2]);
        assert_eq!(dataset.texts[3], PLACEHOLDER_TEXT);
        assert_eq!(dataset.labels[3], Sentiment::Neutral);
    }

    #[test]
    fn test_empty_table_is_training_data_error() {
        let table = Table::new(vec!["texto".into(), "sentimiento".into()], vec![]);
        let err = ingest(&table, &ColumnResolver::default(), &LabelNormalizer::default()).unwrap_err();
        assert_eq!(err.kind(), "training_data_error");
    }
}
