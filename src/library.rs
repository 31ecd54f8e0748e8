//! Media Catalog
//!
//! Loads records from a tab-separated file and keeps one normalized token
//! sequence per field, computed once at load time.

use crate::core::text_normalizer::{TextNormalizer, TokenSequence};
use crate::error::{SearchError, SearchResult};
use crate::matcher::{Match, MatchEngine};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// One catalog entry. Identity is its position in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl Record {
    pub fn new(title: &str, author: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
        }
    }
}

/// Record field a query is matched against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
    Description,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [
        SearchField::Title,
        SearchField::Author,
        SearchField::Description,
    ];
}

/// Normalized views of a record, one per field
#[derive(Debug, Clone)]
struct NormalizedRecord {
    title: TokenSequence,
    author: TokenSequence,
    description: TokenSequence,
}

impl NormalizedRecord {
    fn tokens(&self, field: SearchField) -> &[String] {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
            SearchField::Description => &self.description,
        }
    }
}

/// Immutable list of records plus their cached token sequences
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    normalized: Vec<NormalizedRecord>,
}

impl Catalog {
    /// Build a catalog, normalizing every field once
    pub fn from_records(records: Vec<Record>, normalizer: &TextNormalizer) -> Self {
        let normalized = records
            .iter()
            .map(|record| NormalizedRecord {
                title: normalizer.normalize(&record.title),
                author: normalizer.normalize(&record.author),
                description: normalizer.normalize(&record.description),
            })
            .collect();
        Self {
            records,
            normalized,
        }
    }

    /// Load a tab-separated catalog file
    ///
    /// Each line is `title<TAB>author<TAB>description`. Lines with fewer
    /// than three fields are skipped; extra fields are ignored.
    pub fn load(path: &Path, normalizer: &TextNormalizer) -> SearchResult<Self> {
        if path.is_dir() {
            return Err(SearchError::Catalog(format!(
                "{} is a directory",
                path.display()
            )));
        }
        let file = std::fs::File::open(path)?;
        let records = parse_records(std::io::BufReader::new(file))?;
        info!("📚 Loaded {} records from {}", records.len(), path.display());
        Ok(Self::from_records(records, normalizer))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cached tokens of one field for every record, in catalog order
    pub fn candidates(&self, field: SearchField) -> impl Iterator<Item = (usize, &[String])> + '_ {
        self.normalized
            .iter()
            .enumerate()
            .map(move |(index, norm)| (index, norm.tokens(field)))
    }

    /// Records relevant on any of `fields`, in catalog order
    pub fn search(
        &self,
        query: &[String],
        engine: &MatchEngine,
        fields: &[SearchField],
    ) -> Vec<&Record> {
        let mut hits = vec![false; self.records.len()];
        for &field in fields {
            for index in engine.search(query, self.candidates(field)) {
                hits[index] = true;
            }
        }

        let results: Vec<&Record> = self
            .records
            .iter()
            .zip(hits)
            .filter_map(|(record, hit)| hit.then_some(record))
            .collect();
        debug!("Query {:?} matched {} records", query, results.len());
        results
    }

    /// Relevant records with their best score over `fields`, best first
    pub fn search_ranked(
        &self,
        query: &[String],
        engine: &MatchEngine,
        fields: &[SearchField],
    ) -> Vec<(&Record, f64)> {
        let mut best: Vec<Option<f64>> = vec![None; self.records.len()];
        for &field in fields {
            for Match { index, score } in engine.search_ranked(query, self.candidates(field)) {
                let slot = &mut best[index];
                *slot = Some(slot.map_or(score, |current| current.min(score)));
            }
        }

        let mut results: Vec<(&Record, f64)> = self
            .records
            .iter()
            .zip(best)
            .filter_map(|(record, score)| score.map(|s| (record, s)))
            .collect();
        results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        results
    }
}

/// Parse tab-separated records, skipping malformed lines
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the load.
pub fn parse_records<R: BufRead>(mut reader: R) -> SearchResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let decoded = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = decoded {
            warn!("⚠️ Line {} is not valid UTF-8, replacing bad bytes", line_no);
        }
        let line = decoded.trim();
        let parts: Vec<&str> = line.split('\t').collect();

        if parts.len() < 3 {
            if !line.is_empty() {
                warn!(
                    "⚠️ Skipping line {}: expected 3 tab-separated fields, found {}",
                    line_no,
                    parts.len()
                );
            }
            continue;
        }

        records.push(Record::new(
            parts[0].trim(),
            parts[1].trim(),
            parts[2].trim(),
        ));
    }
    Ok(records)
}
