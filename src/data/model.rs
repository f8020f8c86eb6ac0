//! Core Data Model
//! The cleaned paper record and the loaded dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of cleaned CORD-19 metadata.
///
/// Only the five retained source columns plus the two derived fields exist
/// in memory; every other column of the raw file is dropped at load time.
/// Records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Parsed publication date; unparseable or absent values are `None`.
    pub publish_time: Option<NaiveDate>,
    pub journal: Option<String>,
    #[serde(rename = "source_x")]
    pub source: Option<String>,
    /// Year component of `publish_time`, `None` when the date is `None`.
    pub year: Option<i32>,
    /// Whitespace-token count of the abstract; 0 when the abstract is absent.
    pub abstract_word_count: usize,
}

impl PaperRecord {
    /// Build a record from raw column values, deriving `year` and
    /// `abstract_word_count`.
    pub fn new(
        title: Option<String>,
        abstract_text: Option<String>,
        publish_time: Option<NaiveDate>,
        journal: Option<String>,
        source: Option<String>,
    ) -> Self {
        use chrono::Datelike;

        let year = publish_time.map(|d| d.year());
        let abstract_word_count = abstract_text
            .as_deref()
            .map(|s| s.split_whitespace().count())
            .unwrap_or(0);

        Self {
            title,
            abstract_text,
            publish_time,
            journal,
            source,
            year,
            abstract_word_count,
        }
    }
}

/// The full loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct PaperSet {
    /// All cleaned records, in file order.
    pub records: Vec<PaperRecord>,
    /// Hash of the raw file bytes; identity key for downstream caches.
    pub fingerprint: u64,
}

impl PaperSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
