//! CSV Export Module
//! Serializes the filtered view to UTF-8 CSV bytes for download, memoized
//! per (dataset fingerprint, year range).

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::data::{PaperSet, YearRange};

/// Default file name offered in the save dialog.
pub const EXPORT_FILE_NAME: &str = "cord19_filtered.csv";

/// All cleaned columns are exported, matching the in-memory record exactly.
const EXPORT_HEADER: [&str; 7] = [
    "title",
    "abstract",
    "publish_time",
    "journal",
    "source_x",
    "year",
    "abstract_word_count",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finalize CSV buffer: {0}")]
    Buffer(String),
}

/// Serializes filtered views to CSV bytes, caching per distinct input.
///
/// The cache key is (dataset fingerprint, range); identical interactions
/// reuse the previously serialized bytes.
#[derive(Default)]
pub struct CsvExporter {
    cache: HashMap<(u64, YearRange), Arc<Vec<u8>>>,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSV bytes for the filtered view: header row, no index column.
    pub fn export(
        &mut self,
        papers: &PaperSet,
        indices: &[usize],
        range: YearRange,
    ) -> Result<Arc<Vec<u8>>, ExportError> {
        let key = (papers.fingerprint, range);
        if let Some(bytes) = self.cache.get(&key) {
            log::debug!("export cache hit for range [{}, {}]", range.lo, range.hi);
            return Ok(bytes.clone());
        }

        let bytes = Arc::new(write_csv(papers, indices)?);
        log::info!(
            "exported {} rows ({} bytes) for range [{}, {}]",
            indices.len(),
            bytes.len(),
            range.lo,
            range.hi
        );
        self.cache.insert(key, bytes.clone());
        Ok(bytes)
    }
}

fn write_csv(papers: &PaperSet, indices: &[usize]) -> Result<Vec<u8>, ExportError> {
    // The header is written explicitly so an empty view still exports a
    // well-formed single-line file.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for &i in indices {
        writer.serialize(&papers.records[i])?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}
