//! CSV Data Loader Module
//! Reads metadata.csv, projects to the five retained columns, parses dates,
//! and memoizes the cleaned result per (path, content) identity.

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::Hasher;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use thiserror::Error;

use super::model::{PaperRecord, PaperSet};

/// Columns retained from the raw file; everything else is dropped.
const REQUIRED_COLUMNS: [&str; 5] = ["title", "abstract", "publish_time", "journal", "source_x"];

/// Date shapes that occur in CORD-19 publish_time values.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y %b %d", "%b %d %Y"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// How a `DataLoader::load` call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// File stamp unchanged; returned without touching the file contents.
    Hit,
    /// Stamp changed but the bytes hash identically; re-parse skipped.
    ContentMatch,
    /// Fresh read and parse.
    Parsed,
}

/// Cheap file identity used to skip re-reading an unchanged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn probe(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

struct CacheEntry {
    stamp: FileStamp,
    fingerprint: u64,
    papers: Arc<PaperSet>,
}

/// Loads and cleans the metadata CSV, caching the parsed result per path.
///
/// The cache is keyed by path with a two-level identity check: a file stamp
/// (length + mtime) avoids re-reading entirely, and a content fingerprint
/// avoids re-parsing when the stamp moved but the bytes did not. There is no
/// eviction; the workload is a single file per session.
#[derive(Default)]
pub struct DataLoader {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cleaned dataset for `path`, reusing the cache when possible.
    pub fn load(&mut self, path: &Path) -> Result<(Arc<PaperSet>, CacheStatus), LoaderError> {
        let stamp = FileStamp::probe(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(entry) = self.entries.get(path) {
            if entry.stamp == stamp {
                log::debug!("loader cache hit for {}", path.display());
                return Ok((entry.papers.clone(), CacheStatus::Hit));
            }
        }

        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fingerprint = fingerprint_bytes(&bytes);

        if let Some(entry) = self.entries.get_mut(path) {
            if entry.fingerprint == fingerprint {
                log::debug!(
                    "loader cache content match for {} (stamp refreshed)",
                    path.display()
                );
                entry.stamp = stamp;
                return Ok((entry.papers.clone(), CacheStatus::ContentMatch));
            }
        }

        let records = parse_records(&bytes)?;
        log::info!(
            "loaded {} records from {}",
            records.len(),
            path.display()
        );

        let papers = Arc::new(PaperSet {
            records,
            fingerprint,
        });
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                stamp,
                fingerprint,
                papers: papers.clone(),
            },
        );
        Ok((papers, CacheStatus::Parsed))
    }
}

fn fingerprint_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    hasher.finish()
}

/// Parse raw CSV bytes into cleaned records.
///
/// Parsing is tolerant: type mismatches in unused columns are ignored and
/// every retained column is cast to `String` so extraction never depends on
/// what the schema inference guessed. Bad dates become `None`, never errors.
fn parse_records(bytes: &[u8]) -> Result<Vec<PaperRecord>, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .with_ignore_errors(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for required in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == required) {
            return Err(LoaderError::MissingColumn(required.to_string()));
        }
    }

    let cleaned = df
        .lazy()
        .select([
            col("title").cast(DataType::String),
            col("abstract").cast(DataType::String),
            col("publish_time").cast(DataType::String),
            col("journal").cast(DataType::String),
            col("source_x").cast(DataType::String),
        ])
        .collect()?;

    let titles = cleaned.column("title")?.as_materialized_series();
    let abstracts = cleaned.column("abstract")?.as_materialized_series();
    let times = cleaned.column("publish_time")?.as_materialized_series();
    let journals = cleaned.column("journal")?.as_materialized_series();
    let sources = cleaned.column("source_x")?.as_materialized_series();

    let titles = titles.str()?;
    let abstracts = abstracts.str()?;
    let times = times.str()?;
    let journals = journals.str()?;
    let sources = sources.str()?;

    let mut records = Vec::with_capacity(cleaned.height());
    for i in 0..cleaned.height() {
        let publish_time = times.get(i).and_then(parse_publish_date);
        records.push(PaperRecord::new(
            titles.get(i).map(str::to_string),
            abstracts.get(i).map(str::to_string),
            publish_time,
            journals.get(i).map(str::to_string),
            sources.get(i).map(str::to_string),
        ));
    }
    Ok(records)
}

/// Parse a publish_time value, coercing failures to `None`.
///
/// A bare year ("2020") maps to January 1st of that year, matching how the
/// upstream metadata treats year-only entries.
fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    if let Ok(year) = raw.parse::<i32>() {
        if (1000..=9999).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title,abstract,publish_time,journal,source_x,extra_col
Viral spread,A short abstract here,2020-03-15,Lancet,PMC,ignored
Second paper,,2019-07-01,Nature,WHO,ignored
Third paper,one two three,2021 Apr 17,Lancet,PMC,ignored
Fourth paper,words,not a date,BMJ,Elsevier,ignored
";

    #[test]
    fn parses_and_cleans_sample() {
        let records = parse_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);

        assert_eq!(records[0].title.as_deref(), Some("Viral spread"));
        assert_eq!(records[0].year, Some(2020));
        assert_eq!(records[0].abstract_word_count, 4);

        // Empty abstract field is null -> count 0.
        assert_eq!(records[1].abstract_text, None);
        assert_eq!(records[1].abstract_word_count, 0);

        // "2021 Apr 17" shape.
        assert_eq!(records[2].year, Some(2021));

        // Unparseable date -> null date, null year, row still loaded.
        assert_eq!(records[3].publish_time, None);
        assert_eq!(records[3].year, None);
        assert_eq!(records[3].journal.as_deref(), Some("BMJ"));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "title,abstract,journal,source_x\na,b,c,d\n";
        match parse_records(csv.as_bytes()) {
            Err(LoaderError::MissingColumn(col)) => assert_eq!(col, "publish_time"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn date_parsing_shapes() {
        assert_eq!(
            parse_publish_date("2020-03-15"),
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
        assert_eq!(
            parse_publish_date("2020/03/15"),
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
        assert_eq!(
            parse_publish_date("2020 Apr 17"),
            NaiveDate::from_ymd_opt(2020, 4, 17)
        );
        assert_eq!(
            parse_publish_date("2020"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(parse_publish_date("garbage"), None);
        assert_eq!(parse_publish_date(""), None);
        assert_eq!(parse_publish_date("  "), None);
    }

    #[test]
    fn cache_skips_rereading_unchanged_file() {
        let path = std::env::temp_dir().join(format!(
            "cord19_loader_cache_test_{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).unwrap();

        let mut loader = DataLoader::new();
        let (first, status) = loader.load(&path).unwrap();
        assert_eq!(status, CacheStatus::Parsed);

        let (second, status) = loader.load(&path).unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert!(Arc::ptr_eq(&first, &second));

        // Rewriting identical bytes may move the stamp, but must never
        // trigger a re-parse.
        std::fs::write(&path, SAMPLE).unwrap();
        let (third, status) = loader.load(&path).unwrap();
        assert_ne!(status, CacheStatus::Parsed);
        assert!(Arc::ptr_eq(&first, &third));

        // Changed content is re-parsed.
        std::fs::write(
            &path,
            "title,abstract,publish_time,journal,source_x\nx,y,2020-01-01,j,s\n",
        )
        .unwrap();
        let (fourth, status) = loader.load(&path).unwrap();
        assert_eq!(status, CacheStatus::Parsed);
        assert_eq!(fourth.len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_fatal() {
        let mut loader = DataLoader::new();
        let result = loader.load(Path::new("definitely_not_here.csv"));
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }
}
