//! Aggregation Module
//! Pure group-by/count views over the filtered dataset, consumed by the
//! dashboard table and charts.

use std::collections::{BTreeMap, HashMap};

use super::model::PaperSet;

/// One row of the data preview table.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub title: Option<String>,
    pub journal: Option<String>,
    pub year: Option<i32>,
}

/// First `limit` filtered rows, projected to the three displayed columns.
/// No sorting beyond the dataset's natural order.
pub fn preview_rows(papers: &PaperSet, indices: &[usize], limit: usize) -> Vec<PreviewRow> {
    indices
        .iter()
        .take(limit)
        .map(|&i| {
            let rec = &papers.records[i];
            PreviewRow {
                title: rec.title.clone(),
                journal: rec.journal.clone(),
                year: rec.year,
            }
        })
        .collect()
}

/// Paper counts per year, ascending by year.
pub fn publications_by_year(papers: &PaperSet, indices: &[usize]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &i in indices {
        if let Some(year) = papers.records[i].year {
            *counts.entry(year).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

/// Paper counts per journal, descending by count (journal name ascending as
/// the tie-break). Records without a journal are skipped.
pub fn journal_counts(papers: &PaperSet, indices: &[usize]) -> Vec<(String, usize)> {
    count_by(papers, indices, |set, i| set.records[i].journal.as_deref())
}

/// The `n` journals with the highest paper counts.
pub fn top_journals(papers: &PaperSet, indices: &[usize], n: usize) -> Vec<(String, usize)> {
    let mut counts = journal_counts(papers, indices);
    counts.truncate(n);
    counts
}

/// Paper counts per source feed, descending by count.
pub fn source_counts(papers: &PaperSet, indices: &[usize]) -> Vec<(String, usize)> {
    count_by(papers, indices, |set, i| set.records[i].source.as_deref())
}

fn count_by<'a, F>(papers: &'a PaperSet, indices: &[usize], key: F) -> Vec<(String, usize)>
where
    F: Fn(&'a PaperSet, usize) -> Option<&'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &i in indices {
        if let Some(k) = key(papers, i) {
            *counts.entry(k).or_default() += 1;
        }
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PaperRecord;
    use chrono::NaiveDate;

    fn paper(title: &str, year: i32, journal: Option<&str>, source: Option<&str>) -> PaperRecord {
        PaperRecord::new(
            Some(title.to_string()),
            None,
            NaiveDate::from_ymd_opt(year, 1, 1),
            journal.map(str::to_string),
            source.map(str::to_string),
        )
    }

    fn sample_set() -> PaperSet {
        let mut records = Vec::new();
        for _ in 0..5 {
            records.push(paper("p", 2020, Some("A"), Some("PMC")));
        }
        for _ in 0..5 {
            records.push(paper("p", 2020, Some("B"), Some("WHO")));
        }
        for _ in 0..3 {
            records.push(paper("p", 2021, Some("C"), Some("PMC")));
        }
        records.push(paper("p", 2021, None, None));
        PaperSet {
            records,
            fingerprint: 0,
        }
    }

    fn all_indices(papers: &PaperSet) -> Vec<usize> {
        (0..papers.len()).collect()
    }

    #[test]
    fn year_counts_ascending() {
        let papers = sample_set();
        let counts = publications_by_year(&papers, &all_indices(&papers));
        assert_eq!(counts, vec![(2020, 10), (2021, 4)]);
    }

    #[test]
    fn top_journals_breaks_ties_with_exact_counts() {
        let papers = sample_set();
        let top = top_journals(&papers, &all_indices(&papers), 2);
        assert_eq!(top.len(), 2);
        // A and B are tied at 5; either order is acceptable but the counts
        // must be exact and C must not appear.
        for (journal, count) in &top {
            assert!(journal == "A" || journal == "B");
            assert_eq!(*count, 5);
        }
    }

    #[test]
    fn null_journals_and_sources_are_skipped() {
        let papers = sample_set();
        let journals = journal_counts(&papers, &all_indices(&papers));
        assert_eq!(journals.len(), 3);
        let sources = source_counts(&papers, &all_indices(&papers));
        assert_eq!(sources, vec![("PMC".to_string(), 8), ("WHO".to_string(), 5)]);
    }

    #[test]
    fn preview_respects_limit_and_order() {
        let papers = sample_set();
        let indices = all_indices(&papers);
        let rows = preview_rows(&papers, &indices, 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].journal.as_deref(), Some("A"));

        let all = preview_rows(&papers, &indices, 20);
        assert_eq!(all.len(), 14);
    }

    #[test]
    fn empty_view_yields_empty_aggregates() {
        let papers = sample_set();
        let empty: Vec<usize> = Vec::new();
        assert!(preview_rows(&papers, &empty, 20).is_empty());
        assert!(publications_by_year(&papers, &empty).is_empty());
        assert!(top_journals(&papers, &empty, 10).is_empty());
        assert!(source_counts(&papers, &empty).is_empty());
    }
}
