//! Year Range Filter
//! Narrows the loaded dataset to an inclusive publication-year range.

use super::model::PaperSet;

/// Slider bounds exposed to the user.
pub const YEAR_MIN: i32 = 2019;
pub const YEAR_MAX: i32 = 2022;

/// Inclusive publication-year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self { lo: 2020, hi: 2021 }
    }
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }.normalized()
    }

    /// Restore `lo <= hi`. The slider bounds are a UI concern; the filter
    /// itself accepts any inclusive integer range.
    pub fn normalized(self) -> Self {
        if self.lo <= self.hi {
            self
        } else {
            Self {
                lo: self.hi,
                hi: self.lo,
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }
}

/// Indices of records whose `year` falls inside `range`, in dataset order.
///
/// Records with a null year never match. Pure; recomputed whenever the
/// range control changes.
pub fn filtered_indices(papers: &PaperSet, range: YearRange) -> Vec<usize> {
    papers
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.year.is_some_and(|y| range.contains(y)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PaperRecord;
    use chrono::NaiveDate;

    fn paper(date: Option<&str>) -> PaperRecord {
        let publish_time = date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap());
        PaperRecord::new(Some("t".into()), None, publish_time, None, None)
    }

    fn sample_set() -> PaperSet {
        PaperSet {
            records: vec![
                paper(Some("2019-05-01")),
                paper(Some("2020-06-02")),
                paper(Some("2021-07-03")),
                paper(None), // unparseable date in the raw file
            ],
            fingerprint: 1,
        }
    }

    #[test]
    fn range_scenarios() {
        let papers = sample_set();
        assert_eq!(filtered_indices(&papers, YearRange::new(2020, 2021)), vec![1, 2]);
        assert_eq!(filtered_indices(&papers, YearRange::new(2019, 2019)), vec![0]);
        assert!(filtered_indices(&papers, YearRange::new(2023, 2023)).is_empty());
    }

    #[test]
    fn null_year_never_matches_full_range() {
        let papers = sample_set();
        let full = filtered_indices(&papers, YearRange::new(YEAR_MIN, YEAR_MAX));
        let non_null = papers.records.iter().filter(|r| r.year.is_some()).count();
        assert_eq!(full.len(), non_null);
        assert!(!full.contains(&3));
    }

    #[test]
    fn filter_is_idempotent() {
        let papers = sample_set();
        let range = YearRange::new(2020, 2021);
        let once = filtered_indices(&papers, range);

        let narrowed = PaperSet {
            records: once.iter().map(|&i| papers.records[i].clone()).collect(),
            fingerprint: 2,
        };
        let twice = filtered_indices(&narrowed, range);
        assert_eq!(twice.len(), once.len());
        let years: Vec<_> = twice.iter().map(|&i| narrowed.records[i].year).collect();
        let expected: Vec<_> = once.iter().map(|&i| papers.records[i].year).collect();
        assert_eq!(years, expected);
    }

    #[test]
    fn normalization_keeps_bounds_ordered() {
        let range = YearRange::new(2022, 2019);
        assert_eq!(range, YearRange { lo: 2019, hi: 2022 });
        let range = YearRange::new(2020, 2021);
        assert_eq!(range, YearRange { lo: 2020, hi: 2021 });
    }
}
