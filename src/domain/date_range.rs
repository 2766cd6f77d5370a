//! Half-open calendar date range
//!
//! All booking windows are `[start, end)`: the end date is checkout day and
//! is never occupied. Two ranges overlap only if they share at least one
//! night, so a stay ending the day another begins does not conflict.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};

/// A half-open `[start, end)` range of calendar dates with no time-of-day
/// component. Invariant: `start < end`, so every range covers at least one
/// night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::validation(
                "end_date",
                format!("end date {} must be after start date {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered; always >= 1.
    pub fn nights(&self) -> u32 {
        (self.end - self.start).num_days() as u32
    }

    /// Half-open interval overlap: shares at least one night.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the night starting on `night` falls inside this range.
    pub fn contains_night(&self, night: NaiveDate) -> bool {
        self.start <= night && night < self.end
    }

    /// Iterate the nights of the range (start date of each night).
    pub fn iter_nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.nights() as u64).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        assert!(DateRange::new(d(2026, 3, 10), d(2026, 3, 10)).is_err());
        assert!(DateRange::new(d(2026, 3, 11), d(2026, 3, 10)).is_err());
    }

    #[test]
    fn counts_nights() {
        let r = DateRange::new(d(2026, 3, 10), d(2026, 3, 17)).unwrap();
        assert_eq!(r.nights(), 7);

        let single = DateRange::new(d(2026, 3, 10), d(2026, 3, 11)).unwrap();
        assert_eq!(single.nights(), 1);
    }

    #[test]
    fn back_to_back_ranges_do_not_overlap() {
        let a = DateRange::new(d(2026, 1, 1), d(2026, 1, 5)).unwrap();
        let b = DateRange::new(d(2026, 1, 5), d(2026, 1, 10)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn single_shared_night_overlaps() {
        let a = DateRange::new(d(2026, 1, 1), d(2026, 1, 6)).unwrap();
        let b = DateRange::new(d(2026, 1, 5), d(2026, 1, 10)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn contained_range_overlaps() {
        let outer = DateRange::new(d(2026, 2, 1), d(2026, 2, 28)).unwrap();
        let inner = DateRange::new(d(2026, 2, 10), d(2026, 2, 12)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn checkout_day_is_not_a_night() {
        let r = DateRange::new(d(2026, 3, 10), d(2026, 3, 15)).unwrap();
        assert!(r.contains_night(d(2026, 3, 10)));
        assert!(r.contains_night(d(2026, 3, 14)));
        assert!(!r.contains_night(d(2026, 3, 15)));
        assert!(!r.contains_night(d(2026, 3, 9)));
    }

    #[test]
    fn iter_nights_yields_each_occupied_night() {
        let r = DateRange::new(d(2026, 3, 10), d(2026, 3, 13)).unwrap();
        let nights: Vec<_> = r.iter_nights().collect();
        assert_eq!(nights, vec![d(2026, 3, 10), d(2026, 3, 11), d(2026, 3, 12)]);
    }
}
