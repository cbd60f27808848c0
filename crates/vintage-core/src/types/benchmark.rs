//! Benchmark index level series.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::records::BenchmarkRow;
use super::Date;
use crate::error::{ValidationError, ValidationResult};

/// A dated benchmark index level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    /// Observation date
    date: Date,
    /// Index level, strictly positive
    level: Decimal,
}

impl BenchmarkPoint {
    /// Creates a new benchmark point.
    #[must_use]
    pub fn new(date: Date, level: Decimal) -> Self {
        Self { date, level }
    }

    /// Returns the observation date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the index level.
    #[must_use]
    pub fn level(&self) -> Decimal {
        self.level
    }
}

impl fmt::Display for BenchmarkPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.level)
    }
}

/// A validated benchmark history.
///
/// Construction enforces:
///
/// - at least two distinct dates (a single point cannot express growth)
/// - strictly positive levels
/// - points sorted ascending, one per date (the last occurrence wins,
///   matching how price feeds re-emit corrections)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSeries {
    /// Index levels, ascending by date
    points: Vec<BenchmarkPoint>,
}

impl BenchmarkSeries {
    /// Creates a series from benchmark points.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositiveLevel` (indexed by position in
    /// `points`) for a zero or negative level, or
    /// `ValidationError::InsufficientBenchmarkData` if fewer than two
    /// distinct dates remain after deduplication.
    pub fn new(points: Vec<BenchmarkPoint>) -> ValidationResult<Self> {
        let mut levels: BTreeMap<Date, Decimal> = BTreeMap::new();
        for (row, point) in points.iter().enumerate() {
            if point.level() <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveLevel {
                    row,
                    value: point.level(),
                });
            }
            levels.insert(point.date(), point.level());
        }

        if levels.len() < 2 {
            return Err(ValidationError::InsufficientBenchmarkData {
                required: 2,
                actual: levels.len(),
            });
        }

        Ok(Self {
            points: levels
                .into_iter()
                .map(|(date, level)| BenchmarkPoint::new(date, level))
                .collect(),
        })
    }

    /// Loads a series from tabular upload rows.
    ///
    /// # Errors
    ///
    /// Returns a row-indexed `ValidationError` for the first unparseable
    /// date or non-positive level, or `InsufficientBenchmarkData` if fewer
    /// than two distinct dates were supplied.
    pub fn from_rows(rows: &[BenchmarkRow]) -> ValidationResult<Self> {
        let mut points = Vec::with_capacity(rows.len());
        for (row, rec) in rows.iter().enumerate() {
            let date = Date::parse(rec.date()).map_err(|e| e.at_row(row))?;
            if rec.price() <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveLevel {
                    row,
                    value: rec.price(),
                });
            }
            points.push(BenchmarkPoint::new(date, rec.price()));
        }
        Self::new(points)
    }

    /// Returns the points, ascending by date.
    #[must_use]
    pub fn points(&self) -> &[BenchmarkPoint] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no points.
    ///
    /// Always false for a validated series; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the earliest point.
    #[must_use]
    pub fn first(&self) -> BenchmarkPoint {
        self.points[0]
    }

    /// Returns the latest point.
    #[must_use]
    pub fn last(&self) -> BenchmarkPoint {
        self.points[self.points.len() - 1]
    }

    /// Returns the point nearest to `date`, plus whether `date` fell
    /// outside the covered range and was clamped to an endpoint.
    ///
    /// Ties between two equally distant points resolve to the earlier one,
    /// avoiding look-ahead.
    #[must_use]
    pub fn nearest(&self, date: Date) -> (BenchmarkPoint, bool) {
        let idx = self.points.partition_point(|p| p.date() < date);

        if idx == 0 {
            let first = self.points[0];
            return (first, first.date() != date);
        }
        if idx == self.points.len() {
            return (self.last(), true);
        }

        let next = self.points[idx];
        if next.date() == date {
            return (next, false);
        }

        let prev = self.points[idx - 1];
        let to_prev = prev.date().days_between(&date);
        let to_next = date.days_between(&next.date());
        if to_prev <= to_next {
            (prev, false)
        } else {
            (next, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn series() -> BenchmarkSeries {
        BenchmarkSeries::from_rows(&[
            BenchmarkRow::new("2020-01-01", dec!(100)),
            BenchmarkRow::new("2020-04-01", dec!(95)),
            BenchmarkRow::new("2020-07-01", dec!(110)),
            BenchmarkRow::new("2020-10-01", dec!(120)),
        ])
        .unwrap()
    }

    #[test]
    fn test_sorted_and_accessors() {
        let s = series();
        assert_eq!(s.len(), 4);
        assert_eq!(s.first().level(), dec!(100));
        assert_eq!(s.last().date(), date("2020-10-01"));
    }

    #[test]
    fn test_non_positive_level_rejected() {
        let err = BenchmarkSeries::from_rows(&[
            BenchmarkRow::new("2020-01-01", dec!(100)),
            BenchmarkRow::new("2020-02-01", dec!(0)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveLevel {
                row: 1,
                value: dec!(0)
            }
        );
    }

    #[test]
    fn test_too_few_points() {
        let err =
            BenchmarkSeries::from_rows(&[BenchmarkRow::new("2020-01-01", dec!(100))]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientBenchmarkData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_duplicate_dates_last_wins() {
        let s = BenchmarkSeries::from_rows(&[
            BenchmarkRow::new("2020-01-01", dec!(100)),
            BenchmarkRow::new("2020-02-01", dec!(105)),
            BenchmarkRow::new("2020-02-01", dec!(106)),
        ])
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.last().level(), dec!(106));
    }

    #[test]
    fn test_duplicates_count_once_toward_minimum() {
        let err = BenchmarkSeries::from_rows(&[
            BenchmarkRow::new("2020-01-01", dec!(100)),
            BenchmarkRow::new("2020-01-01", dec!(101)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InsufficientBenchmarkData { actual: 1, .. }
        ));
    }

    #[test]
    fn test_nearest_exact_match() {
        let (point, clamped) = series().nearest(date("2020-04-01"));
        assert_eq!(point.level(), dec!(95));
        assert!(!clamped);
    }

    #[test]
    fn test_nearest_between_points() {
        // 2020-05-20 is 49 days after 04-01 and 42 days before 07-01
        let (point, clamped) = series().nearest(date("2020-05-20"));
        assert_eq!(point.date(), date("2020-07-01"));
        assert!(!clamped);
    }

    #[test]
    fn test_nearest_tie_prefers_earlier() {
        let s = BenchmarkSeries::from_rows(&[
            BenchmarkRow::new("2020-01-01", dec!(100)),
            BenchmarkRow::new("2020-01-11", dec!(110)),
        ])
        .unwrap();
        let (point, clamped) = s.nearest(date("2020-01-06"));
        assert_eq!(point.date(), date("2020-01-01"));
        assert!(!clamped);
    }

    #[test]
    fn test_nearest_clamps_before_range() {
        let (point, clamped) = series().nearest(date("2019-06-01"));
        assert_eq!(point.date(), date("2020-01-01"));
        assert!(clamped);
    }

    #[test]
    fn test_nearest_clamps_after_range() {
        let (point, clamped) = series().nearest(date("2021-03-01"));
        assert_eq!(point.date(), date("2020-10-01"));
        assert!(clamped);
    }

    #[test]
    fn test_nearest_on_endpoints_not_clamped() {
        let (point, clamped) = series().nearest(date("2020-01-01"));
        assert_eq!(point.date(), date("2020-01-01"));
        assert!(!clamped);

        let (point, clamped) = series().nearest(date("2020-10-01"));
        assert_eq!(point.date(), date("2020-10-01"));
        assert!(!clamped);
    }
}
