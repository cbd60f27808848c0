//! Day count conventions for fund analytics.
//!
//! Private fund IRRs and annualizations are quoted on an actual/365 basis:
//! the numerator is actual calendar days and the year is always 365 days,
//! leap years included. [`Act365Fixed`] is the only convention the engine
//! uses; the [`DayCount`] trait is the seam through which another basis
//! could be introduced.
//!
//! Year fractions are returned as `f64` because their sole consumers are
//! the floating-point discounting and annualization routines.

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the number of days between two dates under the convention.
    ///
    /// Negative if `end` is before `start`.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;
}

/// Actual/365 Fixed day count convention.
///
/// The day count is the actual number of calendar days between dates.
/// The year basis is always 365 days (ignoring leap years).
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 365.0
    }
}
