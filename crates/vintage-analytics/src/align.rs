//! Nearest-date alignment of fund events onto a benchmark history.
//!
//! Every PME calculation needs a benchmark level for each fund event
//! date, but benchmark uploads are sampled on their own calendar (month
//! ends, trading days). Alignment resolves each fund date to the nearest
//! benchmark observation rather than interpolating, clamping dates that
//! fall outside the covered range to the closest endpoint. Any clamp is
//! recorded on the result as partial coverage so reports can carry a
//! quality flag instead of failing.

use std::collections::BTreeMap;

use vintage_core::types::{BenchmarkSeries, CashFlowSeries, Date};
use vintage_math::safe::decimal_to_f64;

/// One fund event date resolved against the benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPoint {
    /// Fund event date
    date: Date,
    /// Net signed cash flow on the date, zero for NAV-only dates
    amount: f64,
    /// NAV observation on the date, if any
    nav: Option<f64>,
    /// Benchmark level nearest the date
    level: f64,
    /// Benchmark level normalized to 1.0 at fund inception
    index: f64,
}

impl AlignedPoint {
    /// Returns the fund event date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the net signed cash flow on this date.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the NAV observed on this date, if any.
    #[must_use]
    pub fn nav(&self) -> Option<f64> {
        self.nav
    }

    /// Returns the benchmark level resolved for this date.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Returns the benchmark level relative to its level at inception.
    #[must_use]
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Returns true if a nonzero cash flow occurred on this date.
    #[must_use]
    pub fn is_flow(&self) -> bool {
        self.amount != 0.0
    }
}

/// A fund history with a benchmark level attached to every event date.
///
/// Points cover the union of flow and valuation dates, ascending. The
/// inception level anchors index normalization; the terminal level is the
/// benchmark at the fund's end date and drives future-value factors.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    /// Aligned points, ascending by date
    points: Vec<AlignedPoint>,
    /// First cash flow date
    inception_date: Date,
    /// Benchmark level at inception
    inception_level: f64,
    /// Fund end date: latest valuation date, or last flow without one
    terminal_date: Date,
    /// Benchmark level at the terminal date
    terminal_level: f64,
    /// True if any fund date fell outside the benchmark's range
    coverage_partial: bool,
}

impl AlignedSeries {
    /// Returns the aligned points, ascending by date.
    #[must_use]
    pub fn points(&self) -> &[AlignedPoint] {
        &self.points
    }

    /// Returns the first cash flow date.
    #[must_use]
    pub fn inception_date(&self) -> Date {
        self.inception_date
    }

    /// Returns the benchmark level at inception.
    #[must_use]
    pub fn inception_level(&self) -> f64 {
        self.inception_level
    }

    /// Returns the fund's end date.
    #[must_use]
    pub fn terminal_date(&self) -> Date {
        self.terminal_date
    }

    /// Returns the benchmark level at the fund's end date.
    #[must_use]
    pub fn terminal_level(&self) -> f64 {
        self.terminal_level
    }

    /// Returns true if any fund date was clamped to a benchmark endpoint.
    #[must_use]
    pub fn coverage_partial(&self) -> bool {
        self.coverage_partial
    }

    /// Returns the benchmark growth factor from a point's date to the
    /// fund's end date.
    ///
    /// Levels are strictly positive by series validation, so the ratio is
    /// always finite.
    #[must_use]
    pub fn growth_to_terminal(&self, point: &AlignedPoint) -> f64 {
        self.terminal_level / point.level
    }

    /// Iterates the points carrying a nonzero cash flow.
    pub fn flows(&self) -> impl Iterator<Item = &AlignedPoint> + '_ {
        self.points.iter().filter(|p| p.is_flow())
    }

    /// Returns the latest point carrying a NAV observation, if any.
    #[must_use]
    pub fn final_valuation(&self) -> Option<&AlignedPoint> {
        self.points.iter().rev().find(|p| p.nav.is_some())
    }

    /// Returns the number of aligned points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Aligns a fund history onto a benchmark.
///
/// The result covers the union of the fund's flow and valuation dates.
/// Inception is the first cash flow date; the terminal date is the fund's
/// end date, which can precede later flows when the latest NAV does.
///
/// # Example
///
/// ```rust
/// use vintage_analytics::align::align;
/// use vintage_core::prelude::*;
///
/// let fund = CashFlowSeries::from_rows(&[
///     FundRow::flow("2021-01-01", dec!(-1000)),
///     FundRow::flow("2022-01-01", dec!(600)).with_nav(dec!(700)),
/// ])?;
/// let benchmark = BenchmarkSeries::from_rows(&[
///     BenchmarkRow::new("2021-01-01", dec!(100)),
///     BenchmarkRow::new("2022-01-01", dec!(110)),
/// ])?;
///
/// let aligned = align(&fund, &benchmark);
/// assert_eq!(aligned.inception_level(), 100.0);
/// assert_eq!(aligned.terminal_level(), 110.0);
/// assert!(!aligned.coverage_partial());
/// # Ok::<(), vintage_core::ValidationError>(())
/// ```
#[must_use]
pub fn align(fund: &CashFlowSeries, benchmark: &BenchmarkSeries) -> AlignedSeries {
    debug_assert!(benchmark.len() >= 2, "benchmark validation requires two points");

    let mut merged: BTreeMap<Date, (f64, Option<f64>)> = BTreeMap::new();
    for entry in fund.entries() {
        let slot = merged.entry(entry.date()).or_insert((0.0, None));
        slot.0 += decimal_to_f64(entry.amount());
    }
    for valuation in fund.valuations() {
        let slot = merged.entry(valuation.date()).or_insert((0.0, None));
        slot.1 = Some(decimal_to_f64(valuation.nav()));
    }

    let mut coverage_partial = false;

    let inception_date = fund.entries()[0].date();
    let (inception_point, clamped) = benchmark.nearest(inception_date);
    coverage_partial |= clamped;
    let inception_level = decimal_to_f64(inception_point.level());

    // The terminal date is the valuation date, not necessarily the last
    // union date, so it gets its own lookup.
    let terminal_date = fund.final_date();
    let (terminal_point, clamped) = benchmark.nearest(terminal_date);
    coverage_partial |= clamped;
    let terminal_level = decimal_to_f64(terminal_point.level());

    let mut points = Vec::with_capacity(merged.len());
    for (date, (amount, nav)) in merged {
        let (point, clamped) = benchmark.nearest(date);
        coverage_partial |= clamped;
        let level = decimal_to_f64(point.level());
        points.push(AlignedPoint {
            date,
            amount,
            nav,
            level,
            index: level / inception_level,
        });
    }

    AlignedSeries {
        points,
        inception_date,
        inception_level,
        terminal_date,
        terminal_level,
        coverage_partial,
    }
}
