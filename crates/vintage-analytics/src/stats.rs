//! Benchmark-relative risk statistics from NAV observations.
//!
//! NAV marks arrive quarterly at best, and raw NAV changes mix investment
//! performance with capital activity. The statistics here therefore work
//! on flow-adjusted period returns between consecutive NAV observations:
//!
//! ```text
//! r = (nav - prev_nav + signed flows in the window) / prev_nav
//! ```
//!
//! Adding the signed flows back cancels capital activity: a distribution
//! drains NAV without being a loss, a call inflates it without being a
//! gain. Windows starting from a zero NAV have no return base and are
//! skipped.
//!
//! Annualization scales by the mean observation spacing rather than
//! assuming a fixed frequency, since upload calendars are irregular. All
//! statistics return `None` below two period returns (three NAV marks);
//! a sample of one has no variance.

use vintage_core::types::Date;
use vintage_math::safe::safe_div;

use crate::align::AlignedSeries;

const DAYS_PER_YEAR: f64 = 365.0;

/// One inter-valuation window.
#[derive(Debug, Clone, Copy)]
struct PeriodReturn {
    /// Window length in days
    days: f64,
    /// Flow-adjusted fund return
    fund: f64,
    /// Benchmark return over the same window
    benchmark: f64,
}

fn period_returns(aligned: &AlignedSeries) -> Vec<PeriodReturn> {
    let mut returns = Vec::new();
    let mut previous: Option<(f64, f64, Date)> = None;
    let mut flows_in_window = 0.0;

    for point in aligned.points() {
        // Flows on the valuation date belong to the window it closes
        flows_in_window += point.amount();
        let Some(nav) = point.nav() else { continue };

        if let Some((prev_nav, prev_level, prev_date)) = previous {
            let days = prev_date.days_between(&point.date()) as f64;
            if prev_nav > 0.0 && days > 0.0 {
                returns.push(PeriodReturn {
                    days,
                    fund: safe_div(nav - prev_nav + flows_in_window, prev_nav),
                    benchmark: safe_div(point.level(), prev_level) - 1.0,
                });
            }
        }
        previous = Some((nav, point.level(), point.date()));
        flows_in_window = 0.0;
    }
    returns
}

/// Annualized volatility of flow-adjusted period returns.
///
/// Sample standard deviation scaled by `sqrt(365 / mean window days)`.
/// `None` below two period returns.
#[must_use]
pub fn volatility(aligned: &AlignedSeries) -> Option<f64> {
    let returns = period_returns(aligned);
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().map(|r| r.fund).sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|r| (r.fund - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let mean_days = returns.iter().map(|r| r.days).sum::<f64>() / n;
    Some(variance.sqrt() * safe_div(DAYS_PER_YEAR, mean_days).sqrt())
}

/// Largest peak-to-trough decline of the compounded return index, as a
/// positive fraction.
///
/// The index is seeded at 1.0 and compounds the period returns; a fund
/// that never declines reports `Some(0.0)`. `None` below two period
/// returns.
#[must_use]
pub fn max_drawdown(aligned: &AlignedSeries) -> Option<f64> {
    let returns = period_returns(aligned);
    if returns.len() < 2 {
        return None;
    }
    let mut index = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;
    for r in &returns {
        index *= 1.0 + r.fund;
        if index > peak {
            peak = index;
        } else {
            worst = worst.max(safe_div(peak - index, peak));
        }
    }
    Some(worst)
}

/// Regression of fund period returns on benchmark period returns.
///
/// Returns `(alpha, beta)`: beta is the least-squares slope, alpha the
/// intercept annualized by the mean window length. A benchmark with zero
/// return variance has an undefined slope, surfaced as NaN. `None` below
/// two period returns.
#[must_use]
pub fn alpha_beta(aligned: &AlignedSeries) -> Option<(f64, f64)> {
    let returns = period_returns(aligned);
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean_fund = returns.iter().map(|r| r.fund).sum::<f64>() / n;
    let mean_bench = returns.iter().map(|r| r.benchmark).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut bench_variance = 0.0;
    for r in &returns {
        let bench_dev = r.benchmark - mean_bench;
        covariance += (r.fund - mean_fund) * bench_dev;
        bench_variance += bench_dev * bench_dev;
    }

    let beta = safe_div(covariance, bench_variance);
    let mean_days = returns.iter().map(|r| r.days).sum::<f64>() / n;
    let alpha = (mean_fund - beta * mean_bench) * safe_div(DAYS_PER_YEAR, mean_days);
    Some((alpha, beta))
}
