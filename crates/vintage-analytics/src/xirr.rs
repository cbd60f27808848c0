//! Internal rate of return for irregularly dated cash flows.
//!
//! The IRR is the annual rate at which the net present value of a dated
//! flow series is zero, with time measured in actual/365 years from the
//! earliest flow. Dates need not be periodic, which is what distinguishes
//! this from a spreadsheet `IRR` and matches `XIRR`.
//!
//! The solve runs on amounts rescaled by the largest magnitude in the
//! series, so convergence tolerances behave identically for funds
//! reporting in dollars and in billions.

use vintage_core::daycounts::{Act365Fixed, DayCount};
use vintage_core::types::Date;
use vintage_math::solvers::{hybrid, SolverConfig};

use crate::error::IrrFailure;

/// Starting rate for the solver: 10% annual.
pub const IRR_INITIAL_GUESS: f64 = 0.10;

/// Lower rate bound, just above total loss where discounting blows up.
pub const MIN_RATE: f64 = -0.999_999;

/// Upper rate bound. Rates beyond 100,000% annually are noise.
pub const MAX_RATE: f64 = 1_000.0;

/// Net present value of dated flows at an annual rate.
///
/// Each amount is discounted by `(1 + rate)^-t`, where `t` is the
/// actual/365 year fraction from the earliest flow date. Returns zero for
/// an empty series.
#[must_use]
pub fn npv(flows: &[(Date, f64)], rate: f64) -> f64 {
    let Some(base) = flows.iter().map(|&(date, _)| date).min() else {
        return 0.0;
    };
    let daycount = Act365Fixed;
    flows
        .iter()
        .map(|&(date, amount)| amount * (1.0 + rate).powf(-daycount.year_fraction(base, date)))
        .sum()
}

/// Solves for the annualized internal rate of return of dated flows.
///
/// Input order does not matter; flows are sorted by date before solving.
/// The search starts from [`IRR_INITIAL_GUESS`] and is confined to
/// `(`[`MIN_RATE`]`, `[`MAX_RATE`]`)`, falling back from Newton-Raphson to
/// bracketing when the NPV curve is badly behaved.
///
/// # Errors
///
/// Returns [`IrrFailure::TooFewFlows`] for fewer than two flows,
/// [`IrrFailure::NoSignChange`] when all amounts share a sign (the NPV
/// curve then has no root), or [`IrrFailure::DidNotConverge`] when the
/// solver exhausts its fallbacks.
///
/// # Example
///
/// ```rust
/// use vintage_analytics::xirr::xirr;
/// use vintage_core::types::Date;
/// use vintage_math::solvers::SolverConfig;
///
/// let flows = vec![
///     (Date::from_ymd(2021, 1, 1)?, -1000.0),
///     (Date::from_ymd(2022, 1, 1)?, 1100.0),
/// ];
/// let rate = xirr(&flows, &SolverConfig::default())?;
/// assert!((rate - 0.10).abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn xirr(flows: &[(Date, f64)], config: &SolverConfig) -> Result<f64, IrrFailure> {
    if flows.len() < 2 {
        return Err(IrrFailure::TooFewFlows {
            count: flows.len(),
        });
    }

    let mut flows = flows.to_vec();
    flows.sort_by_key(|&(date, _)| date);

    let has_negative = flows.iter().any(|&(_, amount)| amount < 0.0);
    let has_positive = flows.iter().any(|&(_, amount)| amount > 0.0);
    if !has_negative || !has_positive {
        return Err(IrrFailure::NoSignChange);
    }

    // Mixed signs guarantee a nonzero scale.
    let scale = flows
        .iter()
        .fold(0.0_f64, |acc, &(_, amount)| acc.max(amount.abs()));

    let daycount = Act365Fixed;
    let base = flows[0].0;
    let scaled: Vec<(f64, f64)> = flows
        .iter()
        .map(|&(date, amount)| (daycount.year_fraction(base, date), amount / scale))
        .collect();

    let f = |rate: f64| discounted_sum(&scaled, rate);
    let df = |rate: f64| discounted_sum_derivative(&scaled, rate);

    let result = hybrid(f, df, IRR_INITIAL_GUESS, Some((MIN_RATE, MAX_RATE)), config)?;
    Ok(result.root)
}

fn discounted_sum(flows: &[(f64, f64)], rate: f64) -> f64 {
    flows
        .iter()
        .map(|&(t, amount)| amount * (1.0 + rate).powf(-t))
        .sum()
}

fn discounted_sum_derivative(flows: &[(f64, f64)], rate: f64) -> f64 {
    flows
        .iter()
        .map(|&(t, amount)| -t * amount * (1.0 + rate).powf(-t - 1.0))
        .sum()
}
