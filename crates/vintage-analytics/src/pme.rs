//! Public market equivalent metrics.
//!
//! PME metrics answer one question four ways: how did the fund do against
//! putting the same money into the benchmark on the same dates? All four
//! work on an [`AlignedSeries`], future-valuing each flow to the fund's
//! terminal date by the benchmark growth factor over the holding span.
//!
//! - **Kaplan-Schoar**: ratio of future-valued outcomes to future-valued
//!   contributions. Above 1.0 means the fund beat the benchmark.
//! - **PME+ lambda**: the scaling factor on distributions that would make
//!   the benchmark-replicating portfolio end at exactly the fund's NAV.
//!   Below 1.0 means distributions had to be scaled down, i.e. the fund
//!   outperformed.
//! - **Direct alpha**: the continuously compounded rate remaining in the
//!   flows after benchmark growth is stripped out. Zero means the fund
//!   matched the benchmark exactly.
//! - **Long-Nickels**: the IRR the benchmark would have produced under
//!   the fund's own call and distribution schedule, for side-by-side
//!   comparison with the fund IRR.
//!
//! [`benchmark_irr`] supplements these with the benchmark's own
//! annualized return over the fund's window.

use vintage_core::types::Date;
use vintage_math::safe::safe_div;
use vintage_math::solvers::SolverConfig;

use crate::align::AlignedSeries;
use crate::error::IrrFailure;
use crate::xirr::xirr;

/// Future values of the fund's flows at the terminal date, split into
/// contributions (returned positive) and distributions.
fn future_values(aligned: &AlignedSeries) -> (f64, f64) {
    let mut fv_contributions = 0.0;
    let mut fv_distributions = 0.0;
    for point in aligned.flows() {
        let fv = point.amount() * aligned.growth_to_terminal(point);
        if fv < 0.0 {
            fv_contributions -= fv;
        } else {
            fv_distributions += fv;
        }
    }
    (fv_contributions, fv_distributions)
}

/// The residual NAV carried to the terminal date.
///
/// The latest valuation defines the terminal date, so its growth factor
/// is written out for symmetry with the flow future-values.
fn residual_nav_value(aligned: &AlignedSeries) -> f64 {
    aligned.final_valuation().map_or(0.0, |point| {
        point.nav().unwrap_or(0.0) * aligned.growth_to_terminal(point)
    })
}

/// Each flow future-valued to the terminal date, keeping its sign.
fn future_valued_flows(aligned: &AlignedSeries) -> Vec<(Date, f64)> {
    aligned
        .flows()
        .map(|point| (point.date(), point.amount() * aligned.growth_to_terminal(point)))
        .collect()
}

/// Kaplan-Schoar PME.
///
/// `(FV(distributions) + NAV) / FV(contributions)`, all future-valued at
/// benchmark growth. Undefined (NaN) for a fund with no contributions.
///
/// Against a flat benchmark every growth factor is 1, and the ratio
/// degenerates to TVPI.
#[must_use]
pub fn ks_pme(aligned: &AlignedSeries) -> f64 {
    let (fv_contributions, fv_distributions) = future_values(aligned);
    safe_div(
        fv_distributions + residual_nav_value(aligned),
        fv_contributions,
    )
}

/// PME+ lambda, in the closed form `(FV(contributions) - NAV) /
/// FV(distributions)`.
///
/// Scaling every distribution by lambda makes the benchmark-replicating
/// portfolio end exactly at the fund's NAV. Undefined (NaN) for a fund
/// that never distributed.
#[must_use]
pub fn pme_plus_lambda(aligned: &AlignedSeries) -> f64 {
    let (fv_contributions, fv_distributions) = future_values(aligned);
    safe_div(
        fv_contributions - residual_nav_value(aligned),
        fv_distributions,
    )
}

/// Direct alpha: the continuously compounded excess return over the
/// benchmark.
///
/// Future-values every flow (and the residual NAV) to the terminal date,
/// then solves for the IRR left in those flows. Benchmark growth is
/// already stripped out, so the remaining rate is pure excess; it is
/// returned as `ln(1 + irr)`.
///
/// # Errors
///
/// Propagates the underlying [`IrrFailure`] when the future-valued series
/// has no solvable IRR.
pub fn direct_alpha(
    aligned: &AlignedSeries,
    config: &SolverConfig,
) -> Result<f64, IrrFailure> {
    let mut flows = future_valued_flows(aligned);
    let nav = residual_nav_value(aligned);
    if nav > 0.0 {
        flows.push((aligned.terminal_date(), nav));
    }
    let rate = xirr(&flows, config)?;
    Ok((1.0 + rate).ln())
}

/// Long-Nickels PME: the IRR of the benchmark-replicating portfolio.
///
/// Takes the fund's actual flows and appends the replicating portfolio's
/// terminal value, `FV(contributions) - FV(distributions)`. That value
/// goes in even when negative: a fund that distributed more than the
/// benchmark earned leaves the replicating portfolio short.
///
/// # Errors
///
/// Propagates the underlying [`IrrFailure`] when the replicating series
/// has no solvable IRR.
pub fn long_nickels_pme(
    aligned: &AlignedSeries,
    config: &SolverConfig,
) -> Result<f64, IrrFailure> {
    let (fv_contributions, fv_distributions) = future_values(aligned);
    let replicating_nav = fv_contributions - fv_distributions;

    let mut flows: Vec<(Date, f64)> = aligned
        .flows()
        .map(|point| (point.date(), point.amount()))
        .collect();
    if replicating_nav != 0.0 {
        flows.push((aligned.terminal_date(), replicating_nav));
    }
    xirr(&flows, config)
}

/// Annualized benchmark return over the fund's window, actual/365.
///
/// `(terminal / inception)^(365 / days) - 1`. NaN when the window is
/// empty or inverted (a single-date fund).
#[must_use]
pub fn benchmark_irr(aligned: &AlignedSeries) -> f64 {
    let days = aligned
        .inception_date()
        .days_between(&aligned.terminal_date());
    if days <= 0 {
        return f64::NAN;
    }
    safe_div(aligned.terminal_level(), aligned.inception_level()).powf(365.0 / days as f64) - 1.0
}
