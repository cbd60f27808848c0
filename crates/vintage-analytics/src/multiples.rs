//! Investment multiples: TVPI, DPI and RVPI.
//!
//! Multiples relate money out to money in without any time weighting.
//! All three share the denominator of total paid-in capital, so for any
//! fund `TVPI = DPI + RVPI`. A fund with no contributions has undefined
//! multiples, surfaced as NaN and nulled by the report layer.

use vintage_core::types::CashFlowSeries;
use vintage_math::safe::{decimal_to_f64, safe_div};

/// Total value to paid-in: `(distributions + final NAV) / contributions`.
///
/// # Example
///
/// ```rust
/// use vintage_analytics::multiples::tvpi;
/// use vintage_core::prelude::*;
///
/// let fund = CashFlowSeries::from_rows(&[
///     FundRow::flow("2021-01-01", dec!(-1000)),
///     FundRow::flow("2022-01-01", dec!(600)).with_nav(dec!(750)),
/// ])?;
/// assert_eq!(tvpi(&fund), 1.35);
/// # Ok::<(), vintage_core::ValidationError>(())
/// ```
#[must_use]
pub fn tvpi(fund: &CashFlowSeries) -> f64 {
    let distributions = decimal_to_f64(fund.total_distributions());
    let nav = decimal_to_f64(fund.final_nav());
    let contributions = decimal_to_f64(fund.total_contributions());
    safe_div(distributions + nav, contributions)
}

/// Distributed to paid-in: `distributions / contributions`.
#[must_use]
pub fn dpi(fund: &CashFlowSeries) -> f64 {
    let distributions = decimal_to_f64(fund.total_distributions());
    let contributions = decimal_to_f64(fund.total_contributions());
    safe_div(distributions, contributions)
}

/// Residual value to paid-in: `final NAV / contributions`.
#[must_use]
pub fn rvpi(fund: &CashFlowSeries) -> f64 {
    let nav = decimal_to_f64(fund.final_nav());
    let contributions = decimal_to_f64(fund.total_contributions());
    safe_div(nav, contributions)
}
