//! The metrics engine facade.
//!
//! [`MetricsEngine`] runs every metric over a fund and an optional
//! benchmark and assembles a [`MetricsReport`]. Failures are contained
//! per metric: a series whose IRR has no root still reports its
//! multiples, and running without a benchmark nulls only the
//! benchmark-dependent keys. The engine never returns a partial report
//! and never panics on degenerate data.

use tracing::{debug, warn};

use vintage_core::types::{BenchmarkRow, BenchmarkSeries, CashFlowSeries, Date, FundRow};
use vintage_core::ValidationResult;
use vintage_math::safe::decimal_to_f64;
use vintage_math::solvers::SolverConfig;

use crate::align::align;
use crate::error::IrrFailure;
use crate::multiples::{dpi, rvpi, tvpi};
use crate::pme::{benchmark_irr, direct_alpha, ks_pme, long_nickels_pme, pme_plus_lambda};
use crate::report::{MetricKey, MetricValue, MetricsReport};
use crate::stats::{alpha_beta, max_drawdown, volatility};
use crate::xirr::xirr;

/// Computes full metric reports for validated fund series.
///
/// The engine itself is just solver configuration; it holds no fund
/// state and one instance can serve any number of runs.
///
/// # Example
///
/// ```rust
/// use vintage_analytics::engine::MetricsEngine;
/// use vintage_analytics::report::MetricKey;
/// use vintage_core::prelude::*;
///
/// let fund = CashFlowSeries::from_rows(&[
///     FundRow::flow("2020-01-01", dec!(-1000000)),
///     FundRow::flow("2021-01-01", dec!(600000)),
///     FundRow::flow("2022-01-01", dec!(600000)),
/// ])?;
///
/// let report = MetricsEngine::new().run(&fund, None);
/// assert_eq!(report.get(MetricKey::Dpi).as_f64(), Some(1.2));
/// assert!(report.get(MetricKey::KsPme).is_null());
/// # Ok::<(), ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    /// Solver settings shared by every rate search in a run
    solver: SolverConfig,
}

impl MetricsEngine {
    /// Creates an engine with default solver settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with explicit solver settings.
    #[must_use]
    pub fn with_config(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// Returns the solver settings in use.
    #[must_use]
    pub fn solver(&self) -> SolverConfig {
        self.solver
    }

    /// Computes every metric for a fund, with benchmark-dependent keys
    /// filled only when a benchmark is supplied.
    ///
    /// Every key of the fixed vocabulary is present in the result; a
    /// metric that cannot be computed for this input is null, and the
    /// coverage flag records whether any fund date fell outside the
    /// benchmark's range.
    #[must_use]
    pub fn run(
        &self,
        fund: &CashFlowSeries,
        benchmark: Option<&BenchmarkSeries>,
    ) -> MetricsReport {
        let mut report = MetricsReport::new();

        report.set(
            MetricKey::TotalContributions,
            MetricValue::sanitize(decimal_to_f64(fund.total_contributions())),
        );
        report.set(
            MetricKey::TotalDistributions,
            MetricValue::sanitize(decimal_to_f64(fund.total_distributions())),
        );
        report.set(
            MetricKey::FinalNav,
            MetricValue::sanitize(decimal_to_f64(fund.final_nav())),
        );

        report.set(MetricKey::Tvpi, MetricValue::sanitize(tvpi(fund)));
        report.set(MetricKey::Dpi, MetricValue::sanitize(dpi(fund)));
        report.set(MetricKey::Rvpi, MetricValue::sanitize(rvpi(fund)));

        let flows = signed_flows(fund);
        report.set(
            MetricKey::FundIrr,
            irr_metric(MetricKey::FundIrr, xirr(&flows, &self.solver)),
        );

        if let Some(benchmark) = benchmark {
            let aligned = align(fund, benchmark);
            report.set_benchmark_coverage_partial(aligned.coverage_partial());

            report.set(
                MetricKey::BenchmarkIrr,
                MetricValue::sanitize(benchmark_irr(&aligned)),
            );
            report.set(MetricKey::KsPme, MetricValue::sanitize(ks_pme(&aligned)));
            report.set(
                MetricKey::PmePlusLambda,
                MetricValue::sanitize(pme_plus_lambda(&aligned)),
            );
            report.set(
                MetricKey::DirectAlpha,
                irr_metric(
                    MetricKey::DirectAlpha,
                    direct_alpha(&aligned, &self.solver),
                ),
            );
            report.set(
                MetricKey::LongNickelsPme,
                irr_metric(
                    MetricKey::LongNickelsPme,
                    long_nickels_pme(&aligned, &self.solver),
                ),
            );

            report.set(
                MetricKey::Volatility,
                MetricValue::from_option(volatility(&aligned)),
            );
            report.set(
                MetricKey::MaxDrawdown,
                MetricValue::from_option(max_drawdown(&aligned)),
            );

            let regression = alpha_beta(&aligned);
            report.set(
                MetricKey::Alpha,
                MetricValue::from_option(regression.map(|(alpha, _)| alpha)),
            );
            report.set(
                MetricKey::Beta,
                MetricValue::from_option(regression.map(|(_, beta)| beta)),
            );
        }

        report
    }

    /// Validates tabular upload rows and computes their report.
    ///
    /// # Errors
    ///
    /// Returns the first row-indexed `ValidationError` found in either
    /// table. Validation failures are the only error path; metric
    /// degeneracies surface as null values inside the report.
    pub fn run_rows(
        &self,
        fund: &[FundRow],
        benchmark: Option<&[BenchmarkRow]>,
    ) -> ValidationResult<MetricsReport> {
        let fund = CashFlowSeries::from_rows(fund)?;
        let benchmark = benchmark.map(BenchmarkSeries::from_rows).transpose()?;
        Ok(self.run(&fund, benchmark.as_ref()))
    }
}

/// The fund's IRR-ready flow list as floats.
fn signed_flows(fund: &CashFlowSeries) -> Vec<(Date, f64)> {
    fund.as_signed_series()
        .iter()
        .map(|entry| (entry.date(), decimal_to_f64(entry.amount())))
        .collect()
}

/// Absorbs an IRR outcome into a report value.
///
/// Solver exhaustion is worth an operator's attention; structurally
/// unsolvable series (too few flows, one-sided signs) are routine and
/// logged at debug.
fn irr_metric(metric: MetricKey, outcome: Result<f64, IrrFailure>) -> MetricValue {
    match outcome {
        Ok(value) => MetricValue::sanitize(value),
        Err(failure @ IrrFailure::DidNotConverge(_)) => {
            warn!(
                metric = metric.as_str(),
                error = %failure,
                "metric solver failed; key set to null"
            );
            MetricValue::Null
        }
        Err(failure) => {
            debug!(
                metric = metric.as_str(),
                reason = %failure,
                "metric not computable for this series"
            );
            MetricValue::Null
        }
    }
}
