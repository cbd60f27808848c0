//! # Vintage Analytics
//!
//! Performance and benchmark-relative metrics for private fund cash
//! flows: the metrics layer of the Vintage private fund analytics
//! library.
//!
//! This crate provides:
//!
//! - **IRR**: XIRR over irregularly dated flows, actual/365
//! - **Multiples**: TVPI, DPI, RVPI
//! - **PME**: Kaplan-Schoar, PME+ lambda, direct alpha and Long-Nickels
//!   against an aligned benchmark, plus the benchmark's own IRR
//! - **Risk statistics**: volatility, max drawdown, alpha and beta from
//!   flow-adjusted NAV returns
//! - **Reporting**: a fixed-vocabulary, JSON-safe [`MetricsReport`]
//!   assembled by the [`MetricsEngine`] facade
//!
//! ## Design Philosophy
//!
//! - **Per-metric containment**: one metric failing nulls its key, never
//!   the run
//! - **Sanitized output**: no NaN or raw infinity ever reaches a report;
//!   undefined is null, overflow is a string sentinel
//! - **Deterministic reports**: identical inputs serialize to identical
//!   bytes
//!
//! ## Example
//!
//! ```rust
//! use vintage_analytics::prelude::*;
//! use vintage_core::prelude::*;
//!
//! let fund = vec![
//!     FundRow::flow("2020-01-01", dec!(-1000000)),
//!     FundRow::flow("2021-01-01", dec!(600000)),
//!     FundRow::flow("2022-01-01", dec!(600000)).with_nav(dec!(150000)),
//! ];
//! let benchmark = vec![
//!     BenchmarkRow::new("2020-01-01", dec!(100)),
//!     BenchmarkRow::new("2021-01-01", dec!(110)),
//!     BenchmarkRow::new("2022-01-01", dec!(121)),
//! ];
//!
//! let report = MetricsEngine::new().run_rows(&fund, Some(&benchmark))?;
//! assert_eq!(report.get(MetricKey::Tvpi).as_f64(), Some(1.35));
//! assert!(report.get(MetricKey::KsPme).as_f64().unwrap() > 1.0);
//! # Ok::<(), ValidationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod align;
pub mod engine;
pub mod error;
pub mod multiples;
pub mod pme;
pub mod report;
pub mod stats;
pub mod xirr;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::align::{align, AlignedPoint, AlignedSeries};
    pub use crate::engine::MetricsEngine;
    pub use crate::error::IrrFailure;
    pub use crate::multiples::{dpi, rvpi, tvpi};
    pub use crate::pme::{benchmark_irr, direct_alpha, ks_pme, long_nickels_pme, pme_plus_lambda};
    pub use crate::report::{MetricKey, MetricValue, MetricsReport};
    pub use crate::stats::{alpha_beta, max_drawdown, volatility};
    pub use crate::xirr::{npv, xirr};

    pub use vintage_math::solvers::SolverConfig;
}

pub use engine::MetricsEngine;
pub use error::IrrFailure;
pub use report::{MetricKey, MetricValue, MetricsReport};
