//! Domain types for private fund analytics.
//!
//! This module provides type-safe representations of the engine's inputs:
//!
//! - [`Date`]: Calendar date with lenient parsing of uploaded cells
//! - [`CashFlowEntry`]: Dated signed cash flow (calls negative, distributions positive)
//! - [`ValuationEntry`]: Dated net asset value observation
//! - [`CashFlowSeries`]: Validated, merged and sorted fund history
//! - [`BenchmarkPoint`] / [`BenchmarkSeries`]: Validated index level history
//! - [`FundRow`] / [`BenchmarkRow`]: Raw tabular rows prior to validation

mod benchmark;
mod date;
mod records;
mod series;

pub use benchmark::{BenchmarkPoint, BenchmarkSeries};
pub use date::Date;
pub use records::{BenchmarkRow, FundRow};
pub use series::{CashFlowEntry, CashFlowSeries, ValuationEntry};
