//! # Vintage Core
//!
//! Core types and input validation for the Vintage private fund analytics library.
//!
//! This crate provides the foundational building blocks used throughout Vintage:
//!
//! - **Types**: Domain-specific types like `Date`, `CashFlowEntry`, `CashFlowSeries`,
//!   `BenchmarkSeries`
//! - **Records**: Tabular row types (`FundRow`, `BenchmarkRow`) for loading
//!   column-mapped uploads into validated series
//! - **Day Count Conventions**: Actual/365 year fractions used for discounting
//!   and annualization
//! - **Validation**: Row-indexed input errors raised before any metric is computed
//!
//! ## Sign Convention
//!
//! Capital calls (contributions) are negative, distributions are positive.
//! Multiple flows on the same date are merged into one net amount per date.
//!
//! ## Example
//!
//! ```rust
//! use vintage_core::prelude::*;
//!
//! let rows = vec![
//!     FundRow::flow("2020-01-01", dec!(-1000000)),
//!     FundRow::flow("2021-01-01", dec!(600000)),
//!     FundRow::flow("2022-01-01", dec!(600000)),
//! ];
//! let series = CashFlowSeries::from_rows(&rows).unwrap();
//! assert_eq!(series.total_contributions(), dec!(1000000));
//! assert_eq!(series.total_distributions(), dec!(1200000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{Act365Fixed, DayCount};
    pub use crate::error::{ValidationError, ValidationResult};
    pub use crate::types::{
        BenchmarkPoint, BenchmarkRow, BenchmarkSeries, CashFlowEntry, CashFlowSeries, Date,
        FundRow, ValuationEntry,
    };

    // Re-export decimal arithmetic from dependencies
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}

// Re-export commonly used types at crate root
pub use error::{ValidationError, ValidationResult};
pub use types::{BenchmarkSeries, CashFlowSeries, Date};
