//! Error types for input validation.
//!
//! Validation is the first of the engine's two error tiers: every variant
//! here describes malformed *input* and is raised while a series is being
//! constructed, before any metric is computed. Computational degeneracies
//! (no IRR sign change, zero denominators, missing benchmark) are not
//! errors at all; they surface downstream as null metric values.
//!
//! Row indices are zero-based positions in the caller-supplied table.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while validating engine inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required input series contained no usable entries.
    #[error("{series} series contains no entries")]
    EmptySeries {
        /// Which input series was empty (e.g. "cash flow", "benchmark").
        series: &'static str,
    },

    /// A date string could not be parsed in any accepted format.
    #[error("unrecognized date: {value:?}")]
    MalformedDate {
        /// The offending date string.
        value: String,
    },

    /// A date cell in a tabular upload could not be parsed.
    #[error("row {row}: unrecognized date: {value:?}")]
    InvalidDate {
        /// Zero-based row index in the source table.
        row: usize,
        /// The offending date string.
        value: String,
    },

    /// A row carried a date but neither a cash flow nor a valuation.
    #[error("row {row}: no cash flow or NAV value present")]
    EmptyRow {
        /// Zero-based row index in the source table.
        row: usize,
    },

    /// A net asset value was negative.
    #[error("row {row}: NAV must be non-negative, got {value}")]
    NegativeNav {
        /// Zero-based row index in the source table.
        row: usize,
        /// The offending NAV.
        value: Decimal,
    },

    /// A benchmark index level was zero or negative.
    #[error("row {row}: benchmark level must be positive, got {value}")]
    NonPositiveLevel {
        /// Zero-based row index in the source table.
        row: usize,
        /// The offending index level.
        value: Decimal,
    },

    /// The benchmark series has too few distinct dates to be usable.
    #[error("benchmark requires at least {required} distinct dates, got {actual}")]
    InsufficientBenchmarkData {
        /// Minimum number of distinct benchmark dates.
        required: usize,
        /// Number of distinct dates actually supplied.
        actual: usize,
    },
}

impl ValidationError {
    /// Creates an empty series error.
    #[must_use]
    pub fn empty_series(series: &'static str) -> Self {
        Self::EmptySeries { series }
    }

    /// Creates a malformed date error.
    #[must_use]
    pub fn malformed_date(value: impl Into<String>) -> Self {
        Self::MalformedDate {
            value: value.into(),
        }
    }

    /// Attaches a table row index to this error.
    ///
    /// A `MalformedDate` raised while parsing a cell becomes a row-indexed
    /// `InvalidDate`; variants that already carry a row are left unchanged.
    #[must_use]
    pub fn at_row(self, row: usize) -> Self {
        match self {
            Self::MalformedDate { value } => Self::InvalidDate { row, value },
            other => other,
        }
    }
}
