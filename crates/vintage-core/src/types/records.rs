//! Tabular row types for column-mapped uploads.
//!
//! Rows are the raw, unvalidated boundary of the engine: dates are still
//! strings and every value cell is optional. Loading them through
//! [`CashFlowSeries::from_rows`](super::CashFlowSeries::from_rows) or
//! [`BenchmarkSeries::from_rows`](super::BenchmarkSeries::from_rows)
//! produces validated series or a row-indexed `ValidationError`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of an uploaded fund table.
///
/// A dataset uses either the signed `cashflow` column or the separate
/// `contribution`/`distribution` columns (entered as positive magnitudes);
/// when both appear on a row, `cashflow` wins. The optional `nav` cell
/// records a valuation observation for the row's date.
///
/// # Example
///
/// ```rust
/// use vintage_core::types::FundRow;
/// use rust_decimal_macros::dec;
///
/// let row = FundRow::new("2020-03-31")
///     .with_contribution(dec!(250000))
///     .with_nav(dec!(240000));
/// assert_eq!(row.net_amount(), Some(dec!(-250000)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRow {
    /// Raw date cell, parsed during validation
    date: String,
    /// Signed net flow for the date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cashflow: Option<Decimal>,
    /// Capital called, as a positive magnitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contribution: Option<Decimal>,
    /// Capital distributed, as a positive magnitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distribution: Option<Decimal>,
    /// Net asset value observed on the date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nav: Option<Decimal>,
}

impl FundRow {
    /// Creates a row with a date and no values.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            cashflow: None,
            contribution: None,
            distribution: None,
            nav: None,
        }
    }

    /// Creates a row carrying a signed cash flow.
    #[must_use]
    pub fn flow(date: impl Into<String>, amount: Decimal) -> Self {
        Self::new(date).with_cashflow(amount)
    }

    /// Creates a row carrying only a NAV observation.
    #[must_use]
    pub fn valuation(date: impl Into<String>, nav: Decimal) -> Self {
        Self::new(date).with_nav(nav)
    }

    /// Sets the signed cash flow cell.
    #[must_use]
    pub fn with_cashflow(mut self, amount: Decimal) -> Self {
        self.cashflow = Some(amount);
        self
    }

    /// Sets the contribution cell (positive magnitude).
    #[must_use]
    pub fn with_contribution(mut self, amount: Decimal) -> Self {
        self.contribution = Some(amount);
        self
    }

    /// Sets the distribution cell (positive magnitude).
    #[must_use]
    pub fn with_distribution(mut self, amount: Decimal) -> Self {
        self.distribution = Some(amount);
        self
    }

    /// Sets the NAV cell.
    #[must_use]
    pub fn with_nav(mut self, nav: Decimal) -> Self {
        self.nav = Some(nav);
        self
    }

    /// Returns the raw date cell.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the signed cash flow cell, if present.
    #[must_use]
    pub fn cashflow(&self) -> Option<Decimal> {
        self.cashflow
    }

    /// Returns the contribution cell, if present.
    #[must_use]
    pub fn contribution(&self) -> Option<Decimal> {
        self.contribution
    }

    /// Returns the distribution cell, if present.
    #[must_use]
    pub fn distribution(&self) -> Option<Decimal> {
        self.distribution
    }

    /// Returns the NAV cell, if present.
    #[must_use]
    pub fn nav(&self) -> Option<Decimal> {
        self.nav
    }

    /// Returns the signed net flow encoded by this row, if any.
    ///
    /// A `cashflow` cell is used as-is. Otherwise, if either split column
    /// is present, the net is `distribution - contribution`, mapping calls
    /// to negative amounts.
    #[must_use]
    pub fn net_amount(&self) -> Option<Decimal> {
        if let Some(amount) = self.cashflow {
            return Some(amount);
        }
        match (self.contribution, self.distribution) {
            (None, None) => None,
            (contribution, distribution) => Some(
                distribution.unwrap_or(Decimal::ZERO) - contribution.unwrap_or(Decimal::ZERO),
            ),
        }
    }
}

/// One row of an uploaded benchmark table.
///
/// The level column is named `price` and also accepted as `index_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    /// Raw date cell, parsed during validation
    date: String,
    /// Index level on the date
    #[serde(alias = "index_level")]
    price: Decimal,
}

impl BenchmarkRow {
    /// Creates a benchmark row.
    #[must_use]
    pub fn new(date: impl Into<String>, price: Decimal) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }

    /// Returns the raw date cell.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the index level.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }
}
