//! Fund cash flow and valuation series.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::records::FundRow;
use super::Date;
use crate::error::{ValidationError, ValidationResult};

/// A single dated fund cash flow.
///
/// Sign convention: capital calls (contributions) are negative,
/// distributions back to investors are positive.
///
/// # Example
///
/// ```rust
/// use vintage_core::types::{CashFlowEntry, Date};
/// use rust_decimal_macros::dec;
///
/// let call = CashFlowEntry::new(Date::from_ymd(2020, 1, 1).unwrap(), dec!(-250000));
/// assert!(call.is_contribution());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// Flow date
    date: Date,
    /// Signed amount
    amount: Decimal,
}

impl CashFlowEntry {
    /// Creates a new cash flow entry.
    #[must_use]
    pub fn new(date: Date, amount: Decimal) -> Self {
        Self { date, amount }
    }

    /// Returns the flow date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the signed amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if this is a capital call (negative amount).
    #[must_use]
    pub fn is_contribution(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if this is a distribution (positive amount).
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl fmt::Display for CashFlowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.amount)
    }
}

/// A dated net asset value observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationEntry {
    /// Valuation date
    date: Date,
    /// Net asset value, non-negative
    nav: Decimal,
}

impl ValuationEntry {
    /// Creates a new valuation entry.
    #[must_use]
    pub fn new(date: Date, nav: Decimal) -> Self {
        Self { date, nav }
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the net asset value.
    #[must_use]
    pub fn nav(&self) -> Decimal {
        self.nav
    }
}

impl fmt::Display for ValuationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: NAV {}", self.date, self.nav)
    }
}

/// A validated fund history: merged cash flows plus NAV observations.
///
/// Construction enforces the series invariants, so every downstream
/// calculator can assume them:
///
/// - at least one cash flow entry
/// - flows on the same date merged into one net amount
/// - entries and valuations sorted ascending by date
/// - at most one NAV per date (the last occurrence wins)
/// - all NAVs non-negative
///
/// The type deliberately does not implement `Deserialize`; series are
/// loaded through [`CashFlowSeries::from_rows`] or built from entries via
/// [`CashFlowSeries::new`] so that no unvalidated instance can exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowSeries {
    /// Net flow per date, ascending
    entries: Vec<CashFlowEntry>,
    /// NAV observations, ascending
    valuations: Vec<ValuationEntry>,
}

impl CashFlowSeries {
    /// Creates a series from flow and valuation entries.
    ///
    /// Flows sharing a date are summed into a single net entry; duplicate
    /// valuation dates keep the last supplied NAV. Both collections are
    /// sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySeries` if `flows` is empty, or
    /// `ValidationError::NegativeNav` (indexed by position in `valuations`)
    /// if any NAV is negative.
    pub fn new(
        flows: Vec<CashFlowEntry>,
        valuations: Vec<ValuationEntry>,
    ) -> ValidationResult<Self> {
        if flows.is_empty() {
            return Err(ValidationError::empty_series("cash flow"));
        }

        let mut merged: BTreeMap<Date, Decimal> = BTreeMap::new();
        for flow in &flows {
            *merged.entry(flow.date()).or_insert(Decimal::ZERO) += flow.amount();
        }

        let mut navs: BTreeMap<Date, Decimal> = BTreeMap::new();
        for (row, valuation) in valuations.iter().enumerate() {
            if valuation.nav() < Decimal::ZERO {
                return Err(ValidationError::NegativeNav {
                    row,
                    value: valuation.nav(),
                });
            }
            navs.insert(valuation.date(), valuation.nav());
        }

        Ok(Self {
            entries: merged
                .into_iter()
                .map(|(date, amount)| CashFlowEntry::new(date, amount))
                .collect(),
            valuations: navs
                .into_iter()
                .map(|(date, nav)| ValuationEntry::new(date, nav))
                .collect(),
        })
    }

    /// Loads a series from tabular upload rows.
    ///
    /// Each row must parse to a date and carry at least one value. A signed
    /// `cashflow` cell takes precedence; otherwise the net flow is
    /// `distribution - contribution` (both entered as positive magnitudes).
    /// A `nav` cell adds a valuation observation for the row's date.
    ///
    /// # Errors
    ///
    /// Returns a row-indexed `ValidationError` for the first unparseable
    /// date, value-free row or negative NAV, or `EmptySeries` if no row
    /// produced a cash flow.
    pub fn from_rows(rows: &[FundRow]) -> ValidationResult<Self> {
        let mut flows = Vec::with_capacity(rows.len());
        let mut valuations = Vec::new();

        for (row, rec) in rows.iter().enumerate() {
            let date = Date::parse(rec.date()).map_err(|e| e.at_row(row))?;
            let amount = rec.net_amount();
            let nav = rec.nav();

            if amount.is_none() && nav.is_none() {
                return Err(ValidationError::EmptyRow { row });
            }
            if let Some(amount) = amount {
                flows.push(CashFlowEntry::new(date, amount));
            }
            if let Some(nav) = nav {
                if nav < Decimal::ZERO {
                    return Err(ValidationError::NegativeNav { row, value: nav });
                }
                valuations.push(ValuationEntry::new(date, nav));
            }
        }

        Self::new(flows, valuations)
    }

    /// Returns the merged cash flow entries, ascending by date.
    #[must_use]
    pub fn entries(&self) -> &[CashFlowEntry] {
        &self.entries
    }

    /// Returns the NAV observations, ascending by date.
    #[must_use]
    pub fn valuations(&self) -> &[ValuationEntry] {
        &self.valuations
    }

    /// Returns the number of merged cash flow entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no cash flow entries.
    ///
    /// Always false for a validated series; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the earliest date across flows and valuations.
    #[must_use]
    pub fn first_date(&self) -> Date {
        let first_flow = self.entries[0].date();
        match self.valuations.first() {
            Some(v) if v.date() < first_flow => v.date(),
            _ => first_flow,
        }
    }

    /// Returns the date of the last cash flow entry.
    #[must_use]
    pub fn last_flow_date(&self) -> Date {
        self.entries[self.entries.len() - 1].date()
    }

    /// Returns the most recent NAV observation, if any.
    #[must_use]
    pub fn final_valuation(&self) -> Option<ValuationEntry> {
        self.valuations.last().copied()
    }

    /// Returns the most recent NAV, or zero for a fully realized fund.
    #[must_use]
    pub fn final_nav(&self) -> Decimal {
        self.final_valuation().map_or(Decimal::ZERO, |v| v.nav())
    }

    /// Returns the series end date: the date of the authoritative (latest)
    /// valuation, or the last flow date when no valuation exists.
    #[must_use]
    pub fn final_date(&self) -> Date {
        self.final_valuation()
            .map_or_else(|| self.last_flow_date(), |v| v.date())
    }

    /// Returns the total capital called, as a positive amount.
    ///
    /// Computed from the merged per-date net amounts: a date whose call and
    /// distribution offset each other contributes only its net.
    #[must_use]
    pub fn total_contributions(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.is_contribution())
            .map(|e| -e.amount())
            .sum()
    }

    /// Returns the total distributed, as a positive amount.
    #[must_use]
    pub fn total_distributions(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.is_distribution())
            .map(CashFlowEntry::amount)
            .sum()
    }

    /// Returns the IRR-ready flow list: every merged entry, plus the final
    /// NAV appended as a synthetic terminal distribution when positive.
    #[must_use]
    pub fn as_signed_series(&self) -> Vec<CashFlowEntry> {
        let mut flows = self.entries.clone();
        let nav = self.final_nav();
        if nav > Decimal::ZERO {
            flows.push(CashFlowEntry::new(self.final_date(), nav));
        }
        flows
    }
}
