//! Analytics error types.

use thiserror::Error;

use vintage_math::MathError;

/// Why an IRR-style rate could not be produced for a flow series.
///
/// These are expected business states rather than defects; the engine
/// facade maps every variant to a null report value instead of failing
/// the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrrFailure {
    /// Fewer than two dated flows, so no discounting window exists.
    #[error("IRR needs at least 2 dated cash flows, got {count}")]
    TooFewFlows {
        /// Number of flows supplied
        count: usize,
    },

    /// All non-zero amounts share one sign, so NPV has no root.
    #[error("cash flows never change sign; the NPV function has no root")]
    NoSignChange,

    /// The solver ladder exhausted its options.
    #[error("IRR root finding failed: {0}")]
    DidNotConverge(#[from] MathError),
}
