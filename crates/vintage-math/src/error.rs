//! Error types for numerical routines.
//!
//! Solver failures are ordinary outcomes here, not bugs: an objective with
//! no sign change in its domain has no root to find. Callers decide
//! whether a variant is an expected business state or worth logging.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// The error type for numerical routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Solver hit the iteration cap without meeting tolerance.
    #[error("convergence failed after {iterations} iterations (residual: {residual})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final absolute residual.
        residual: f64,
    },

    /// Bracketing endpoints do not straddle a sign change.
    #[error("invalid bracket [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    InvalidBracket {
        /// Lower endpoint.
        a: f64,
        /// Upper endpoint.
        b: f64,
        /// Objective at the lower endpoint.
        fa: f64,
        /// Objective at the upper endpoint.
        fb: f64,
    },

    /// Derivative vanished at the current iterate.
    #[error("zero derivative at x = {at}")]
    ZeroDerivative {
        /// Iterate where the derivative vanished.
        at: f64,
    },

    /// Objective or iterate stopped being finite.
    #[error("non-finite evaluation at x = {at}")]
    NonFinite {
        /// Point at or after which the computation left the finite range.
        at: f64,
    },

    /// Newton iteration walked away from the root.
    #[error("iteration diverging at x = {at} (residual: {residual})")]
    Diverged {
        /// Iterate where divergence was declared.
        at: f64,
        /// Absolute residual at that iterate.
        residual: f64,
    },
}

impl MathError {
    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates a non-finite evaluation error.
    #[must_use]
    pub fn non_finite(at: f64) -> Self {
        Self::NonFinite { at }
    }
}
