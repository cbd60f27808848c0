//! Root-finding solvers.
//!
//! The IRR of a dated cash flow series is the root of its NPV curve, and
//! that curve is smooth but not always friendly: front-loaded funds give
//! steep curves, near-zero-return funds give flat ones, and the objective
//! is only defined for rates above -100%. The solvers here are layered
//! accordingly:
//!
//! - [`newton_raphson`]: fast quadratic convergence when the derivative
//!   is available and the guess is decent
//! - [`brent`]: derivative-free bracketing, the workhorse fallback
//! - [`bisection`]: slow but unconditionally convergent on a bracket
//! - [`hybrid`]: monitored Newton that falls back to bracketing methods,
//!   respecting hard domain limits
//!
//! All solvers share [`SolverConfig`] for tolerance and iteration limits
//! and report a [`SolverResult`] with the root and iteration statistics.

mod bisection;
mod brent;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use brent::brent;
pub use hybrid::hybrid;
pub use newton::newton_raphson;

/// Default residual tolerance for convergence checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum number of iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for iterative solvers.
///
/// # Example
///
/// ```rust
/// use vintage_math::solvers::SolverConfig;
///
/// let config = SolverConfig::default().with_max_iterations(200);
/// assert_eq!(config.max_iterations, 200);
/// assert_eq!(config.tolerance, 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence tolerance on the absolute residual.
    pub tolerance: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: u32,
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Result of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The located root.
    pub root: f64,
    /// Iterations consumed.
    pub iterations: u32,
    /// Signed residual `f(root)` at the reported root.
    pub residual: f64,
}
