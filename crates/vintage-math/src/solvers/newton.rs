//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// Quadratic convergence near a simple root, but requires the analytic
/// derivative and a reasonable starting point. Every evaluation is
/// checked for finiteness so that objectives with a restricted domain
/// (discounting breaks down at rates of -100% and below) fail cleanly
/// instead of iterating on NaN.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if the iteration hits
/// a zero derivative, leaves the finite range, or fails to converge.
///
/// # Example
///
/// ```rust
/// use vintage_math::solvers::{newton_raphson, SolverConfig};
///
/// // NPV of (-100 now, +121 in two periods) as a function of rate
/// let f = |r: f64| -100.0 + 121.0 / ((1.0 + r) * (1.0 + r));
/// let df = |r: f64| -242.0 / (1.0 + r).powi(3);
///
/// let result = newton_raphson(f, df, 0.05, &SolverConfig::default()).unwrap();
/// assert!((result.root - 0.10).abs() < 1e-9);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::non_finite(x));
        }

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(MathError::ZeroDerivative { at: x });
        }

        let step = fx / dfx;
        x -= step;
        if !x.is_finite() {
            return Err(MathError::non_finite(x));
        }

        // A vanishing step means the iterate has stopped moving
        if step.abs() < config.tolerance * (1.0 + x.abs()) {
            let residual = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
