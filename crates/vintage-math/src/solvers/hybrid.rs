//! Hybrid root-finding algorithm.
//!
//! Monitored Newton-Raphson with bracketing fallbacks.

use crate::error::{MathError, MathResult};
use crate::solvers::{bisection, brent, SolverConfig, SolverResult};

/// Consecutive residual increases tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Hybrid root-finding algorithm.
///
/// Runs Newton-Raphson first for fast convergence on well-behaved
/// objectives, then walks down a fallback ladder when Newton stalls,
/// diverges, or leaves the domain:
///
/// 1. Monitored Newton-Raphson from `initial_guess`
/// 2. Brent on a bracket expanded outward from the guess
/// 3. Bisection across the full `limits` interval, when given
///
/// `limits` doubles as a hard domain restriction: Newton iterates and
/// bracket expansion never cross it. Discounting objectives need this;
/// NPV is only defined for rates above -100%.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the Newton iteration
/// * `limits` - Optional hard domain bounds `(lo, hi)` containing the guess
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics. If every rung of the ladder fails,
/// the Newton error is returned.
///
/// # Example
///
/// ```rust
/// use vintage_math::solvers::{hybrid, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    limits: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let newton_err = match newton_monitored(&f, &df, initial_guess, limits, config) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };

    if let Some((a, b)) = expand_bracket(&f, initial_guess, limits) {
        if let Ok(result) = brent(&f, a, b, config) {
            return Ok(result);
        }
    }

    if let Some((lo, hi)) = limits {
        if let Ok(result) = bisection(&f, lo, hi, config) {
            return Ok(result);
        }
    }

    Err(newton_err)
}

/// Newton-Raphson with divergence detection.
///
/// Fails fast when the residual keeps growing, the iterate leaves the
/// domain limits, or an evaluation stops being finite, handing control
/// back to the bracketing fallbacks.
fn newton_monitored<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    limits: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0u32;

    // Few iterations in hybrid mode; bracketing picks up the slack
    let newton_max_iter = config.max_iterations.min(20);

    for iteration in 0..newton_max_iter {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::non_finite(x));
        }

        let residual = fx.abs();
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::Diverged { at: x, residual });
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 {
            return Err(MathError::ZeroDerivative { at: x });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::non_finite(x));
        }
        if let Some((lo, hi)) = limits {
            if x <= lo || x >= hi {
                return Err(MathError::Diverged { at: x, residual });
            }
        }

        if step.abs() < config.tolerance {
            let residual = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual,
            });
        }
    }

    Err(MathError::convergence_failed(newton_max_iter, f(x).abs()))
}

/// Expands an interval outward from `guess` until it brackets a sign
/// change, staying inside `limits` when given.
///
/// Endpoints that evaluate non-finite are treated as unusable rather
/// than fatal; expansion simply continues past them.
fn expand_bracket<F>(f: &F, guess: f64, limits: Option<(f64, f64)>) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let (lo_limit, hi_limit) = limits.unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
    if guess <= lo_limit || guess >= hi_limit {
        return None;
    }

    let f_guess = f(guess);
    if !f_guess.is_finite() {
        return None;
    }

    let mut delta = 0.1_f64.max(guess.abs() * 0.1);

    for _ in 0..50 {
        let left = (guess - delta).max(lo_limit);
        let right = (guess + delta).min(hi_limit);

        let f_left = f(left);
        let f_right = f(right);

        if f_left.is_finite() && f_left * f_guess < 0.0 {
            return Some((left, guess));
        }
        if f_right.is_finite() && f_right * f_guess < 0.0 {
            return Some((guess, right));
        }
        if f_left.is_finite() && f_right.is_finite() && f_left * f_right < 0.0 {
            return Some((left, right));
        }

        if left <= lo_limit && right >= hi_limit {
            break;
        }

        delta *= 2.0;
        if delta > 1e6 {
            break;
        }
    }

    None
}
