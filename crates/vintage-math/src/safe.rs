//! Guarded arithmetic that never panics.
//!
//! Fund data is messy: a fund with no distributions has a zero DPI
//! denominator, a zero-cost position has an undefined multiple. These
//! helpers turn every such degenerate operation into a caller-chosen
//! default or NaN, so the calculators stay total functions and the
//! report layer decides how undefined values are presented.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Divides `numerator` by `denominator`, returning `default` when the
/// denominator is zero or either operand is non-finite.
///
/// The quotient itself may still overflow to infinity for extreme
/// magnitudes; value sanitization downstream covers that case.
///
/// # Example
///
/// ```rust
/// use vintage_math::safe::safe_divide;
///
/// assert_eq!(safe_divide(10.0, 4.0, 0.0), 2.5);
/// assert_eq!(safe_divide(10.0, 0.0, 0.0), 0.0);
/// assert_eq!(safe_divide(f64::NAN, 4.0, -1.0), -1.0);
/// ```
#[must_use]
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return default;
    }
    numerator / denominator
}

/// Divides with the same guards as [`safe_divide`], defaulting to NaN.
///
/// NaN marks the quotient as undefined for downstream null handling.
#[must_use]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    safe_divide(numerator, denominator, f64::NAN)
}

/// Converts a `Decimal` to `f64`, yielding NaN when no conversion exists.
#[must_use]
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
