//! # Vintage Math
//!
//! Numerical routines for the Vintage private fund analytics library.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding (Newton-Raphson, Brent, Bisection, and a
//!   monitored hybrid ladder) for IRR-style discounting objectives
//! - **Guarded arithmetic**: Division and coercion helpers that never
//!   panic, mapping degenerate inputs to a default or NaN
//!
//! ## Design Philosophy
//!
//! - **Fail into values, not panics**: degenerate numerics surface as NaN
//!   or typed errors that the analytics layer turns into null metrics
//! - **Numerical stability**: divergence monitoring, finite-value guards,
//!   and domain limits for objectives only defined above -100% rates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod safe;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::safe::{decimal_to_f64, safe_div, safe_divide};
    pub use crate::solvers::{bisection, brent, hybrid, newton_raphson, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
