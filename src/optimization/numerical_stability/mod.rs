//! numerical_stability — log-space helpers for tail probabilities.
//!
//! Purpose
//! -------
//! Collect the small set of numerically guarded scalar transforms used by
//! the false-alarm estimators and the inversion driver, so that every
//! log-probability in the crate is built from the same primitives.
//!
//! Key behaviors
//! -------------
//! - `log1mexp`, `log_add_exp` and `ln_sinh` stay finite and accurate in the
//!   regimes where `ln(1 − eˣ)`, `ln(eᵃ + eᵇ)` and `ln(sinh x)` cancel or
//!   overflow.
//! - `LOG_DOMAIN_FLOOR` is the shared positive floor for log-domain brackets.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no validation, logging or allocation.
//!   Out-of-domain inputs propagate as `NaN` and are rejected upstream.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naïve formulas on
//!   safe grids and pin the edge values.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{LOG_DOMAIN_FLOOR, ln_sinh, log_add_exp, log1mexp};
