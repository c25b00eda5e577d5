//! Numerical stability utilities for log-space probability arithmetic.
//!
//! Provides guarded implementations of the handful of transcendental
//! combinations that appear in tail probabilities and that lose all
//! precision (or overflow) in naïve form.
//!
//! # Provided items
//! - [`log1mexp(x)`]: `ln(1 − eˣ)` for `x ≤ 0`, switching between
//!   `ln1p(−eˣ)` and `ln(−expm1(x))` at `x = −ln 2`.
//! - [`log_add_exp(a, b)`]: `ln(eᵃ + eᵇ)` with a max-shift.
//! - [`ln_sinh(x)`]: `ln(sinh x)` for `x ≥ 0` without overflowing `sinh`.
//! - [`LOG_DOMAIN_FLOOR`]: smallest positive argument handed to a
//!   log-domain search.

/// Smallest positive value used as a log-domain lower bracket.
pub const LOG_DOMAIN_FLOOR: f64 = 1e-12;

/// Stable `ln(1 − exp(x))` for `x ≤ 0`.
///
/// Uses `ln1p(−exp(x))` for `x < −ln 2` and `ln(−expm1(x))` otherwise
/// (Mächler, 2012). Returns `−∞` at `x = 0` and `0` at `x = −∞`; positive
/// `x` yields `NaN`.
pub fn log1mexp(x: f64) -> f64 {
    if x < -std::f64::consts::LN_2 { (-x.exp()).ln_1p() } else { (-x.exp_m1()).ln() }
}

/// Stable `ln(exp(a) + exp(b))`.
///
/// Both arguments equal to `−∞` give `−∞` (the log of zero) instead of `NaN`.
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if hi == f64::NEG_INFINITY || hi == f64::INFINITY {
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// `ln(sinh(x))` for `x ≥ 0`, evaluated as `x − ln 2 + ln(1 − e^{−2x})`.
pub fn ln_sinh(x: f64) -> f64 {
    x - std::f64::consts::LN_2 + log1mexp(-2.0 * x)
}
