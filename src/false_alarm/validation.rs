//! false_alarm::validation — shared input guards for the FAP estimators.
//!
//! Purpose
//! -------
//! Centralize the argument checks that every public false-alarm entry point
//! performs before any periodogram or solver work: observation arrays,
//! maximum frequency, significance levels and degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - Fail fast with a structured [`FapError`] that names the offending field
//!   and, where relevant, its index and value.
//! - Perform no allocation beyond error construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - `t`, `y`, `dy` share one length `N ≥ 2`; every entry is finite and every
//!   `dy` is strictly positive.
//! - The time baseline `max t − min t` is strictly positive.
//! - `fmax` is finite and `> 0`.
//! - Significance levels lie in `(0, 1]`.
//! - Analytic estimators need `dK − dH = 2` and positive residual freedom.
//!
//! Downstream usage
//! ----------------
//! - `data::Observations::new` calls [`validate_observations`].
//! - `api` calls [`validate_max_frequency`], [`validate_significance`] and
//!   [`validate_dof`] before dispatching to a method.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and one success path per guard.

use crate::{
    false_alarm::errors::{FapError, FapResult},
    normalization::DegreesOfFreedom,
};

/// Minimum number of observations accepted by [`validate_observations`].
pub const MIN_OBSERVATIONS: usize = 2;

/// Validate observation times, measurements and uncertainties.
///
/// Parameters
/// ----------
/// - `t`: observation times.
/// - `y`: measurements, same length as `t`.
/// - `dy`: per-point uncertainties, same length as `t`, strictly positive.
///
/// Errors
/// ------
/// - `FapError::InsufficientData` when `t.len() < 2`.
/// - `FapError::LengthMismatch` when `y` or `dy` differ in length from `t`.
/// - `FapError::InvalidData` for the first non-finite `t` or `y`.
/// - `FapError::NonPositiveUncertainty` for the first `dy` that is not finite
///   and `> 0`.
/// - `FapError::DegenerateBaseline` when all times coincide.
pub fn validate_observations(t: &[f64], y: &[f64], dy: &[f64]) -> FapResult<()> {
    let n = t.len();
    if n < MIN_OBSERVATIONS {
        return Err(FapError::InsufficientData { n, min: MIN_OBSERVATIONS });
    }
    if y.len() != n {
        return Err(FapError::LengthMismatch { field: "y", expected: n, found: y.len() });
    }
    if dy.len() != n {
        return Err(FapError::LengthMismatch { field: "dy", expected: n, found: dy.len() });
    }
    check_finite("t", t)?;
    check_finite("y", y)?;
    if let Some((index, &value)) = dy.iter().enumerate().find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(FapError::NonPositiveUncertainty { index, value });
    }

    let (lo, hi) = t.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    let baseline = hi - lo;
    if !(baseline > 0.0) {
        return Err(FapError::DegenerateBaseline { value: baseline });
    }
    Ok(())
}

/// Validate the maximum frequency of the periodogram search.
///
/// # Errors
/// - `FapError::InvalidMaxFrequency` unless `fmax` is finite and `> 0`.
pub fn validate_max_frequency(fmax: f64) -> FapResult<()> {
    if !(fmax.is_finite() && fmax > 0.0) {
        return Err(FapError::InvalidMaxFrequency { value: fmax });
    }
    Ok(())
}

/// Validate significance levels; every value must lie in `(0, 1]`.
///
/// # Errors
/// - `FapError::OutOfRange` carrying the first offending value.
pub fn validate_significance<'a, I>(levels: I) -> FapResult<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    match levels.into_iter().find(|&&s| !(s > 0.0 && s <= 1.0)) {
        Some(&value) => Err(FapError::OutOfRange { value }),
        None => Ok(()),
    }
}

/// Validate degrees of freedom for the analytic estimators at sample size `n`.
///
/// Returns the residual degrees of freedom `(NH, NK)`.
///
/// # Errors
/// - `FapError::InvalidDof` when `dK ≤ dH`.
/// - `FapError::UnsupportedDegreesOfFreedom` when `dK − dH ≠ 2`.
/// - `FapError::NonPositiveDof` when `N − dK < 1` or `N − dH < 2`.
pub fn validate_dof(dof: &DegreesOfFreedom, n: usize) -> FapResult<(f64, f64)> {
    if dof.extra_parameters()? != 2 {
        return Err(FapError::UnsupportedDegreesOfFreedom { dh: dof.dh, dk: dof.dk });
    }
    Ok(dof.residuals(n)?)
}

// ---- Helpers ----

fn check_finite(field: &'static str, values: &[f64]) -> FapResult<()> {
    match values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(FapError::InvalidData { field, index, value }),
        None => Ok(()),
    }
}
