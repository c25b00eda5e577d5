//! false_alarm::single — null distribution of the power at one frequency.
//!
//! Purpose
//! -------
//! Closed forms for the survival function, its logarithm, the density, the
//! CDF and the inverse survival function of a single periodogram power `Z`
//! under the no-signal hypothesis. These are the building blocks of every
//! analytic false-alarm estimator.
//!
//! Key behaviors
//! -------------
//! With `NK = N − dK`:
//!
//! | normalization | survival `P(Z' > Z)`   | density                        |
//! |---------------|------------------------|--------------------------------|
//! | `psd`         | `exp(−Z)`              | `exp(−Z)`                      |
//! | `standard`    | `(1 − Z)^(NK/2)`       | `NK/2 · (1 − Z)^(NK/2 − 1)`    |
//! | `model`       | `(1 + Z)^(−NK/2)`      | `NK/2 · (1 + Z)^(−NK/2 − 1)`   |
//! | `log`         | `exp(−NK·Z/2)`         | `NK/2 · exp(−NK·Z/2)`          |
//!
//! Invariants & assumptions
//! ------------------------
//! - The public functions validate `N` against the degrees of freedom and
//!   then evaluate element-wise without further checks; `Z` outside the
//!   natural domain of a normalization propagates as `NaN`.
//! - The crate-private kernels take a precomputed `NK` and are infallible;
//!   the multi-frequency estimators call them in their inner loops.
//!
//! Testing notes
//! -------------
//! - Unit tests check the closed forms, survival + CDF = 1, the density as
//!   the derivative of the CDF and the inverse survival round-trip.
use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::{
    false_alarm::{errors::FapResult, validation::validate_dof},
    normalization::{DegreesOfFreedom, Normalization},
};

/// Single-frequency false-alarm probability `P(Z' > Z)` for `n` observations.
///
/// Parameters
/// ----------
/// - `z`: power thresholds of any dimensionality.
/// - `n`: number of observations.
/// - `normalization`: normalization of `z`.
/// - `dof`: model degrees of freedom; must satisfy `dK − dH = 2`.
///
/// Errors
/// ------
/// - `FapError::UnsupportedDegreesOfFreedom`, `FapError::NonPositiveDof`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use lomb_scargle_fap::false_alarm::fap_single;
/// # use lomb_scargle_fap::normalization::{DegreesOfFreedom, Normalization};
/// let p = fap_single(&array![0.0, 1.0], 10, Normalization::Psd, &DegreesOfFreedom::default())
///     .unwrap();
/// assert_eq!(p[0], 1.0);
/// assert!((p[1] - (-1.0f64).exp()).abs() < 1e-15);
/// ```
pub fn fap_single<S, D>(
    z: &ArrayBase<S, D>, n: usize, normalization: Normalization, dof: &DegreesOfFreedom,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (_, nk) = validate_dof(dof, n)?;
    Ok(z.mapv(|v| survival(v, nk, normalization)))
}

/// Natural log of [`fap_single`], accurate where the probability underflows.
pub fn log_fap_single<S, D>(
    z: &ArrayBase<S, D>, n: usize, normalization: Normalization, dof: &DegreesOfFreedom,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (_, nk) = validate_dof(dof, n)?;
    Ok(z.mapv(|v| log_survival(v, nk, normalization)))
}

/// Density of the single-frequency power under the null.
pub fn pdf_single<S, D>(
    z: &ArrayBase<S, D>, n: usize, normalization: Normalization, dof: &DegreesOfFreedom,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (_, nk) = validate_dof(dof, n)?;
    Ok(z.mapv(|v| density(v, nk, normalization)))
}

/// CDF of the single-frequency power, `1 − fap_single`.
pub fn cdf_single<S, D>(
    z: &ArrayBase<S, D>, n: usize, normalization: Normalization, dof: &DegreesOfFreedom,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (_, nk) = validate_dof(dof, n)?;
    Ok(z.mapv(|v| 1.0 - survival(v, nk, normalization)))
}

/// Power threshold whose single-frequency false-alarm probability is `p`.
///
/// Inverse of [`fap_single`] in closed form; `p` is expected in `(0, 1]`.
pub fn inv_fap_single<S, D>(
    p: &ArrayBase<S, D>, n: usize, normalization: Normalization, dof: &DegreesOfFreedom,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (_, nk) = validate_dof(dof, n)?;
    Ok(p.mapv(|v| inverse_survival(v, nk, normalization)))
}

// ---- Kernels ----

pub(crate) fn survival(z: f64, nk: f64, normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Psd => (-z).exp(),
        Normalization::Standard => (1.0 - z).powf(0.5 * nk),
        Normalization::Model => (1.0 + z).powf(-0.5 * nk),
        Normalization::Log => (-0.5 * nk * z).exp(),
    }
}

pub(crate) fn log_survival(z: f64, nk: f64, normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Psd => -z,
        Normalization::Standard => 0.5 * nk * (-z).ln_1p(),
        Normalization::Model => -0.5 * nk * z.ln_1p(),
        Normalization::Log => -0.5 * nk * z,
    }
}

pub(crate) fn density(z: f64, nk: f64, normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Psd => (-z).exp(),
        Normalization::Standard => 0.5 * nk * (1.0 - z).powf(0.5 * nk - 1.0),
        Normalization::Model => 0.5 * nk * (1.0 + z).powf(-0.5 * nk - 1.0),
        Normalization::Log => 0.5 * nk * (-0.5 * nk * z).exp(),
    }
}

pub(crate) fn inverse_survival(p: f64, nk: f64, normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Psd => -p.ln(),
        Normalization::Standard => -(2.0 / nk * p.ln()).exp_m1(),
        Normalization::Model => (-2.0 / nk * p.ln()).exp_m1(),
        Normalization::Log => -2.0 / nk * p.ln(),
    }
}
