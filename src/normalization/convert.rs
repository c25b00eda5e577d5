//! normalization::convert — threshold conversion between power normalizations.
//!
//! Purpose
//! -------
//! Map a periodogram threshold `Z` expressed in one normalization to the
//! equivalent value in another, and compute the reference chi-square that
//! anchors the absolute (`psd`) scale.
//!
//! Key behaviors
//! -------------
//! - Identity conversions return the input unchanged (exact copy).
//! - Conversions among `standard`, `model` and `log` use direct closed forms
//!   (`expm1`/`ln1p` where they avoid cancellation).
//! - Conversions touching `psd` route through `standard` and need
//!   `chi2_ref`: `psd → X = standard → X(2 Z / chi2_ref)` and
//!   `X → psd = chi2_ref / 2 · (X → standard)(Z)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Arguments are validated once per call; the element-wise map itself is
//!   infallible and preserves the input shape.
//! - Sample size and degrees of freedom are accepted for the floating-mean
//!   model but do not enter the formulas and are not checked.
//! - Values outside a normalization's natural domain (e.g. `Z > 1` in
//!   `standard`) are not rejected; they propagate as `NaN`/`±inf`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover identity, round-trips through every pair, the psd
//!   reference requirement and the reference chi-square formula.
use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::normalization::{
    errors::{NormError, NormResult},
    kind::{DegreesOfFreedom, Normalization},
};

/// Convert thresholds `z` from normalization `from` to `to`.
///
/// Parameters
/// ----------
/// - `z`: thresholds of any dimensionality.
/// - `n`: number of observations behind the periodogram.
/// - `from`, `to`: source and target normalizations.
/// - `chi2_ref`: reference chi-square (see [`compute_chi2_ref`]); required
///   iff exactly one side is `psd`.
/// - `dof`: model degrees of freedom.
///
/// `n` and `dof` describe the periodogram's model. The closed forms of the
/// floating-mean model do not depend on them, so they are not validated here.
///
/// Returns
/// -------
/// An owned array of the same shape as `z`.
///
/// Errors
/// ------
/// - `NormError::MissingReference` when a `psd` conversion lacks `chi2_ref`.
/// - `NormError::InvalidReference` when `chi2_ref` is not finite and `> 0`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use lomb_scargle_fap::normalization::{convert_normalization, DegreesOfFreedom, Normalization};
/// let z = array![0.1, 0.5];
/// let m = convert_normalization(
///     &z, 50, Normalization::Standard, Normalization::Model, None, &DegreesOfFreedom::default(),
/// ).unwrap();
/// assert!((m[1] - 1.0).abs() < 1e-12);
/// ```
pub fn convert_normalization<S, D>(
    z: &ArrayBase<S, D>, _n: usize, from: Normalization, to: Normalization,
    chi2_ref: Option<f64>, _dof: &DegreesOfFreedom,
) -> NormResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if from == to {
        return Ok(z.to_owned());
    }
    let converter = Converter::new(from, to, chi2_ref)?;
    Ok(z.mapv(|value| converter.apply(value)))
}

/// Scalar form of [`convert_normalization`].
pub fn convert_value(
    z: f64, _n: usize, from: Normalization, to: Normalization, chi2_ref: Option<f64>,
    _dof: &DegreesOfFreedom,
) -> NormResult<f64> {
    if from == to {
        return Ok(z);
    }
    Ok(Converter::new(from, to, chi2_ref)?.apply(z))
}

/// Reference chi-square of the weighted, mean-subtracted measurements.
///
/// With `w = dy⁻²` and `ȳ = Σ w y / Σ w`, returns `Σ ((y − ȳ)/dy)² / mean(w)`.
/// This is the anchor of the `psd` scale and assumes the periodogram fits
/// a floating mean.
///
/// Errors
/// ------
/// - `NormError::LengthMismatch` when `y` and `dy` differ in length.
/// - `NormError::EmptyInput` when no measurements are given.
/// - `NormError::InvalidData` for a non-finite `y`.
/// - `NormError::NonPositiveUncertainty` for a `dy` that is not finite and `> 0`.
pub fn compute_chi2_ref(y: &[f64], dy: &[f64]) -> NormResult<f64> {
    if y.len() != dy.len() {
        return Err(NormError::LengthMismatch { y: y.len(), dy: dy.len() });
    }
    if y.is_empty() {
        return Err(NormError::EmptyInput);
    }
    for (index, (&yi, &si)) in y.iter().zip(dy).enumerate() {
        if !yi.is_finite() {
            return Err(NormError::InvalidData { index, value: yi });
        }
        if !(si.is_finite() && si > 0.0) {
            return Err(NormError::NonPositiveUncertainty { index, value: si });
        }
    }

    let (sum_w, sum_wy) = y.iter().zip(dy).fold((0.0, 0.0), |(sw, swy), (&yi, &si)| {
        let w = si.powi(-2);
        (sw + w, swy + w * yi)
    });
    let y_mean = sum_wy / sum_w;
    let chi2: f64 = y
        .iter()
        .zip(dy)
        .map(|(&yi, &si)| {
            let r = (yi - y_mean) / si;
            r * r
        })
        .sum();
    Ok(chi2 / (sum_w / y.len() as f64))
}

// ---- Helpers ----

/// A validated `from → to` mapping.
#[derive(Debug, Clone, Copy)]
struct Converter {
    from: Normalization,
    to: Normalization,
    chi2_ref: f64,
}

impl Converter {
    fn new(from: Normalization, to: Normalization, chi2_ref: Option<f64>) -> NormResult<Self> {
        let needs_reference = from != to && (from == Normalization::Psd || to == Normalization::Psd);
        let chi2_ref = match (needs_reference, chi2_ref) {
            (false, _) => f64::NAN,
            (true, None) => {
                return Err(NormError::MissingReference { from: from.as_str(), to: to.as_str() });
            }
            (true, Some(value)) if !(value.is_finite() && value > 0.0) => {
                return Err(NormError::InvalidReference { value });
            }
            (true, Some(value)) => value,
        };
        Ok(Self { from, to, chi2_ref })
    }

    fn apply(&self, z: f64) -> f64 {
        use Normalization::*;
        match (self.from, self.to) {
            (a, b) if a == b => z,
            (Psd, to) => from_standard(to, 2.0 * z / self.chi2_ref),
            (from, Psd) => 0.5 * self.chi2_ref * to_standard(from, z),
            (Model, Log) => z.ln_1p(),
            (Log, Model) => z.exp_m1(),
            (from, to) => from_standard(to, to_standard(from, z)),
        }
    }
}

fn to_standard(from: Normalization, z: f64) -> f64 {
    match from {
        Normalization::Model => z / (1.0 + z),
        Normalization::Log => -(-z).exp_m1(),
        Normalization::Standard | Normalization::Psd => z,
    }
}

fn from_standard(to: Normalization, z: f64) -> f64 {
    match to {
        Normalization::Model => z / (1.0 - z),
        Normalization::Log => -(-z).ln_1p(),
        Normalization::Standard | Normalization::Psd => z,
    }
}
