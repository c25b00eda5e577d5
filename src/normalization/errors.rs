//! normalization::errors — error type for normalization tags and conversions.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the normalization
//! tag parser, the degrees-of-freedom configuration and the threshold
//! converter. Errors are small, cloneable values whose `Display` text is
//! phrased in terms of the violated domain constraint.
//!
//! Conventions
//! -----------
//! - Higher layers (`false_alarm`) flatten these variants into their own
//!   error type through a `From` conversion; Python callers see the
//!   `Display` text inside a `ValueError`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for normalization operations.
pub type NormResult<T> = Result<T, NormError>;

/// NormError — failures of normalization parsing and conversion.
///
/// Variants
/// --------
/// - `InvalidNormalization { name }`: the tag is not one of
///   `standard | model | log | psd`.
/// - `MissingReference { from, to }`: a conversion touching `psd` was
///   requested without a reference chi-square.
/// - `InvalidReference { value }`: the reference chi-square is not finite
///   and strictly positive.
/// - `InvalidDof { dh, dk }`: the null model does not nest inside the
///   alternative (`dk <= dh`).
/// - `NonPositiveDof { n, dh, dk }`: `N − dH` or `N − dK` is not positive
///   for the given sample size.
/// - `LengthMismatch { y, dy }`: measurement and uncertainty lengths differ.
/// - `EmptyInput`: no measurements were supplied.
/// - `InvalidData { index, value }`: a non-finite measurement.
/// - `NonPositiveUncertainty { index, value }`: an uncertainty that is not
///   finite and `> 0`.
#[derive(Debug, Clone, PartialEq)]
pub enum NormError {
    // ---- Tags ----
    InvalidNormalization { name: String },

    // ---- Conversion ----
    MissingReference { from: &'static str, to: &'static str },
    InvalidReference { value: f64 },

    // ---- Degrees of freedom ----
    InvalidDof { dh: usize, dk: usize },
    NonPositiveDof { n: usize, dh: usize, dk: usize },

    // ---- Reference chi-square inputs ----
    LengthMismatch { y: usize, dy: usize },
    EmptyInput,
    InvalidData { index: usize, value: f64 },
    NonPositiveUncertainty { index: usize, value: f64 },
}

impl std::error::Error for NormError {}

impl std::fmt::Display for NormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormError::InvalidNormalization { name } => write!(
                f,
                "Invalid normalization '{name}'. Valid options are 'standard', 'model', 'log' or 'psd'."
            ),
            NormError::MissingReference { from, to } => write!(
                f,
                "Converting from '{from}' to '{to}' requires a reference chi-square (chi2_ref)."
            ),
            NormError::InvalidReference { value } => {
                write!(f, "Invalid reference chi-square: {value}. Must be finite and > 0.")
            }
            NormError::InvalidDof { dh, dk } => {
                write!(f, "Invalid degrees of freedom (dH = {dh}, dK = {dk}). Must satisfy dK > dH.")
            }
            NormError::NonPositiveDof { n, dh, dk } => write!(
                f,
                "Non-positive residual degrees of freedom for N = {n} (dH = {dh}, dK = {dk}). \
                 Need N - dK >= 1 and N - dH >= 2."
            ),
            NormError::LengthMismatch { y, dy } => {
                write!(f, "Length mismatch: y has {y} values, dy has {dy}.")
            }
            NormError::EmptyInput => write!(f, "At least one measurement is required."),
            NormError::InvalidData { index, value } => {
                write!(f, "Invalid measurement at index {index}: {value}. Must be finite.")
            }
            NormError::NonPositiveUncertainty { index, value } => write!(
                f,
                "Invalid uncertainty at index {index}: {value}. Must be finite and > 0."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<NormError> for PyErr {
    fn from(err: NormError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
