//! false_alarm::errors — error type of the false-alarm estimators.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for everything reachable from
//! the public false-alarm API: observation validation, method and
//! normalization lookup, bootstrap configuration, periodogram evaluation
//! and significance inversion.
//!
//! Key behaviors
//! -------------
//! - Flatten [`NormError`] and [`OptError`] into [`FapError`] via `From`, so
//!   callers match on one enum regardless of which layer failed.
//! - Map every variant to a Python `ValueError` when the `python-bindings`
//!   feature is enabled, keeping the `Display` text verbatim.
//!
//! Conventions
//! -----------
//! - Messages name the violated constraint and echo the offending value.
//! - `InversionFailed` keeps the target probability and the name of the
//!   inverted function for diagnostics.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{normalization::errors::NormError, optimization::errors::OptError};

/// Result alias for false-alarm operations.
pub type FapResult<T> = Result<T, FapError>;

/// FapError — failures of FAP estimation and significance inversion.
///
/// Variants
/// --------
/// - Lookup: `InvalidNormalization`, `UnknownMethod`.
/// - Psd anchor: `MissingReference`, `InvalidReference`.
/// - Arguments: `OutOfRange` (significance outside `(0, 1]`),
///   `InvalidMaxFrequency`, `InvalidBootstraps`, `InvalidEngineSetting`.
/// - Observations: `InsufficientData`, `LengthMismatch`, `InvalidData`,
///   `NonPositiveUncertainty`, `DegenerateBaseline`.
/// - Degrees of freedom: `InvalidDof`, `NonPositiveDof`,
///   `UnsupportedDegreesOfFreedom`.
/// - Computation: `EmptyPeriodogram`, `InversionFailed`, `Optimization`.
#[derive(Debug, Clone, PartialEq)]
pub enum FapError {
    // ---- Lookup ----
    InvalidNormalization { name: String },
    UnknownMethod { name: String },

    // ---- Psd anchor ----
    MissingReference { from: &'static str, to: &'static str },
    InvalidReference { value: f64 },

    // ---- Arguments ----
    OutOfRange { value: f64 },
    InvalidMaxFrequency { value: f64 },
    InvalidBootstraps { n: usize },
    InvalidEngineSetting { name: &'static str, value: f64 },

    // ---- Observations ----
    InsufficientData { n: usize, min: usize },
    LengthMismatch { field: &'static str, expected: usize, found: usize },
    InvalidData { field: &'static str, index: usize, value: f64 },
    NonPositiveUncertainty { index: usize, value: f64 },
    DegenerateBaseline { value: f64 },

    // ---- Degrees of freedom ----
    InvalidDof { dh: usize, dk: usize },
    NonPositiveDof { n: usize, dh: usize, dk: usize },
    UnsupportedDegreesOfFreedom { dh: usize, dk: usize },

    // ---- Computation ----
    EmptyPeriodogram,
    InversionFailed { target: f64, function: String, reason: String },
    Optimization { text: String },
}

impl std::error::Error for FapError {}

impl std::fmt::Display for FapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Lookup ----
            FapError::InvalidNormalization { name } => write!(
                f,
                "Invalid normalization '{name}'. Valid options are 'standard', 'model', 'log' or 'psd'."
            ),
            FapError::UnknownMethod { name } => write!(
                f,
                "Unknown false-alarm method '{name}'. Valid options are 'simple', 'davies', \
                 'baluev' or 'bootstrap'."
            ),

            // ---- Psd anchor ----
            FapError::MissingReference { from, to } => write!(
                f,
                "Converting from '{from}' to '{to}' requires a reference chi-square (chi2_ref)."
            ),
            FapError::InvalidReference { value } => {
                write!(f, "Invalid reference chi-square: {value}. Must be finite and > 0.")
            }

            // ---- Arguments ----
            FapError::OutOfRange { value } => {
                write!(f, "Significance {value} is out of range. Must satisfy 0 < significance <= 1.")
            }
            FapError::InvalidMaxFrequency { value } => {
                write!(f, "Invalid maximum frequency: {value}. Must be finite and > 0.")
            }
            FapError::InvalidBootstraps { n } => {
                write!(f, "Invalid number of bootstrap resamples: {n}. Must be at least 1.")
            }
            FapError::InvalidEngineSetting { name, value } => {
                write!(f, "Invalid periodogram setting {name} = {value}.")
            }

            // ---- Observations ----
            FapError::InsufficientData { n, min } => {
                write!(f, "Need at least {min} observations, got {n}.")
            }
            FapError::LengthMismatch { field, expected, found } => {
                write!(f, "Length mismatch for {field}: expected {expected}, found {found}.")
            }
            FapError::InvalidData { field, index, value } => {
                write!(f, "Invalid {field} value at index {index}: {value}. Must be finite.")
            }
            FapError::NonPositiveUncertainty { index, value } => write!(
                f,
                "Invalid uncertainty at index {index}: {value}. Must be finite and > 0."
            ),
            FapError::DegenerateBaseline { value } => {
                write!(f, "Degenerate time baseline {value}: observation times must not all coincide.")
            }

            // ---- Degrees of freedom ----
            FapError::InvalidDof { dh, dk } => {
                write!(f, "Invalid degrees of freedom (dH = {dh}, dK = {dk}). Must satisfy dK > dH.")
            }
            FapError::NonPositiveDof { n, dh, dk } => write!(
                f,
                "Non-positive residual degrees of freedom for N = {n} (dH = {dh}, dK = {dk}). \
                 Need N - dK >= 1 and N - dH >= 2."
            ),
            FapError::UnsupportedDegreesOfFreedom { dh, dk } => write!(
                f,
                "Unsupported degrees of freedom (dH = {dh}, dK = {dk}): analytic false-alarm \
                 probabilities assume a single sinusoid, dK - dH = 2."
            ),

            // ---- Computation ----
            FapError::EmptyPeriodogram => {
                write!(f, "Periodogram has no finite power values on the frequency grid.")
            }
            FapError::InversionFailed { target, function, reason } => {
                write!(f, "Failed to invert {function} at target {target}: {reason}")
            }
            FapError::Optimization { text } => write!(f, "Optimization error: {text}"),
        }
    }
}

impl From<NormError> for FapError {
    fn from(err: NormError) -> Self {
        match err {
            NormError::InvalidNormalization { name } => FapError::InvalidNormalization { name },
            NormError::MissingReference { from, to } => FapError::MissingReference { from, to },
            NormError::InvalidReference { value } => FapError::InvalidReference { value },
            NormError::InvalidDof { dh, dk } => FapError::InvalidDof { dh, dk },
            NormError::NonPositiveDof { n, dh, dk } => FapError::NonPositiveDof { n, dh, dk },
            NormError::LengthMismatch { y, dy } => {
                FapError::LengthMismatch { field: "dy", expected: y, found: dy }
            }
            NormError::EmptyInput => FapError::InsufficientData { n: 0, min: 1 },
            NormError::InvalidData { index, value } => {
                FapError::InvalidData { field: "y", index, value }
            }
            NormError::NonPositiveUncertainty { index, value } => {
                FapError::NonPositiveUncertainty { index, value }
            }
        }
    }
}

impl From<OptError> for FapError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::InversionFailed { target, function, reason } => {
                FapError::InversionFailed { target, function, reason }
            }
            other => FapError::Optimization { text: other.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<FapError> for PyErr {
    fn from(err: FapError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
