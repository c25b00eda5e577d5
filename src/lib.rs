//! lomb_scargle_fap — false-alarm probabilities for Lomb-Scargle periodograms,
//! with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the false-alarm estimators and normalization helpers to Python via
//! the `_lomb_scargle_fap` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`false_alarm`, `normalization`,
//!   `optimization`, `periodogram`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for
//!   `_lomb_scargle_fap`, with `false_alarm` and `normalization` submodules
//!   registered in `sys.modules` so dot-notation imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument conversion and error mapping.
//! - Python callers pass one-dimensional array-likes; results come back as
//!   one-dimensional `numpy.ndarray`s.
//!
//! Conventions
//! -----------
//! - Errors from the core are converted to `ValueError` at the PyO3
//!   boundary; argument type errors surface as `TypeError`.
//! - Keyword defaults mirror the Rust defaults: `standard` normalization,
//!   `baluev` method, `dH = 1`, `dK = 3`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on the inner modules directly and can ignore
//!   every item guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_fap_pipeline.rs`; the bindings are thin enough that
//!   they are exercised from Python only.

pub mod false_alarm;
pub mod normalization;
pub mod optimization;
pub mod periodogram;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    false_alarm::{self as fap, BootstrapOptions, Observations},
    normalization::{DegreesOfFreedom, Normalization},
    utils::{extract_bootstrap_options, extract_f64_vec, extract_observations},
};

/// Shared conversion of the FAP-style arguments.
#[cfg(feature = "python-bindings")]
fn fap_inputs<'py>(
    py: Python<'py>, values: &Bound<'py, PyAny>, t: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
    dy: Option<&Bound<'py, PyAny>>, n_bootstraps: Option<usize>, seed: Option<u64>,
) -> PyResult<(Array1<f64>, Observations, Option<BootstrapOptions>)> {
    let values = Array1::from_vec(extract_f64_vec(py, values)?);
    let obs = extract_observations(py, t, y, dy)?;
    let boot = extract_bootstrap_options(n_bootstraps, seed)?;
    Ok((values, obs, boot))
}

/// false_alarm_probability(z, fmax, t, y, dy=None, normalization="standard",
/// method="baluev", n_bootstraps=None, seed=None)
///
/// False-alarm probability of each peak power in `z` for a periodogram
/// searched up to `fmax`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    z, fmax, t, y, dy = None, normalization = "standard", method = "baluev",
    n_bootstraps = None, seed = None
))]
pub fn false_alarm_probability<'py>(
    py: Python<'py>, z: &Bound<'py, PyAny>, fmax: f64, t: &Bound<'py, PyAny>,
    y: &Bound<'py, PyAny>, dy: Option<&Bound<'py, PyAny>>, normalization: &str, method: &str,
    n_bootstraps: Option<usize>, seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (z, obs, boot) = fap_inputs(py, z, t, y, dy, n_bootstraps, seed)?;
    let out = fap::false_alarm_probability(&z, fmax, &obs, normalization, method, boot)?;
    Ok(out.into_pyarray(py))
}

/// log_false_alarm_probability(z, fmax, t, y, dy=None,
/// normalization="standard", method="baluev", n_bootstraps=None, seed=None)
///
/// Natural log of `false_alarm_probability`, finite deep in the tail.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    z, fmax, t, y, dy = None, normalization = "standard", method = "baluev",
    n_bootstraps = None, seed = None
))]
pub fn log_false_alarm_probability<'py>(
    py: Python<'py>, z: &Bound<'py, PyAny>, fmax: f64, t: &Bound<'py, PyAny>,
    y: &Bound<'py, PyAny>, dy: Option<&Bound<'py, PyAny>>, normalization: &str, method: &str,
    n_bootstraps: Option<usize>, seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (z, obs, boot) = fap_inputs(py, z, t, y, dy, n_bootstraps, seed)?;
    let out = fap::log_false_alarm_probability(&z, fmax, &obs, normalization, method, boot)?;
    Ok(out.into_pyarray(py))
}

/// significance_level(significance, fmax, t, y, dy=None,
/// normalization="standard", method="baluev", n_bootstraps=None, seed=None)
///
/// Peak power needed to reach each significance level in `(0, 1]`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    significance, fmax, t, y, dy = None, normalization = "standard", method = "baluev",
    n_bootstraps = None, seed = None
))]
pub fn significance_level<'py>(
    py: Python<'py>, significance: &Bound<'py, PyAny>, fmax: f64, t: &Bound<'py, PyAny>,
    y: &Bound<'py, PyAny>, dy: Option<&Bound<'py, PyAny>>, normalization: &str, method: &str,
    n_bootstraps: Option<usize>, seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (sig, obs, boot) = fap_inputs(py, significance, t, y, dy, n_bootstraps, seed)?;
    let out = fap::significance_level(&sig, fmax, &obs, normalization, method, boot)?;
    Ok(out.into_pyarray(py))
}

/// convert_normalization(z, n, from_normalization, to_normalization,
/// chi2_ref=None, dh=1, dk=3)
///
/// Convert thresholds between power normalizations.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (z, n, from_normalization, to_normalization, chi2_ref = None, dh = 1, dk = 3))]
pub fn convert_normalization<'py>(
    py: Python<'py>, z: &Bound<'py, PyAny>, n: usize, from_normalization: &str,
    to_normalization: &str, chi2_ref: Option<f64>, dh: usize, dk: usize,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let z = Array1::from_vec(extract_f64_vec(py, z)?);
    let from: Normalization = from_normalization.parse()?;
    let to: Normalization = to_normalization.parse()?;
    let dof = DegreesOfFreedom::new(dh, dk)?;
    let out = crate::normalization::convert_normalization(&z, n, from, to, chi2_ref, &dof)?;
    Ok(out.into_pyarray(py))
}

/// compute_chi2_ref(y, dy)
///
/// Reference chi-square of the weighted, mean-subtracted measurements.
#[cfg(feature = "python-bindings")]
#[pyfunction]
pub fn compute_chi2_ref<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, dy: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let y = extract_f64_vec(py, y)?;
    let dy = extract_f64_vec(py, dy)?;
    Ok(crate::normalization::compute_chi2_ref(&y, &dy)?)
}

/// Python module initializer for `_lomb_scargle_fap`.
///
/// Creates the `false_alarm` and `normalization` submodules, registers them
/// under the parent module and in `sys.modules` as
/// `lomb_scargle_fap.false_alarm` / `lomb_scargle_fap.normalization`.
///
/// Errors
/// ------
/// - `PyErr` if creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _lomb_scargle_fap<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let false_alarm_mod = PyModule::new(_py, "false_alarm")?;
    let normalization_mod = PyModule::new(_py, "normalization")?;
    false_alarm_module(_py, m, &false_alarm_mod)?;
    normalization_module(_py, m, &normalization_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("lomb_scargle_fap.false_alarm", false_alarm_mod)?;
    modules.set_item("lomb_scargle_fap.normalization", normalization_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn false_alarm_module<'py>(
    _py: Python, parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(false_alarm_probability, m)?)?;
    m.add_function(wrap_pyfunction!(log_false_alarm_probability, m)?)?;
    m.add_function(wrap_pyfunction!(significance_level, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn normalization_module<'py>(
    _py: Python, parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert_normalization, m)?)?;
    m.add_function(wrap_pyfunction!(compute_chi2_ref, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}
