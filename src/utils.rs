//! utils — conversion helpers for the PyO3 layer.
//!
//! Turns Python array-likes and keyword arguments into the validated Rust
//! types of `false_alarm` and `normalization`. Everything here is compiled
//! only with the `python-bindings` feature.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};

#[cfg(feature = "python-bindings")]
use crate::false_alarm::{BootstrapOptions, DEFAULT_BOOTSTRAPS, Observations};

/// Borrow a contiguous `f64` view of a numpy array, a pandas Series (via
/// `to_numpy`) or any sequence of floats, copying only in the last case.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>()
        && arr_ro.as_slice().is_ok()
    {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None)
        && let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>()
        && series_ro.as_slice().is_ok()
    {
        return Ok(series_ro);
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy an array-like into an owned vector.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyTypeError::new_err("expected a 1-D contiguous float64 array or sequence")
    })?;
    Ok(slice.to_vec())
}

/// Build validated [`Observations`]; a missing `dy` means unit
/// uncertainties.
#[cfg(feature = "python-bindings")]
pub fn extract_observations<'py>(
    py: Python<'py>, t: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, dy: Option<&Bound<'py, PyAny>>,
) -> PyResult<Observations> {
    let t = extract_f64_vec(py, t)?;
    let y = extract_f64_vec(py, y)?;
    let obs = match dy {
        Some(dy) => Observations::new(&t, &y, &extract_f64_vec(py, dy)?)?,
        None => Observations::unweighted(&t, &y)?,
    };
    Ok(obs)
}

/// Bootstrap options from keyword arguments; `None` when neither is given.
#[cfg(feature = "python-bindings")]
pub fn extract_bootstrap_options(
    n_bootstraps: Option<usize>, seed: Option<u64>,
) -> PyResult<Option<BootstrapOptions>> {
    if n_bootstraps.is_none() && seed.is_none() {
        return Ok(None);
    }
    Ok(Some(BootstrapOptions::new(n_bootstraps.unwrap_or(DEFAULT_BOOTSTRAPS), seed)?))
}
