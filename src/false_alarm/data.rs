//! false_alarm::data — validated observation container.
//!
//! [`Observations`] owns the time series `(t, y, dy)` behind a periodogram
//! and exposes the derived quantities the estimators need: the time
//! baseline, the inverse-variance weighted spread of the sampling times and
//! bootstrap resampling of the `(y, dy)` pairs.
use ndarray::Array1;

use crate::false_alarm::{errors::FapResult, validation::validate_observations};

/// Unevenly sampled time series with per-point uncertainties.
///
/// Invariants (enforced by [`Observations::new`]):
/// - `t`, `y`, `dy` share one length `N ≥ 2`.
/// - Every entry is finite; every `dy > 0`.
/// - `max t > min t`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    t: Array1<f64>,
    y: Array1<f64>,
    dy: Array1<f64>,
}

impl Observations {
    /// Validate and copy `(t, y, dy)`.
    ///
    /// # Errors
    /// See [`validate_observations`].
    pub fn new(t: &[f64], y: &[f64], dy: &[f64]) -> FapResult<Self> {
        validate_observations(t, y, dy)?;
        Ok(Self {
            t: Array1::from_vec(t.to_vec()),
            y: Array1::from_vec(y.to_vec()),
            dy: Array1::from_vec(dy.to_vec()),
        })
    }

    /// Observations with unit uncertainties, `dy = 1` everywhere.
    pub fn unweighted(t: &[f64], y: &[f64]) -> FapResult<Self> {
        Self::new(t, y, &vec![1.0; t.len()])
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn t(&self) -> &Array1<f64> {
        &self.t
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn dy(&self) -> &Array1<f64> {
        &self.dy
    }

    /// Time baseline `max t − min t`.
    pub fn baseline(&self) -> f64 {
        let (lo, hi) = self.t.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
        hi - lo
    }

    /// Variance of `t` weighted by `dy⁻²`: `Σ w t² / Σ w − (Σ w t / Σ w)²`.
    ///
    /// Computed around the weighted mean to avoid cancellation for large
    /// time offsets.
    pub fn weighted_time_variance(&self) -> f64 {
        let w = self.dy.mapv(|s| s.powi(-2));
        let sum_w = w.sum();
        let mean = w.dot(&self.t) / sum_w;
        let centered = self.t.mapv(|v| (v - mean) * (v - mean));
        w.dot(&centered) / sum_w
    }

    /// Copy with `(y, dy)` replaced by the pairs at `indices`; `t` is kept.
    ///
    /// Indices are expected to be in `0..N` and `indices.len() == N`; every
    /// resampled pair is one of the validated originals, so the invariants
    /// continue to hold.
    pub fn resample(&self, indices: &[usize]) -> Self {
        Self {
            t: self.t.clone(),
            y: indices.iter().map(|&i| self.y[i]).collect(),
            dy: indices.iter().map(|&i| self.dy[i]).collect(),
        }
    }
}
