//! periodogram::lomb_scargle — generalized (floating-mean) Lomb-Scargle.
//!
//! Purpose
//! -------
//! Evaluate the weighted Lomb-Scargle periodogram of an unevenly sampled
//! series on an automatic frequency grid. The false-alarm layer uses it as
//! the default engine, most heavily for the bootstrap.
//!
//! Key behaviors
//! -------------
//! - Fits `y ≈ c + a·cos(ωt) + b·sin(ωt)` by weighted least squares with
//!   weights `dy⁻²` at every frequency and reports the `standard` power
//!   `1 − χ²(ω)/χ²_ref`, then converts to the requested normalization.
//! - The grid starts at `df/2` (or `minimum_frequency`), steps by
//!   `df = 1/(T·samples_per_peak)` and ends at `maximum_frequency`, or at
//!   `nyquist_factor` times the average Nyquist frequency `N/(2T)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are validated by construction (`Observations::new`).
//! - A frequency at which the design is singular (`cos` and `sin` columns
//!   collinear after centering) has power 0.
//! - `standard` powers are clamped to `[0, 1]` before conversion.
//!
//! Testing notes
//! -------------
//! - Unit tests recover the frequency of a clean sinusoid, check the grid
//!   rule and the normalization conversions of the reported powers.
use std::f64::consts::PI;

use ndarray::Array1;

use crate::{
    false_alarm::{
        data::Observations,
        errors::{FapError, FapResult},
    },
    normalization::{DegreesOfFreedom, Normalization, compute_chi2_ref, convert_normalization},
    periodogram::{Periodogram, Spectrum},
};

/// Lomb-Scargle engine settings.
///
/// Fields
/// ------
/// - `samples_per_peak`: grid oversampling relative to `1/T` (default 5).
/// - `nyquist_factor`: multiple of the average Nyquist frequency used when
///   no maximum frequency is given (default 5).
/// - `minimum_frequency`: first grid frequency; `None` means `df/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LombScargle {
    pub samples_per_peak: f64,
    pub nyquist_factor: f64,
    pub minimum_frequency: Option<f64>,
}

impl LombScargle {
    /// # Errors
    /// - `FapError::InvalidEngineSetting` when a setting is not finite and
    ///   `> 0` (`minimum_frequency` may be 0).
    pub fn new(
        samples_per_peak: f64, nyquist_factor: f64, minimum_frequency: Option<f64>,
    ) -> FapResult<Self> {
        if !(samples_per_peak.is_finite() && samples_per_peak > 0.0) {
            return Err(FapError::InvalidEngineSetting {
                name: "samples_per_peak",
                value: samples_per_peak,
            });
        }
        if !(nyquist_factor.is_finite() && nyquist_factor > 0.0) {
            return Err(FapError::InvalidEngineSetting {
                name: "nyquist_factor",
                value: nyquist_factor,
            });
        }
        if let Some(value) = minimum_frequency
            && !(value.is_finite() && value >= 0.0)
        {
            return Err(FapError::InvalidEngineSetting { name: "minimum_frequency", value });
        }
        Ok(Self { samples_per_peak, nyquist_factor, minimum_frequency })
    }

    /// Frequency grid for `obs`, ending at `maximum_frequency` if given.
    ///
    /// # Errors
    /// - `FapError::EmptyPeriodogram` when the upper end lies below the first
    ///   grid frequency.
    pub fn autofrequency(
        &self, obs: &Observations, maximum_frequency: Option<f64>,
    ) -> FapResult<Array1<f64>> {
        let baseline = obs.baseline();
        let df = 1.0 / (baseline * self.samples_per_peak);
        let f_min = self.minimum_frequency.unwrap_or(0.5 * df);
        let f_max = maximum_frequency
            .unwrap_or(f_min + self.nyquist_factor * 0.5 * obs.len() as f64 / baseline);
        if !(f_max >= f_min) {
            return Err(FapError::EmptyPeriodogram);
        }
        let n_freq = 1 + ((f_max - f_min) / df).round() as usize;
        Ok(Array1::from_iter((0..n_freq).map(|k| f_min + df * k as f64)))
    }

    /// Power at each of `frequency`, in `normalization`.
    ///
    /// Measurements without variance about their weighted mean have zero
    /// power in every normalization.
    ///
    /// # Errors
    /// - Errors of [`compute_chi2_ref`] for `psd`.
    pub fn power(
        &self, obs: &Observations, frequency: &Array1<f64>, normalization: Normalization,
    ) -> FapResult<Array1<f64>> {
        let standard = standard_power(obs, frequency);
        let chi2_ref = match normalization {
            Normalization::Psd => {
                let (y, dy) = (obs.y().to_vec(), obs.dy().to_vec());
                let chi2_ref = compute_chi2_ref(&y, &dy)?;
                if !(chi2_ref > 0.0) {
                    return Ok(Array1::zeros(frequency.len()));
                }
                Some(chi2_ref)
            }
            _ => None,
        };
        Ok(convert_normalization(
            &standard,
            obs.len(),
            Normalization::Standard,
            normalization,
            chi2_ref,
            &DegreesOfFreedom::default(),
        )?)
    }
}

impl Default for LombScargle {
    fn default() -> Self {
        Self { samples_per_peak: 5.0, nyquist_factor: 5.0, minimum_frequency: None }
    }
}

impl Periodogram for LombScargle {
    fn autopower(
        &self, obs: &Observations, normalization: Normalization, maximum_frequency: Option<f64>,
    ) -> FapResult<Spectrum> {
        let frequency = self.autofrequency(obs, maximum_frequency)?;
        let power = self.power(obs, &frequency, normalization)?;
        Ok(Spectrum { frequency, power })
    }
}

// ---- Helpers ----

/// Floating-mean weighted Lomb-Scargle power in the `standard` normalization.
fn standard_power(obs: &Observations, frequency: &Array1<f64>) -> Array1<f64> {
    let w = obs.dy().mapv(|s| s.powi(-2));
    let w = &w / w.sum();
    let y_mean = w.dot(obs.y());
    let yc = obs.y().mapv(|v| v - y_mean);
    let yy = w.dot(&yc.mapv(|v| v * v));
    // Constant data leaves only rounding residue of order ε·|ȳ|.
    if !(yy > (8.0 * f64::EPSILON * y_mean).powi(2)) {
        return Array1::zeros(frequency.len());
    }

    frequency.mapv(|f| {
        let omega = 2.0 * PI * f;
        let (mut c, mut s, mut yc_sum, mut ys_sum) = (0.0, 0.0, 0.0, 0.0);
        let (mut cc, mut ss, mut cs) = (0.0, 0.0, 0.0);
        for ((&ti, &wi), &ri) in obs.t().iter().zip(w.iter()).zip(yc.iter()) {
            let (sin, cos) = (omega * ti).sin_cos();
            c += wi * cos;
            s += wi * sin;
            yc_sum += wi * ri * cos;
            ys_sum += wi * ri * sin;
            cc += wi * cos * cos;
            ss += wi * sin * sin;
            cs += wi * cos * sin;
        }
        let cc = cc - c * c;
        let ss = ss - s * s;
        let cs = cs - c * s;
        let det = cc * ss - cs * cs;
        if !(det > f64::EPSILON * (cc * ss).abs()) {
            return 0.0;
        }
        let p = (ss * yc_sum * yc_sum + cc * ys_sum * ys_sum - 2.0 * cs * yc_sum * ys_sum) / (yy * det);
        p.clamp(0.0, 1.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Peak recovery for a noiseless sinusoid.
    // - The frequency-grid rule with and without a maximum frequency.
    // - Normalization of the reported powers and setting validation.
    // -------------------------------------------------------------------------

    fn sinusoid(freq: f64) -> Observations {
        let t: Vec<f64> = (0..60).map(|i| 0.37 * i as f64 + 0.11 * ((i * i) % 7) as f64).collect();
        let y: Vec<f64> = t.iter().map(|v| 3.0 + (2.0 * PI * freq * v + 0.4).sin()).collect();
        let dy: Vec<f64> = (0..60).map(|i| 0.2 + 0.05 * (i % 4) as f64).collect();
        Observations::new(&t, &y, &dy).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A noiseless sinusoid is fitted exactly at its frequency.
    //
    // Given
    // -----
    // - y = 3 + sin(2π·0.3·t + 0.4), fmax = 1.
    //
    // Expect
    // ------
    // - Peak frequency within one grid step of 0.3, peak power close to 1.
    fn recovers_sinusoid_frequency() {
        // Arrange
        let obs = sinusoid(0.3);
        let engine = LombScargle::default();

        // Act
        let spectrum = engine.autopower(&obs, Normalization::Standard, Some(1.0)).unwrap();

        // Assert
        let (idx, _) = spectrum
            .power
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &p)| if p > best.1 { (i, p) } else { best });
        let df = 1.0 / (obs.baseline() * engine.samples_per_peak);
        assert!((spectrum.frequency[idx] - 0.3).abs() <= df, "peak at {}", spectrum.frequency[idx]);
        assert!(spectrum.max_power().unwrap() > 0.9);
        assert!(spectrum.power.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    // Purpose
    // -------
    // The grid starts at df/2, steps by df and stops near the requested
    // maximum.
    //
    // Given
    // -----
    // - Default settings, maximum frequency 2.
    //
    // Expect
    // ------
    // - First frequency df/2, constant spacing df, last within df/2 of 2.
    fn autofrequency_follows_grid_rule() {
        let obs = sinusoid(0.3);
        let engine = LombScargle::default();
        let df = 1.0 / (obs.baseline() * 5.0);

        let grid = engine.autofrequency(&obs, Some(2.0)).unwrap();

        assert_relative_eq!(grid[0], 0.5 * df, max_relative = 1e-12);
        assert_relative_eq!(grid[1] - grid[0], df, max_relative = 1e-9);
        assert!((grid[grid.len() - 1] - 2.0).abs() <= 0.5 * df + 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without a maximum the grid extends to nyquist_factor times the
    // average Nyquist frequency.
    //
    // Given
    // -----
    // - nyquist_factor = 2, no maximum frequency.
    //
    // Expect
    // ------
    // - Last frequency within df/2 of df/2 + 2·N/(2T).
    fn autofrequency_defaults_to_nyquist_multiple() {
        let obs = sinusoid(0.3);
        let engine = LombScargle::new(5.0, 2.0, None).unwrap();
        let t_span = obs.baseline();
        let df = 1.0 / (t_span * 5.0);

        let grid = engine.autofrequency(&obs, None).unwrap();

        let expected = 0.5 * df + 2.0 * 0.5 * obs.len() as f64 / t_span;
        assert!((grid[grid.len() - 1] - expected).abs() <= 0.5 * df + 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Reported powers follow the requested normalization.
    //
    // Given
    // -----
    // - The same grid evaluated in standard and model normalizations.
    //
    // Expect
    // ------
    // - model = standard / (1 − standard) elementwise.
    fn power_is_converted_to_requested_normalization() {
        let obs = sinusoid(0.3);
        let engine = LombScargle::default();
        let grid = engine.autofrequency(&obs, Some(0.5)).unwrap();

        let standard = engine.power(&obs, &grid, Normalization::Standard).unwrap();
        let model = engine.power(&obs, &grid, Normalization::Model).unwrap();

        for (s, m) in standard.iter().zip(model.iter()).filter(|(s, _)| **s < 0.9) {
            assert_relative_eq!(*m, s / (1.0 - s), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Constant measurements give zero power instead of a conversion error,
    // also in psd where the reference chi-square vanishes.
    //
    // Given
    // -----
    // - y ≡ 4.2 with unequal uncertainties, every normalization.
    //
    // Expect
    // ------
    // - All powers are exactly 0.
    fn constant_measurements_have_zero_power() {
        let t = [0.0, 0.4, 1.3, 2.1, 3.0];
        let obs = Observations::new(&t, &[4.2; 5], &[0.5, 1.0, 0.7, 2.0, 0.9]).unwrap();
        let engine = LombScargle::default();
        let grid = engine.autofrequency(&obs, Some(2.0)).unwrap();

        for norm in Normalization::ALL {
            let power = engine.power(&obs, &grid, norm).unwrap();
            assert!(power.iter().all(|&p| p == 0.0), "{norm}: {power}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Invalid settings are rejected at construction.
    //
    // Given
    // -----
    // - samples_per_peak = 0; minimum_frequency = −1.
    //
    // Expect
    // ------
    // - `InvalidEngineSetting` naming the field.
    fn new_rejects_invalid_settings() {
        match LombScargle::new(0.0, 5.0, None) {
            Err(FapError::InvalidEngineSetting { name: "samples_per_peak", .. }) => (),
            other => panic!("expected InvalidEngineSetting, got {other:?}"),
        }
        match LombScargle::new(5.0, 5.0, Some(-1.0)) {
            Err(FapError::InvalidEngineSetting { name: "minimum_frequency", .. }) => (),
            other => panic!("expected InvalidEngineSetting, got {other:?}"),
        }
    }
}
