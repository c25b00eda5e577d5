//! false_alarm::davies — the Davies/Baluev upcrossing term `tau`.
//!
//! Purpose
//! -------
//! Compute the expected number of upcrossings of level `Z` by the null
//! periodogram over `(0, fmax]`, the correction term shared by the Davies
//! bound and the Baluev approximation.
//!
//! Key behaviors
//! -------------
//! With `W = fmax · sqrt(4π · Var_w(t))` (weights `dy⁻²`), residual degrees
//! of freedom `NH`, `NK` and
//! `γ(n) = sqrt(2/n) · exp(lnΓ(n/2) − lnΓ((n − 1)/2))`:
//!
//! - `psd`:      `W · exp(−Z) · sqrt(Z)`
//! - `standard`: `γ(NH) · W · (1 − Z)^((NK − 1)/2) · sqrt(NH·Z/2)`
//! - `model`:    `γ(NK) · W · (1 + Z)^(−NK/2) · sqrt(NK·Z/2)`
//! - `log`:      `γ(NK) · W · exp(−Z·(NK − 1/2)/2) · sqrt(NK · sinh(Z/2))`
//!
//! Conventions
//! -----------
//! - `γ` is evaluated through `statrs`' `ln_gamma` so large `N` neither
//!   overflows nor loses precision.
//! - The `log` form keeps `sinh` in log space (`ln_sinh`), which makes both
//!   [`UpcrossingRate::tau`] and [`UpcrossingRate::log_tau`] finite for any
//!   finite `Z`.
use statrs::function::gamma::ln_gamma;

use crate::{
    false_alarm::data::Observations,
    normalization::Normalization,
    optimization::numerical_stability::ln_sinh,
};

/// `ln γ(n)` with `γ(n) = sqrt(2/n) · Γ(n/2) / Γ((n − 1)/2)`; needs `n > 1`.
pub fn log_gamma_factor(n: f64) -> f64 {
    0.5 * (2.0 / n).ln() + ln_gamma(0.5 * n) - ln_gamma(0.5 * (n - 1.0))
}

/// `γ(n)`; tends to 1 as `n` grows.
pub fn gamma_factor(n: f64) -> f64 {
    log_gamma_factor(n).exp()
}

/// Effective bandwidth `W = fmax · sqrt(4π · Var_w(t))`.
pub fn effective_bandwidth(obs: &Observations, fmax: f64) -> f64 {
    fmax * (4.0 * std::f64::consts::PI * obs.weighted_time_variance()).sqrt()
}

/// Precomputed constants of the upcrossing term for one data set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpcrossingRate {
    normalization: Normalization,
    nh: f64,
    nk: f64,
    log_w: f64,
    log_gamma_nh: f64,
    log_gamma_nk: f64,
}

impl UpcrossingRate {
    /// Constants for bandwidth `w` and residual freedom `(nh, nk)`.
    ///
    /// Callers validate `nh ≥ 2` and `nk ≥ 1` beforehand.
    pub fn new(normalization: Normalization, w: f64, nh: f64, nk: f64) -> Self {
        Self {
            normalization,
            nh,
            nk,
            log_w: w.ln(),
            log_gamma_nh: log_gamma_factor(nh),
            log_gamma_nk: log_gamma_factor(nk),
        }
    }

    /// Expected number of upcrossings of level `z`.
    pub fn tau(&self, z: f64) -> f64 {
        let (nh, nk) = (self.nh, self.nk);
        let w = self.log_w.exp();
        match self.normalization {
            Normalization::Psd => w * (-z).exp() * z.sqrt(),
            Normalization::Standard => {
                self.log_gamma_nh.exp()
                    * w
                    * (1.0 - z).powf(0.5 * (nk - 1.0))
                    * (0.5 * nh * z).sqrt()
            }
            Normalization::Model => {
                self.log_gamma_nk.exp() * w * (1.0 + z).powf(-0.5 * nk) * (0.5 * nk * z).sqrt()
            }
            Normalization::Log => {
                let exponent = -0.5 * z * (nk - 0.5) + 0.5 * (nk.ln() + ln_sinh(0.5 * z));
                self.log_gamma_nk.exp() * w * exponent.exp()
            }
        }
    }

    /// Natural log of [`tau`](Self::tau); `−inf` at `z = 0`.
    pub fn log_tau(&self, z: f64) -> f64 {
        let (nh, nk) = (self.nh, self.nk);
        match self.normalization {
            Normalization::Psd => self.log_w - z + 0.5 * z.ln(),
            Normalization::Standard => {
                let shape = 0.5 * (nk - 1.0);
                let decay = if shape == 0.0 { 0.0 } else { shape * (-z).ln_1p() };
                self.log_gamma_nh + self.log_w + decay + 0.5 * (0.5 * nh * z).ln()
            }
            Normalization::Model => {
                self.log_gamma_nk + self.log_w - 0.5 * nk * z.ln_1p() + 0.5 * (0.5 * nk * z).ln()
            }
            Normalization::Log => {
                self.log_gamma_nk + self.log_w - 0.5 * z * (nk - 0.5)
                    + 0.5 * (nk.ln() + ln_sinh(0.5 * z))
            }
        }
    }
}
