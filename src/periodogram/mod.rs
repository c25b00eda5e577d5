//! periodogram — the periodogram engine seam and its default implementation.
//!
//! Purpose
//! -------
//! Define what the false-alarm layer needs from a periodogram: powers of
//! the observations on a frequency grid up to an optional maximum
//! frequency, in a requested normalization. The bootstrap calls this once
//! per replicate.
//!
//! Key behaviors
//! -------------
//! - [`Periodogram`] is the trait seam; implementors must be `Sync` so the
//!   bootstrap can share one engine across rayon workers.
//! - [`LombScargle`] is the default engine: a weighted, floating-mean
//!   Lomb-Scargle with an automatic frequency grid.
//!
//! Downstream usage
//! ----------------
//! - `false_alarm::FalseAlarm<P>` is generic over the engine, defaulting to
//!   [`LombScargle`].

pub mod lomb_scargle;

use ndarray::Array1;

use crate::{
    false_alarm::{data::Observations, errors::FapResult},
    normalization::Normalization,
};

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::lomb_scargle::LombScargle;

/// Frequencies and powers of one periodogram evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub frequency: Array1<f64>,
    pub power: Array1<f64>,
}

impl Spectrum {
    /// Largest finite power; `None` when no power is finite.
    pub fn max_power(&self) -> Option<f64> {
        self.power.iter().copied().filter(|p| p.is_finite()).reduce(f64::max)
    }
}

/// A periodogram engine.
pub trait Periodogram: Sync {
    /// Evaluate the periodogram of `obs` on the engine's automatic grid,
    /// ending at `maximum_frequency` when given.
    fn autopower(
        &self, obs: &Observations, normalization: Normalization, maximum_frequency: Option<f64>,
    ) -> FapResult<Spectrum>;
}
