//! false_alarm::bootstrap — resampled null distribution of the peak power.
//!
//! Purpose
//! -------
//! Estimate the distribution of the periodogram maximum by resampling the
//! `(y, dy)` pairs with replacement while keeping the sampling times, and
//! recomputing the periodogram up to `fmax` for every replicate.
//!
//! Key behaviors
//! -------------
//! - Replicate `i` draws its indices from
//!   `Xoshiro256PlusPlus::seed_from_u64(replicate_seed(seed, i))`, so results
//!   depend only on the base seed and not on thread scheduling.
//! - With the `parallel` feature replicates run on the rayon pool; without
//!   it they run in a plain loop with identical output.
//! - FAP of a threshold `Z` is the fraction of replicate maxima `≥ Z`.
//! - The significance threshold at level `s` interpolates linearly between
//!   the sorted maxima placed at `i / n`, clamped at both ends.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n_bootstraps ≥ 1`.
//! - Maxima are stored sorted ascending; `NaN` powers are ignored when
//!   taking the per-replicate maximum.
//!
//! Conventions
//! -----------
//! - A missing seed is replaced by one drawn from the thread-local RNG and
//!   logged at debug level so a run can be reproduced.
//!
//! Testing notes
//! -------------
//! - Unit tests use a stub periodogram to check the empirical FAP, the
//!   interpolation rule and seed reproducibility without trigonometry.
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::{
    false_alarm::{
        data::Observations,
        errors::{FapError, FapResult},
        validation::validate_max_frequency,
    },
    normalization::Normalization,
    periodogram::Periodogram,
};

/// Default number of bootstrap replicates.
pub const DEFAULT_BOOTSTRAPS: usize = 1000;

/// Options of the bootstrap method.
///
/// Fields
/// ------
/// - `n_bootstraps`: number of replicates (default 1000).
/// - `seed`: base seed; `None` draws a fresh one per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub n_bootstraps: usize,
    pub seed: Option<u64>,
}

impl BootstrapOptions {
    /// # Errors
    /// - `FapError::InvalidBootstraps` when `n_bootstraps == 0`.
    pub fn new(n_bootstraps: usize, seed: Option<u64>) -> FapResult<Self> {
        let opts = Self { n_bootstraps, seed };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> FapResult<()> {
        if self.n_bootstraps == 0 {
            return Err(FapError::InvalidBootstraps { n: self.n_bootstraps });
        }
        Ok(())
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self { n_bootstraps: DEFAULT_BOOTSTRAPS, seed: None }
    }
}

/// Sorted maxima of the resampled periodograms.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapDistribution {
    maxima: Vec<f64>,
    seed: u64,
}

impl BootstrapDistribution {
    /// Run the bootstrap.
    ///
    /// Parameters
    /// ----------
    /// - `engine`: periodogram used for every replicate.
    /// - `obs`: original observations.
    /// - `fmax`: maximum frequency of each replicate periodogram.
    /// - `normalization`: normalization of the recorded maxima.
    /// - `opts`: replicate count and base seed.
    ///
    /// Errors
    /// ------
    /// - `FapError::InvalidBootstraps`, `FapError::InvalidMaxFrequency`.
    /// - Any periodogram error of a replicate; the first one aborts the run.
    /// - `FapError::EmptyPeriodogram` when a replicate has no finite power.
    pub fn generate<P: Periodogram>(
        engine: &P, obs: &Observations, fmax: f64, normalization: Normalization,
        opts: &BootstrapOptions,
    ) -> FapResult<Self> {
        opts.validate()?;
        validate_max_frequency(fmax)?;
        let seed = opts.seed.unwrap_or_else(|| {
            let drawn = rand::rng().random::<u64>();
            debug!(seed = drawn, "no bootstrap seed given, drew one");
            drawn
        });

        let replicate = |i: usize| -> FapResult<f64> {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(replicate_seed(seed, i as u64));
            let indices: Vec<usize> = (0..obs.len()).map(|_| rng.random_range(0..obs.len())).collect();
            let resampled = obs.resample(&indices);
            let spectrum = engine.autopower(&resampled, normalization, Some(fmax))?;
            spectrum.max_power().ok_or(FapError::EmptyPeriodogram)
        };

        #[cfg(feature = "parallel")]
        let mut maxima = (0..opts.n_bootstraps)
            .into_par_iter()
            .map(replicate)
            .collect::<FapResult<Vec<f64>>>()?;

        #[cfg(not(feature = "parallel"))]
        let mut maxima = (0..opts.n_bootstraps).map(replicate).collect::<FapResult<Vec<f64>>>()?;

        maxima.sort_by(|a, b| a.total_cmp(b));
        debug!(
            n_bootstraps = opts.n_bootstraps,
            seed,
            lowest = maxima[0],
            highest = maxima[maxima.len() - 1],
            "bootstrap distribution ready"
        );
        Ok(Self { maxima, seed })
    }

    /// Build a distribution from precomputed maxima (sorted internally).
    ///
    /// # Errors
    /// - `FapError::InvalidBootstraps` when `maxima` is empty.
    pub fn from_maxima(mut maxima: Vec<f64>, seed: u64) -> FapResult<Self> {
        if maxima.is_empty() {
            return Err(FapError::InvalidBootstraps { n: 0 });
        }
        maxima.sort_by(|a, b| a.total_cmp(b));
        Ok(Self { maxima, seed })
    }

    /// Replicate maxima, sorted ascending.
    pub fn maxima(&self) -> &[f64] {
        &self.maxima
    }

    /// Base seed the replicates were drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fraction of replicate maxima `≥ z`.
    pub fn false_alarm_probability(&self, z: f64) -> f64 {
        let below = self.maxima.partition_point(|&m| m < z);
        1.0 - below as f64 / self.maxima.len() as f64
    }

    /// Threshold at significance level `sig`: linear interpolation of the
    /// sorted maxima against `i / n`, clamped to the smallest and largest
    /// maximum outside that grid.
    pub fn significance_level(&self, sig: f64) -> f64 {
        let n = self.maxima.len();
        let pos = sig * n as f64;
        if !(pos > 0.0) {
            return self.maxima[0];
        }
        let j = pos.floor() as usize;
        if j >= n - 1 {
            return self.maxima[n - 1];
        }
        let frac = pos - j as f64;
        self.maxima[j] + frac * (self.maxima[j + 1] - self.maxima[j])
    }
}

/// Seed of replicate `index`, a SplitMix64 finalizer over `seed` and the
/// golden-ratio–spaced counter.
fn replicate_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
