//! false_alarm::api — public entry points for FAP and significance levels.
//!
//! Purpose
//! -------
//! Tie together observations, a periodogram engine, the analytic estimators,
//! the bootstrap and the inversion driver behind two surfaces:
//!
//! - [`FalseAlarm`]: a typed estimator bound to one data set, `fmax` and a
//!   normalization, generic over the periodogram engine.
//! - [`false_alarm_probability`], [`log_false_alarm_probability`] and
//!   [`significance_level`]: name-based convenience functions that parse the
//!   normalization and method and dispatch through [`FalseAlarm`].
//!
//! Key behaviors
//! -------------
//! - FAP outputs keep the shape of the threshold array; significance outputs
//!   keep the shape of the level array.
//! - Significance levels are validated to lie in `(0, 1]` before any other
//!   work.
//! - `bootstrap` significance levels interpolate the sorted replicate
//!   maxima; analytic ones invert the method's FAP at `1 − sig` numerically
//!   on a normalization-specific bracket.
//!
//! Invariants & assumptions
//! ------------------------
//! - Analytic methods require `dK − dH = 2`; the bootstrap accepts any
//!   degrees of freedom because it never uses them.
//! - Each bootstrap call regenerates its distribution; with a fixed seed the
//!   result is reproducible, without one it is not.
//!
//! Conventions
//! -----------
//! - Inversion failures are hard errors per call (`FapError::InversionFailed`)
//!   and are also logged at warn level by the inversion driver.
//!
//! Testing notes
//! -------------
//! - Unit tests cover shape preservation, dispatch, validation order and the
//!   agreement of numerical and closed-form inverses. End-to-end scenarios
//!   live in `tests/integration_fap_pipeline.rs`.
use ndarray::{Array, ArrayBase, Data, Dimension};
use tracing::debug;

use crate::{
    false_alarm::{
        bootstrap::{BootstrapDistribution, BootstrapOptions},
        data::Observations,
        errors::FapResult,
        methods::{AnalyticFap, AnalyticMethod, FapMethod},
        validation::{validate_max_frequency, validate_significance},
    },
    normalization::{DegreesOfFreedom, Normalization},
    optimization::{
        inversion::{Bracket, InversionOptions, invert},
        numerical_stability::LOG_DOMAIN_FLOOR,
    },
    periodogram::{LombScargle, Periodogram},
};

/// Upper end of the threshold search for the unbounded normalizations.
const UNBOUNDED_UPPER: f64 = 1e12;

/// Options shared by every method of a [`FalseAlarm`].
///
/// Fields
/// ------
/// - `dof`: model degrees of freedom (default `dH = 1`, `dK = 3`).
/// - `inversion`: solver settings for analytic significance levels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FapOptions {
    pub dof: DegreesOfFreedom,
    pub inversion: InversionOptions,
}

impl FapOptions {
    pub fn new(dof: DegreesOfFreedom, inversion: InversionOptions) -> Self {
        Self { dof, inversion }
    }
}

/// False-alarm estimator for the peak of one periodogram.
///
/// Binds the observations, the maximum search frequency `fmax`, the power
/// normalization and a periodogram engine (default [`LombScargle`]).
///
/// # Examples
/// ```rust
/// # use ndarray::array;
/// # use lomb_scargle_fap::false_alarm::{FalseAlarm, FapMethod, Observations};
/// # use lomb_scargle_fap::normalization::Normalization;
/// let t: Vec<f64> = (0..60).map(|i| 0.3 * i as f64 + 0.07 * ((i * i) % 5) as f64).collect();
/// let y: Vec<f64> = t.iter().map(|v| (1.3 * v).sin()).collect();
/// let obs = Observations::unweighted(&t, &y).unwrap();
/// let fa = FalseAlarm::new(obs, 2.0, Normalization::Standard).unwrap();
///
/// let fap = fa.probability(&array![0.2, 0.4], &FapMethod::Baluev).unwrap();
/// assert!(fap[0] >= fap[1]);
/// ```
#[derive(Debug, Clone)]
pub struct FalseAlarm<P: Periodogram = LombScargle> {
    obs: Observations,
    fmax: f64,
    normalization: Normalization,
    opts: FapOptions,
    engine: P,
}

impl FalseAlarm<LombScargle> {
    /// Estimator with the default Lomb-Scargle engine and default options.
    ///
    /// # Errors
    /// - `FapError::InvalidMaxFrequency` unless `fmax` is finite and `> 0`.
    pub fn new(obs: Observations, fmax: f64, normalization: Normalization) -> FapResult<Self> {
        Self::with_engine(obs, fmax, normalization, LombScargle::default())
    }
}

impl<P: Periodogram> FalseAlarm<P> {
    /// Estimator with a caller-supplied periodogram engine.
    pub fn with_engine(
        obs: Observations, fmax: f64, normalization: Normalization, engine: P,
    ) -> FapResult<Self> {
        validate_max_frequency(fmax)?;
        Ok(Self { obs, fmax, normalization, opts: FapOptions::default(), engine })
    }

    pub fn with_options(mut self, opts: FapOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn observations(&self) -> &Observations {
        &self.obs
    }

    pub fn max_frequency(&self) -> f64 {
        self.fmax
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn options(&self) -> &FapOptions {
        &self.opts
    }

    pub fn engine(&self) -> &P {
        &self.engine
    }

    /// Analytic estimators for this data set.
    ///
    /// # Errors
    /// - `FapError::UnsupportedDegreesOfFreedom`, `FapError::NonPositiveDof`.
    pub fn analytic(&self) -> FapResult<AnalyticFap> {
        AnalyticFap::new(&self.obs, self.fmax, self.normalization, &self.opts.dof)
    }

    /// Bootstrap distribution of the periodogram maximum.
    ///
    /// # Errors
    /// See [`BootstrapDistribution::generate`].
    pub fn bootstrap(&self, opts: &BootstrapOptions) -> FapResult<BootstrapDistribution> {
        BootstrapDistribution::generate(&self.engine, &self.obs, self.fmax, self.normalization, opts)
    }

    /// False-alarm probability of each threshold in `z`.
    ///
    /// Parameters
    /// ----------
    /// - `z`: peak powers in this estimator's normalization, any shape.
    /// - `method`: estimator to use; bootstrap options travel inside
    ///   [`FapMethod::Bootstrap`].
    ///
    /// Returns
    /// -------
    /// An array shaped like `z`. `davies` values may exceed 1.
    ///
    /// Errors
    /// ------
    /// - Degrees-of-freedom errors for the analytic methods.
    /// - Bootstrap option and periodogram errors for `bootstrap`.
    pub fn probability<S, D>(&self, z: &ArrayBase<S, D>, method: &FapMethod) -> FapResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        match analytic_method(method) {
            Some(kind) => {
                let fap = self.analytic()?;
                Ok(z.mapv(|v| fap.probability(kind, v)))
            }
            None => {
                let dist = self.bootstrap(&bootstrap_options(method))?;
                Ok(z.mapv(|v| dist.false_alarm_probability(v)))
            }
        }
    }

    /// Natural log of [`probability`](Self::probability).
    ///
    /// Analytic methods evaluate in log space and stay finite where the
    /// linear probability underflows; the bootstrap returns `ln` of its
    /// empirical fraction (`−inf` beyond the largest replicate maximum).
    pub fn log_probability<S, D>(
        &self, z: &ArrayBase<S, D>, method: &FapMethod,
    ) -> FapResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        match analytic_method(method) {
            Some(kind) => {
                let fap = self.analytic()?;
                Ok(z.mapv(|v| fap.log_probability(kind, v)))
            }
            None => {
                let dist = self.bootstrap(&bootstrap_options(method))?;
                Ok(z.mapv(|v| dist.false_alarm_probability(v).ln()))
            }
        }
    }

    /// Power threshold at each significance level in `sig`.
    ///
    /// Analytic methods solve `FAP(Z) = 1 − sig`; the bootstrap interpolates
    /// its sorted maxima at `sig`. At `sig = 1` the analytic threshold is
    /// the end of the domain: `1` for `standard`, `+inf` otherwise.
    ///
    /// Errors
    /// ------
    /// - `FapError::OutOfRange` when any level lies outside `(0, 1]`,
    ///   reported before any other work.
    /// - `FapError::InversionFailed` when an analytic inversion does not
    ///   converge; the first failure aborts the call.
    /// - Errors of [`probability`](Self::probability) for the same method.
    pub fn significance_level<S, D>(
        &self, sig: &ArrayBase<S, D>, method: &FapMethod,
    ) -> FapResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        validate_significance(sig.iter())?;

        let Some(kind) = analytic_method(method) else {
            let dist = self.bootstrap(&bootstrap_options(method))?;
            return Ok(sig.mapv(|s| dist.significance_level(s)));
        };

        let fap = self.analytic()?;
        let inverse = invert(move |z: f64| fap.probability(kind, z), kind.function_name())
            .with_bracket(threshold_bracket(self.normalization)?)
            .with_options(self.opts.inversion);
        debug!(
            function = inverse.name(),
            normalization = %self.normalization,
            levels = sig.len(),
            "inverting false-alarm probability"
        );
        let mut out = Array::zeros(sig.raw_dim());
        for (slot, &s) in out.iter_mut().zip(sig.iter()) {
            *slot = if s == 1.0 {
                certain_threshold(self.normalization)
            } else {
                inverse.eval(1.0 - s)?
            };
        }
        Ok(out)
    }
}

/// False-alarm probability of peak powers `z` by name of normalization and
/// method.
///
/// Parameters
/// ----------
/// - `z`: peak powers, any shape.
/// - `fmax`: maximum frequency of the periodogram search.
/// - `obs`: the observations `(t, y, dy)`.
/// - `normalization`: `"standard"`, `"model"`, `"log"` or `"psd"`.
/// - `method`: `"simple"`, `"davies"`, `"baluev"` or `"bootstrap"`.
/// - `method_kwds`: bootstrap options; ignored by the analytic methods.
///
/// Errors
/// ------
/// - `FapError::InvalidNormalization`, `FapError::UnknownMethod` for
///   unrecognized names.
/// - Everything [`FalseAlarm::probability`] reports.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use lomb_scargle_fap::false_alarm::{false_alarm_probability, Observations};
/// let t: Vec<f64> = (0..40).map(|i| 0.5 * i as f64 + 0.1 * ((i * 3) % 4) as f64).collect();
/// let y: Vec<f64> = t.iter().map(|v| v.cos()).collect();
/// let obs = Observations::unweighted(&t, &y).unwrap();
/// let p = false_alarm_probability(&array![0.3], 1.0, &obs, "standard", "simple", None).unwrap();
/// assert!(p[0] > 0.0 && p[0] <= 1.0);
/// ```
pub fn false_alarm_probability<S, D>(
    z: &ArrayBase<S, D>, fmax: f64, obs: &Observations, normalization: &str, method: &str,
    method_kwds: Option<BootstrapOptions>,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (estimator, method) = named_estimator(fmax, obs, normalization, method, method_kwds)?;
    estimator.probability(z, &method)
}

/// Log-space counterpart of [`false_alarm_probability`].
pub fn log_false_alarm_probability<S, D>(
    z: &ArrayBase<S, D>, fmax: f64, obs: &Observations, normalization: &str, method: &str,
    method_kwds: Option<BootstrapOptions>,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let (estimator, method) = named_estimator(fmax, obs, normalization, method, method_kwds)?;
    estimator.log_probability(z, &method)
}

/// Power threshold at each significance level in `sig`, by name of
/// normalization and method.
///
/// Errors
/// ------
/// - `FapError::OutOfRange` for levels outside `(0, 1]`, checked first.
/// - `FapError::InvalidNormalization`, `FapError::UnknownMethod`.
/// - Everything [`FalseAlarm::significance_level`] reports.
pub fn significance_level<S, D>(
    sig: &ArrayBase<S, D>, fmax: f64, obs: &Observations, normalization: &str, method: &str,
    method_kwds: Option<BootstrapOptions>,
) -> FapResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    validate_significance(sig.iter())?;
    let (estimator, method) = named_estimator(fmax, obs, normalization, method, method_kwds)?;
    estimator.significance_level(sig, &method)
}

// ---- Helpers ----

fn named_estimator(
    fmax: f64, obs: &Observations, normalization: &str, method: &str,
    method_kwds: Option<BootstrapOptions>,
) -> FapResult<(FalseAlarm, FapMethod)> {
    let normalization: Normalization = normalization.parse()?;
    let method = FapMethod::from_kind(method.parse()?, method_kwds);
    Ok((FalseAlarm::new(obs.clone(), fmax, normalization)?, method))
}

fn analytic_method(method: &FapMethod) -> Option<AnalyticMethod> {
    method.kind().analytic()
}

fn bootstrap_options(method: &FapMethod) -> BootstrapOptions {
    match method {
        FapMethod::Bootstrap(opts) => *opts,
        _ => BootstrapOptions::default(),
    }
}

/// Search interval for thresholds in `normalization`; `standard` powers
/// live in `[0, 1)`.
/// Threshold at significance 1: the end of the normalization's domain,
/// where every analytic estimator reaches 0.
fn certain_threshold(normalization: Normalization) -> f64 {
    match normalization {
        Normalization::Standard => 1.0,
        Normalization::Model | Normalization::Log | Normalization::Psd => f64::INFINITY,
    }
}

fn threshold_bracket(normalization: Normalization) -> FapResult<Bracket> {
    let upper = match normalization {
        Normalization::Standard => 1.0 - f64::EPSILON,
        Normalization::Model | Normalization::Log | Normalization::Psd => UNBOUNDED_UPPER,
    };
    Ok(Bracket::new(LOG_DOMAIN_FLOOR, upper)?)
}
