//! false_alarm::methods — method registry and analytic FAP estimators.
//!
//! Purpose
//! -------
//! Name the available false-alarm methods and evaluate the three analytic
//! ones (`simple`, `davies`, `baluev`) for the maximum of a periodogram
//! searched up to `fmax`.
//!
//! Key behaviors
//! -------------
//! With `Fs = fap_single(Z)`, `tau` the upcrossing term and
//! `N_eff = fmax · (max t − min t)`:
//!
//! - `simple`: `1 − (1 − Fs)^N_eff`, evaluated as
//!   `−expm1(N_eff · ln1p(−Fs))`.
//! - `davies`: `Fs + tau`, an upper bound that may exceed 1.
//! - `baluev`: `1 − (1 − Fs)·exp(−tau)`, capped at 1 against rounding.
//!
//! Each has a log-space counterpart built from `log1mexp`/`log_add_exp`
//! that stays finite where the linear probability underflows.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`AnalyticFap::new`] validates `fmax` and the degrees of freedom once;
//!   the per-threshold evaluations are infallible.
//! - Thresholds outside a normalization's natural domain produce `NaN`.
//!
//! Conventions
//! -----------
//! - Method names are matched case-insensitively through [`METHODS`].
//! - `baluev` is the default method.
//!
//! Testing notes
//! -------------
//! - Unit tests check each estimator against hand-assembled formulas, the
//!   linear/log agreement, the Davies ≥ Baluev ordering, and the
//!   closed-form inverse of `simple`.
use std::str::FromStr;

use crate::{
    false_alarm::{
        bootstrap::BootstrapOptions,
        data::Observations,
        davies::{UpcrossingRate, effective_bandwidth},
        errors::{FapError, FapResult},
        single::{inverse_survival, log_survival, survival},
        validation::{validate_dof, validate_max_frequency},
    },
    normalization::{DegreesOfFreedom, Normalization},
    optimization::numerical_stability::{log_add_exp, log1mexp},
};

/// Below this log-probability `exp` of the value underflows; the log
/// estimators switch to their leading-order tail forms.
const LOG_TAIL_CUTOFF: f64 = -700.0;

/// Identifier of a false-alarm method, without method options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Simple,
    Davies,
    Baluev,
    Bootstrap,
}

/// Registry of method names, in the order they are documented.
pub const METHODS: [(&str, MethodKind); 4] = [
    ("simple", MethodKind::Simple),
    ("davies", MethodKind::Davies),
    ("baluev", MethodKind::Baluev),
    ("bootstrap", MethodKind::Bootstrap),
];

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Simple => "simple",
            MethodKind::Davies => "davies",
            MethodKind::Baluev => "baluev",
            MethodKind::Bootstrap => "bootstrap",
        }
    }

    /// The analytic estimator behind this method, if any.
    pub fn analytic(&self) -> Option<AnalyticMethod> {
        match self {
            MethodKind::Simple => Some(AnalyticMethod::Simple),
            MethodKind::Davies => Some(AnalyticMethod::Davies),
            MethodKind::Baluev => Some(AnalyticMethod::Baluev),
            MethodKind::Bootstrap => None,
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodKind {
    type Err = FapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        METHODS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, kind)| kind)
            .ok_or_else(|| FapError::UnknownMethod { name: s.to_string() })
    }
}

/// A false-alarm method together with its options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FapMethod {
    Simple,
    Davies,
    #[default]
    Baluev,
    Bootstrap(BootstrapOptions),
}

impl FapMethod {
    /// Combine a method kind with optional bootstrap options; the options
    /// are ignored by the analytic methods.
    pub fn from_kind(kind: MethodKind, bootstrap: Option<BootstrapOptions>) -> Self {
        match kind {
            MethodKind::Simple => FapMethod::Simple,
            MethodKind::Davies => FapMethod::Davies,
            MethodKind::Baluev => FapMethod::Baluev,
            MethodKind::Bootstrap => FapMethod::Bootstrap(bootstrap.unwrap_or_default()),
        }
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            FapMethod::Simple => MethodKind::Simple,
            FapMethod::Davies => MethodKind::Davies,
            FapMethod::Baluev => MethodKind::Baluev,
            FapMethod::Bootstrap(_) => MethodKind::Bootstrap,
        }
    }
}

impl FromStr for FapMethod {
    type Err = FapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FapMethod::from_kind(s.parse()?, None))
    }
}

/// The three closed-form estimators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticMethod {
    Simple,
    Davies,
    Baluev,
}

impl AnalyticMethod {
    /// Name used for the inverted function in diagnostics.
    pub fn function_name(&self) -> &'static str {
        match self {
            AnalyticMethod::Simple => "fap_simple",
            AnalyticMethod::Davies => "fap_davies",
            AnalyticMethod::Baluev => "fap_baluev",
        }
    }
}

/// Analytic false-alarm estimators bound to one data set and `fmax`.
///
/// Construction validates the inputs and precomputes `NK`, `N_eff` and the
/// upcrossing constants; afterwards every method is a cheap scalar
/// function of the threshold `Z`.
///
/// # Examples
/// ```rust
/// # use lomb_scargle_fap::false_alarm::{AnalyticFap, Observations};
/// # use lomb_scargle_fap::normalization::{DegreesOfFreedom, Normalization};
/// let t: Vec<f64> = (0..50).map(|i| 0.1 * i as f64 + 0.01 * (i * i % 7) as f64).collect();
/// let y: Vec<f64> = t.iter().map(|v| v.sin()).collect();
/// let obs = Observations::unweighted(&t, &y).unwrap();
/// let fap = AnalyticFap::new(&obs, 5.0, Normalization::Standard, &DegreesOfFreedom::default())
///     .unwrap();
/// assert!(fap.davies(0.3) >= fap.baluev(0.3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticFap {
    normalization: Normalization,
    nk: f64,
    n_eff: f64,
    rate: UpcrossingRate,
}

impl AnalyticFap {
    /// Bind the estimators to `obs`, `fmax` and `normalization`.
    ///
    /// # Errors
    /// - `FapError::InvalidMaxFrequency` unless `fmax` is finite and `> 0`.
    /// - `FapError::UnsupportedDegreesOfFreedom` when `dK − dH ≠ 2`.
    /// - `FapError::NonPositiveDof` when `N` is too small for `dof`.
    pub fn new(
        obs: &Observations, fmax: f64, normalization: Normalization, dof: &DegreesOfFreedom,
    ) -> FapResult<Self> {
        validate_max_frequency(fmax)?;
        let (nh, nk) = validate_dof(dof, obs.len())?;
        let w = effective_bandwidth(obs, fmax);
        Ok(Self {
            normalization,
            nk,
            n_eff: fmax * obs.baseline(),
            rate: UpcrossingRate::new(normalization, w, nh, nk),
        })
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Effective number of independent frequencies, `fmax · T`.
    pub fn effective_trials(&self) -> f64 {
        self.n_eff
    }

    pub fn single(&self, z: f64) -> f64 {
        survival(z, self.nk, self.normalization)
    }

    pub fn log_single(&self, z: f64) -> f64 {
        log_survival(z, self.nk, self.normalization)
    }

    pub fn tau(&self, z: f64) -> f64 {
        self.rate.tau(z)
    }

    pub fn log_tau(&self, z: f64) -> f64 {
        self.rate.log_tau(z)
    }

    pub fn simple(&self, z: f64) -> f64 {
        let fs = self.single(z);
        -(self.n_eff * (-fs).ln_1p()).exp_m1()
    }

    pub fn log_simple(&self, z: f64) -> f64 {
        let log_fs = self.log_single(z);
        if log_fs < LOG_TAIL_CUTOFF {
            return self.n_eff.ln() + log_fs;
        }
        log1mexp(self.n_eff * log1mexp(log_fs))
    }

    /// Davies upper bound `Fs + tau`; not clipped to 1.
    pub fn davies(&self, z: f64) -> f64 {
        self.single(z) + self.tau(z)
    }

    pub fn log_davies(&self, z: f64) -> f64 {
        log_add_exp(self.log_single(z), self.log_tau(z))
    }

    pub fn baluev(&self, z: f64) -> f64 {
        let fs = self.single(z);
        let tau = self.tau(z);
        (-(-tau).exp_m1() + fs * (-tau).exp()).min(1.0)
    }

    pub fn log_baluev(&self, z: f64) -> f64 {
        let log_fs = self.log_single(z);
        let log_tau = self.log_tau(z);
        let tau = log_tau.exp();
        let head = if log_tau < LOG_TAIL_CUTOFF { log_tau } else { log1mexp(-tau) };
        log_add_exp(head, log_fs - tau).min(0.0)
    }

    /// Dispatch to the linear estimator named by `method`.
    pub fn probability(&self, method: AnalyticMethod, z: f64) -> f64 {
        match method {
            AnalyticMethod::Simple => self.simple(z),
            AnalyticMethod::Davies => self.davies(z),
            AnalyticMethod::Baluev => self.baluev(z),
        }
    }

    /// Dispatch to the log estimator named by `method`.
    pub fn log_probability(&self, method: AnalyticMethod, z: f64) -> f64 {
        match method {
            AnalyticMethod::Simple => self.log_simple(z),
            AnalyticMethod::Davies => self.log_davies(z),
            AnalyticMethod::Baluev => self.log_baluev(z),
        }
    }

    /// Closed-form inverse of [`simple`](Self::simple): the threshold whose
    /// `simple` false-alarm probability is `p`.
    pub fn inv_simple(&self, p: f64) -> f64 {
        let fs = -((-p).ln_1p() / self.n_eff).exp_m1();
        inverse_survival(fs, self.nk, self.normalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Method-name lookup and the default method.
    // - Each analytic estimator against its formula.
    // - Linear/log agreement and tail behavior of the log estimators.
    // - Davies ≥ Baluev and the closed-form inverse of `simple`.
    // -------------------------------------------------------------------------

    fn observations() -> Observations {
        let t: Vec<f64> = (0..40).map(|i| 0.25 * i as f64 + 0.05 * ((i * 7) % 5) as f64).collect();
        let y: Vec<f64> = t.iter().map(|v| (2.0 * v).sin() + 0.1 * (5.0 * v).cos()).collect();
        let dy: Vec<f64> = (0..40).map(|i| 0.5 + 0.1 * (i % 3) as f64).collect();
        Observations::new(&t, &y, &dy).unwrap()
    }

    fn estimators(norm: Normalization) -> AnalyticFap {
        AnalyticFap::new(&observations(), 2.0, norm, &DegreesOfFreedom::default()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Method names resolve case-insensitively; unknown names are rejected.
    //
    // Given
    // -----
    // - " Baluev ", "BOOTSTRAP" and "nope".
    //
    // Expect
    // ------
    // - `Baluev`, `Bootstrap(default options)` and `UnknownMethod`.
    fn method_names_resolve_through_registry() {
        assert_eq!(" Baluev ".parse::<FapMethod>().unwrap(), FapMethod::Baluev);
        assert_eq!(
            "BOOTSTRAP".parse::<FapMethod>().unwrap(),
            FapMethod::Bootstrap(BootstrapOptions::default())
        );
        match "nope".parse::<MethodKind>() {
            Err(FapError::UnknownMethod { name }) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownMethod, got {other:?}"),
        }
        for (name, kind) in METHODS {
            assert_eq!(kind.as_str(), name);
        }
        assert_eq!(FapMethod::default(), FapMethod::Baluev);
    }

    #[test]
    // Purpose
    // -------
    // The estimators assemble single-frequency and upcrossing terms as
    // documented.
    //
    // Given
    // -----
    // - Standard normalization, Z = 0.25.
    //
    // Expect
    // ------
    // - simple = 1 − (1 − Fs)^N_eff, davies = Fs + tau,
    //   baluev = 1 − (1 − Fs)·e^{−tau}.
    fn estimators_match_their_formulas() {
        let fap = estimators(Normalization::Standard);
        let z = 0.25;
        let (fs, tau, n_eff) = (fap.single(z), fap.tau(z), fap.effective_trials());
        assert_relative_eq!(fap.simple(z), 1.0 - (1.0 - fs).powf(n_eff), max_relative = 1e-10);
        assert_relative_eq!(fap.davies(z), fs + tau, max_relative = 1e-14);
        assert_relative_eq!(fap.baluev(z), 1.0 - (1.0 - fs) * (-tau).exp(), max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Log estimators agree with the log of the linear ones.
    //
    // Given
    // -----
    // - Model normalization, Z in {0.05, 0.2, 0.5}.
    //
    // Expect
    // ------
    // - exp(log_fap) = fap within 1e-12 absolute for every method.
    fn log_estimators_agree_with_linear() {
        let fap = estimators(Normalization::Model);
        for z in [0.05, 0.2, 0.5] {
            for method in [AnalyticMethod::Simple, AnalyticMethod::Davies, AnalyticMethod::Baluev] {
                let linear = fap.probability(method, z);
                let log = fap.log_probability(method, z);
                assert!((log.exp() - linear).abs() < 1e-12, "{method:?} at {z}: {linear} vs {log}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Log estimators stay finite where the linear ones underflow.
    //
    // Given
    // -----
    // - Psd normalization, Z = 1000.
    //
    // Expect
    // ------
    // - Linear values 0; log values finite, ordered davies ≥ baluev, and
    //   log simple ≈ ln(N_eff) − Z.
    fn log_estimators_survive_underflow() {
        let fap = estimators(Normalization::Psd);
        let z = 1000.0;
        assert_eq!(fap.simple(z), 0.0);
        assert_eq!(fap.baluev(z), 0.0);
        let (ls, ld, lb) = (fap.log_simple(z), fap.log_davies(z), fap.log_baluev(z));
        assert!(ls.is_finite() && ld.is_finite() && lb.is_finite());
        assert!(ld >= lb - 1e-9);
        assert_relative_eq!(ls, fap.effective_trials().ln() - z, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Davies bounds Baluev from above and Baluev never exceeds one.
    //
    // Given
    // -----
    // - Log normalization, Z on a grid over (0, 1].
    //
    // Expect
    // ------
    // - davies ≥ baluev and baluev ≤ 1 at every grid point.
    fn davies_bounds_baluev() {
        let fap = estimators(Normalization::Log);
        for i in 1..=50 {
            let z = i as f64 / 50.0;
            assert!(fap.davies(z) >= fap.baluev(z) - 1e-15, "z = {z}");
            assert!(fap.baluev(z) <= 1.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // The closed-form inverse of `simple` round-trips.
    //
    // Given
    // -----
    // - Standard normalization; p in {0.5, 0.1, 0.01}.
    //
    // Expect
    // ------
    // - simple(inv_simple(p)) = p within 1e-9 relative.
    fn inv_simple_round_trips() {
        let fap = estimators(Normalization::Standard);
        for p in [0.5, 0.1, 0.01] {
            assert_relative_eq!(fap.simple(fap.inv_simple(p)), p, max_relative = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Analytic estimators reject unsupported degrees of freedom and bad
    // maximum frequencies.
    //
    // Given
    // -----
    // - dof (1, 5); fmax = 0.
    //
    // Expect
    // ------
    // - `UnsupportedDegreesOfFreedom`; `InvalidMaxFrequency`.
    fn new_validates_arguments() {
        let obs = observations();
        match AnalyticFap::new(&obs, 2.0, Normalization::Standard, &DegreesOfFreedom { dh: 1, dk: 5 }) {
            Err(FapError::UnsupportedDegreesOfFreedom { .. }) => (),
            other => panic!("expected UnsupportedDegreesOfFreedom, got {other:?}"),
        }
        match AnalyticFap::new(&obs, 0.0, Normalization::Standard, &DegreesOfFreedom::default()) {
            Err(FapError::InvalidMaxFrequency { .. }) => (),
            other => panic!("expected InvalidMaxFrequency, got {other:?}"),
        }
    }
}
