//! Integration tests for false-alarm probabilities and significance levels.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from noisy, unevenly sampled
//!   observations, through the Lomb-Scargle engine, to false-alarm
//!   probabilities and significance thresholds for every method and
//!   normalization.
//! - Use a realistic data set (N = 100 points of a sinusoid with offset,
//!   heteroscedastic noise, fmax = 5) rather than toy inputs only.
//!
//! Coverage
//! --------
//! - `false_alarm`:
//!   - `false_alarm_probability` and `log_false_alarm_probability` for
//!     `simple`, `davies`, `baluev` and `bootstrap` in all four
//!     normalizations.
//!   - `significance_level` monotonicity and consistency with the FAP.
//!   - `FalseAlarm` with custom inversion options.
//! - `normalization`:
//!   - Cross-normalization consistency of the analytic estimators through
//!     `convert_normalization`.
//! - `periodogram`:
//!   - `LombScargle::autopower` as the source of realistic power grids and
//!     as the bootstrap engine.
//!
//! Exclusions
//! ----------
//! - Closed forms, guards and numerical helpers in isolation; these are
//!   covered by unit tests.
//! - Python bindings, which are exercised from Python.
use approx::assert_relative_eq;
use lomb_scargle_fap::{
    false_alarm::{
        BootstrapOptions, FalseAlarm, FapError, FapMethod, FapOptions, Observations,
        false_alarm_probability, log_false_alarm_probability, significance_level,
    },
    normalization::{DegreesOfFreedom, Normalization, convert_normalization},
    optimization::{InversionOptions, InversionSolver},
    periodogram::{LombScargle, Periodogram},
};
use ndarray::{Array1, array};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

const FMAX: f64 = 5.0;
const ANALYTIC: [&str; 3] = ["simple", "davies", "baluev"];

/// Bound on the rise of `baluev` near `Z → 0`: the closed form has a hump
/// of height about `4/(e·W)²` where the FAP is close to one.
const BALUEV_HUMP_BOUND: f64 = 1e-3;

/// Purpose
/// -------
/// Generate N = 100 observations of `10 + 2 sin(2πt) + 3 cos(2πt)` at
/// uniform random times in `[0, 5)`, with uncertainties `0.5 + U(0, 1)`
/// and Gaussian noise scaled by them.
///
/// Invariants
/// ----------
/// - Deterministic: Xoshiro256++ seeded with 0, Box–Muller normals.
fn make_data() -> Observations {
    let n = 100;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    let t: Vec<f64> = (0..n).map(|_| 5.0 * rng.random::<f64>()).collect();
    let dy: Vec<f64> = (0..n).map(|_| 0.5 + rng.random::<f64>()).collect();
    let y: Vec<f64> = t
        .iter()
        .zip(&dy)
        .map(|(&ti, &si)| {
            let omega = 2.0 * std::f64::consts::PI;
            let u1 = 1.0 - rng.random::<f64>();
            let u2 = rng.random::<f64>();
            let noise = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            10.0 + 2.0 * (omega * ti).sin() + 3.0 * (omega * ti).cos() + si * noise
        })
        .collect();
    Observations::new(&t, &y, &dy).expect("synthetic observations should be valid")
}

/// 30 thresholds spanning the observed power range of `obs` up to `FMAX`.
fn power_grid(obs: &Observations, normalization: Normalization) -> Array1<f64> {
    let spectrum = LombScargle::default()
        .autopower(obs, normalization, Some(FMAX))
        .expect("autopower should succeed on valid observations");
    let lo = spectrum.power.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = spectrum.max_power().expect("spectrum should have a finite maximum");
    Array1::linspace(lo, hi, 30)
}

fn bootstrap_kwds() -> Option<BootstrapOptions> {
    Some(BootstrapOptions::new(20, Some(42)).expect("20 replicates are valid"))
}

fn kwds_for(method: &str) -> Option<BootstrapOptions> {
    if method == "bootstrap" { bootstrap_kwds() } else { None }
}

fn assert_non_increasing(values: &Array1<f64>, slack: f64, context: &str) {
    for (i, w) in values.as_slice().expect("contiguous").windows(2).enumerate() {
        assert!(w[1] <= w[0] + slack, "{context}: rise at {i}: {} -> {}", w[0], w[1]);
    }
}

#[test]
// Purpose
// -------
// The concrete reference scenario: baluev in the standard normalization.
//
// Given
// -----
// - N = 100 noisy sinusoid, fmax = 5, 30 thresholds over the observed
//   standard power range.
//
// Expect
// ------
// - 30 values in [0, 1], non-increasing, and below 1e-6 at the highest
//   observed peak.
fn baluev_standard_scenario() {
    // Arrange
    let obs = make_data();
    let z = power_grid(&obs, Normalization::Standard);

    // Act
    let fap = false_alarm_probability(&z, FMAX, &obs, "standard", "baluev", None).unwrap();

    // Assert
    assert_eq!(fap.len(), 30);
    assert!(fap.iter().all(|&p| (0.0..=1.0).contains(&p)));
    assert_non_increasing(&fap, 0.0, "baluev/standard");
    assert!(fap[29] < 1e-6, "strong sinusoid should be significant, got {}", fap[29]);
}

#[test]
// Purpose
// -------
// Document the small rise of the baluev closed form near Z → 0.
//
// Given
// -----
// - 20000 thresholds over the observed power range of each normalization.
//
// Expect
// ------
// - Any rise between neighbours stays below 1e-3 and only occurs where the
//   FAP is above 1/2.
fn baluev_rise_is_confined_near_zero_power() {
    let obs = make_data();
    for norm in Normalization::ALL {
        let coarse = power_grid(&obs, norm);
        let z = Array1::linspace(coarse[0], coarse[coarse.len() - 1], 20_000);
        let fap = false_alarm_probability(&z, FMAX, &obs, norm.as_str(), "baluev", None).unwrap();
        for w in fap.as_slice().unwrap().windows(2) {
            let rise = w[1] - w[0];
            if rise > 0.0 {
                assert!(rise < BALUEV_HUMP_BOUND, "{norm}: rise {rise}");
                assert!(w[0] > 0.5, "{norm}: rise {rise} at FAP {}", w[0]);
            }
        }
    }
}

#[test]
// Purpose
// -------
// Every method and normalization yields well-formed probabilities.
//
// Given
// -----
// - All four normalizations; methods simple, davies, baluev and bootstrap
//   (20 replicates, seed 42).
//
// Expect
// ------
// - One output per threshold.
// - Values in [0, 1] for every method except davies (davies only ≥ 0).
// - Non-increasing for simple, baluev and bootstrap.
fn fap_smoketest_all_methods_and_normalizations() {
    let obs = make_data();
    for norm in Normalization::ALL {
        let z = power_grid(&obs, norm);
        for method in ["simple", "davies", "baluev", "bootstrap"] {
            let context = format!("{method}/{norm}");
            let fap = false_alarm_probability(&z, FMAX, &obs, norm.as_str(), method, kwds_for(method))
                .unwrap_or_else(|e| panic!("{context}: {e}"));

            assert_eq!(fap.len(), z.len(), "{context}");
            assert!(fap.iter().all(|&p| p >= 0.0), "{context}: negative FAP");
            match method {
                "davies" => (),
                _ => {
                    assert!(fap.iter().all(|&p| p <= 1.0), "{context}: FAP above 1");
                    assert_non_increasing(&fap, 0.0, &context);
                }
            }
        }
    }
}

#[test]
// Purpose
// -------
// Significance thresholds increase with the significance level.
//
// Given
// -----
// - sig = [0.5, 0.6, 0.7, 0.8, 0.9] for every method and normalization;
//   bootstrap with 20 replicates and seed 42.
//
// Expect
// ------
// - Positive, finite thresholds, strictly increasing in sig.
fn significance_smoketest_all_methods_and_normalizations() {
    let obs = make_data();
    let sig = array![0.5, 0.6, 0.7, 0.8, 0.9];
    for norm in Normalization::ALL {
        for method in ["simple", "davies", "baluev", "bootstrap"] {
            let context = format!("{method}/{norm}");
            let z = significance_level(&sig, FMAX, &obs, norm.as_str(), method, kwds_for(method))
                .unwrap_or_else(|e| panic!("{context}: {e}"));

            assert_eq!(z.len(), sig.len(), "{context}");
            assert!(z.iter().all(|&v| v > 0.0 && v.is_finite()), "{context}: {z}");
            for w in z.as_slice().unwrap().windows(2) {
                assert!(w[0] < w[1], "{context}: not increasing: {z}");
            }
        }
    }
}

#[test]
// Purpose
// -------
// Analytic significance thresholds reproduce their target probabilities.
//
// Given
// -----
// - sig = [0.5, 0.9, 0.99] for each analytic method in each normalization.
//
// Expect
// ------
// - FAP(significance_level(sig)) = 1 − sig within 1e-6.
fn significance_and_fap_are_consistent() {
    let obs = make_data();
    let sig = array![0.5, 0.9, 0.99];
    for norm in Normalization::ALL {
        for method in ANALYTIC {
            let z = significance_level(&sig, FMAX, &obs, norm.as_str(), method, None).unwrap();
            let fap = false_alarm_probability(&z, FMAX, &obs, norm.as_str(), method, None).unwrap();
            for (p, s) in fap.iter().zip(sig.iter()) {
                assert!((p - (1.0 - s)).abs() <= 1e-6, "{method}/{norm}: FAP {p} for sig {s}");
            }
        }
    }
}

#[test]
// Purpose
// -------
// Log-space probabilities agree with the linear ones on realistic grids.
//
// Given
// -----
// - The 30-point grids of every normalization, analytic methods only.
//
// Expect
// ------
// - |exp(log FAP) − FAP| < 1e-12 for simple and baluev; relative 1e-12 for
//   davies, which may exceed 1.
fn log_and_linear_probabilities_agree() {
    let obs = make_data();
    for norm in Normalization::ALL {
        let z = power_grid(&obs, norm);
        for method in ANALYTIC {
            let p = false_alarm_probability(&z, FMAX, &obs, norm.as_str(), method, None).unwrap();
            let lp = log_false_alarm_probability(&z, FMAX, &obs, norm.as_str(), method, None)
                .unwrap();
            for (a, b) in p.iter().zip(lp.iter()) {
                if method == "davies" {
                    assert_relative_eq!(*a, b.exp(), epsilon = 1e-300, max_relative = 1e-12);
                } else {
                    assert!((a - b.exp()).abs() < 1e-12, "{method}/{norm}: {a} vs {}", b.exp());
                }
            }
        }
    }
}

#[test]
// Purpose
// -------
// The same peak judged in standard, model and log normalizations yields
// the same single-frequency survival, hence the same `simple` FAP, and
// nearly the same `baluev` FAP.
//
// Given
// -----
// - The standard grid (excluding its top point) converted to model and log.
//
// Expect
// ------
// - simple agrees within 1e-10; baluev within 5 % relative where it is
//   above 1e-6 (the upcrossing prefactors differ by about 1 %).
fn analytic_estimators_are_consistent_across_normalizations() {
    let obs = make_data();
    let dof = DegreesOfFreedom::default();
    let z_std = power_grid(&obs, Normalization::Standard).slice_move(ndarray::s![..29]);
    let reference = |method: &str| {
        false_alarm_probability(&z_std, FMAX, &obs, "standard", method, None).unwrap()
    };
    let (simple_ref, baluev_ref) = (reference("simple"), reference("baluev"));

    for norm in [Normalization::Model, Normalization::Log] {
        let z = convert_normalization(&z_std, obs.len(), Normalization::Standard, norm, None, &dof)
            .unwrap();
        let simple = false_alarm_probability(&z, FMAX, &obs, norm.as_str(), "simple", None).unwrap();
        let baluev = false_alarm_probability(&z, FMAX, &obs, norm.as_str(), "baluev", None).unwrap();
        for i in 0..z.len() {
            assert!((simple[i] - simple_ref[i]).abs() < 1e-10, "simple/{norm} at {i}");
            if baluev_ref[i] > 1e-6 {
                assert_relative_eq!(baluev[i], baluev_ref[i], max_relative = 0.05);
            }
        }
    }
}

#[test]
// Purpose
// -------
// A fixed bootstrap seed makes the whole pipeline reproducible.
//
// Given
// -----
// - Two bootstrap runs with 20 replicates and seed 42; one with seed 43.
//
// Expect
// ------
// - Identical FAP arrays and thresholds for equal seeds; different replicate
//   maxima for seed 43.
fn bootstrap_is_reproducible_with_seed() {
    let obs = make_data();
    let z = power_grid(&obs, Normalization::Standard);
    let a = false_alarm_probability(&z, FMAX, &obs, "standard", "bootstrap", bootstrap_kwds())
        .unwrap();
    let b = false_alarm_probability(&z, FMAX, &obs, "standard", "bootstrap", bootstrap_kwds())
        .unwrap();
    assert_eq!(a, b);

    let sig = array![0.5, 0.7];
    let za = significance_level(&sig, FMAX, &obs, "standard", "bootstrap", bootstrap_kwds()).unwrap();
    let zb = significance_level(&sig, FMAX, &obs, "standard", "bootstrap", bootstrap_kwds()).unwrap();
    assert_eq!(za, zb);

    let estimator = FalseAlarm::new(obs, FMAX, Normalization::Standard).unwrap();
    let first = estimator.bootstrap(&BootstrapOptions::new(20, Some(42)).unwrap()).unwrap();
    let other = estimator.bootstrap(&BootstrapOptions::new(20, Some(43)).unwrap()).unwrap();
    assert_ne!(first.maxima(), other.maxima());
}

#[test]
// Purpose
// -------
// Root finding and minimization agree on analytic thresholds.
//
// Given
// -----
// - Baluev in the log normalization, sig = [0.5, 0.95], default options
//   versus the minimizing solver.
//
// Expect
// ------
// - Thresholds within 1e-5 relative.
fn inversion_solvers_agree() {
    let obs = make_data();
    let sig = array![0.5, 0.95];
    let root = FalseAlarm::new(obs.clone(), FMAX, Normalization::Log).unwrap();
    let minimize_opts = FapOptions {
        inversion: InversionOptions { solver: InversionSolver::Minimize, ..Default::default() },
        ..Default::default()
    };
    let minimize = FalseAlarm::new(obs, FMAX, Normalization::Log)
        .unwrap()
        .with_options(minimize_opts);

    let a = root.significance_level(&sig, &FapMethod::Baluev).unwrap();
    let b = minimize.significance_level(&sig, &FapMethod::Baluev).unwrap();

    for (x, y) in a.iter().zip(b.iter()) {
        assert_relative_eq!(*x, *y, max_relative = 1e-5);
    }
}

#[test]
// Purpose
// -------
// Invalid requests fail with their dedicated errors.
//
// Given
// -----
// - An unknown method, an unknown normalization, significance 0 and a
//   non-positive fmax.
//
// Expect
// ------
// - `UnknownMethod`, `InvalidNormalization`, `OutOfRange` and
//   `InvalidMaxFrequency` respectively.
fn invalid_requests_are_rejected() {
    let obs = make_data();
    let z = array![0.1, 0.2];

    match false_alarm_probability(&z, FMAX, &obs, "standard", "magic", None) {
        Err(FapError::UnknownMethod { name }) => assert_eq!(name, "magic"),
        other => panic!("expected UnknownMethod, got {other:?}"),
    }
    match false_alarm_probability(&z, FMAX, &obs, "power", "baluev", None) {
        Err(FapError::InvalidNormalization { .. }) => (),
        other => panic!("expected InvalidNormalization, got {other:?}"),
    }
    match significance_level(&array![0.0], FMAX, &obs, "standard", "baluev", None) {
        Err(FapError::OutOfRange { value }) => assert_eq!(value, 0.0),
        other => panic!("expected OutOfRange, got {other:?}"),
    }
    match false_alarm_probability(&z, -1.0, &obs, "standard", "baluev", None) {
        Err(FapError::InvalidMaxFrequency { .. }) => (),
        other => panic!("expected InvalidMaxFrequency, got {other:?}"),
    }
}
