//! false_alarm — false-alarm probabilities and significance thresholds for
//! periodogram peaks.
//!
//! Purpose
//! -------
//! Answer two questions about the highest peak of a Lomb-Scargle
//! periodogram searched up to `fmax`: how likely is a peak at least this
//! high under pure noise (the false-alarm probability, FAP), and which peak
//! height corresponds to a given significance level.
//!
//! Key behaviors
//! -------------
//! - Four methods, selected through [`FapMethod`]:
//!   `simple` (independent-frequency approximation), `davies` (upper bound),
//!   `baluev` (default; extreme-value approximation) and `bootstrap`
//!   (resampling).
//! - Linear and log-space probabilities; the log forms stay finite deep in
//!   the tail.
//! - Significance thresholds by numerical inversion (analytic methods) or
//!   interpolation of the bootstrap distribution.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are validated once by [`Observations::new`].
//! - Analytic methods model a single sinusoid on a floating mean:
//!   `dK − dH = 2`, defaults `dH = 1`, `dK = 3`.
//! - Thresholds are expressed in the estimator's normalization.
//!
//! Conventions
//! -----------
//! - All failures are reported as [`FapError`]; normalization and
//!   optimizer errors are folded in via `From`.
//! - Events go through `tracing`: bootstrap seeds and inversion summaries at
//!   debug level, failed inversions at warn level.
//!
//! Downstream usage
//! ----------------
//! - Rust callers typically build an [`Observations`], wrap it in a
//!   [`FalseAlarm`] and call `probability` or `significance_level`.
//! - The Python bindings call the name-based free functions.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; `tests/integration_fap_pipeline.rs`
//!   runs the full pipeline on a noisy sinusoid.

pub mod api;
pub mod bootstrap;
pub mod data;
pub mod davies;
pub mod errors;
pub mod methods;
pub mod single;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{
    FalseAlarm, FapOptions, false_alarm_probability, log_false_alarm_probability,
    significance_level,
};
pub use self::bootstrap::{BootstrapDistribution, BootstrapOptions, DEFAULT_BOOTSTRAPS};
pub use self::data::Observations;
pub use self::davies::{UpcrossingRate, gamma_factor};
pub use self::errors::{FapError, FapResult};
pub use self::methods::{AnalyticFap, AnalyticMethod, FapMethod, METHODS, MethodKind};
pub use self::single::{cdf_single, fap_single, inv_fap_single, log_fap_single, pdf_single};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use lomb_scargle_fap::false_alarm::prelude::*;
//
// to import the estimator surface in a single line.

pub mod prelude {
    pub use super::api::{
        FalseAlarm, FapOptions, false_alarm_probability, log_false_alarm_probability,
        significance_level,
    };
    pub use super::bootstrap::BootstrapOptions;
    pub use super::data::Observations;
    pub use super::errors::{FapError, FapResult};
    pub use super::methods::{FapMethod, MethodKind};
}
