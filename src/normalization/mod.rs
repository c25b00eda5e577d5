//! normalization — power normalizations of the Lomb-Scargle periodogram.
//!
//! Purpose
//! -------
//! Own everything that depends only on *how a periodogram power is
//! scaled*: the closed set of normalization tags, the model degrees of
//! freedom, threshold conversion between scales and the reference
//! chi-square that anchors the absolute `psd` scale.
//!
//! Key behaviors
//! -------------
//! - [`Normalization`] is parsed from strings once at the API edge; the
//!   rest of the crate matches on the enum.
//! - [`convert_normalization`] maps thresholds element-wise and preserves
//!   array shape; conversions touching `psd` need [`compute_chi2_ref`].
//! - [`DegreesOfFreedom`] carries the `(dH, dK)` pair explicitly instead of
//!   hard-coding `(1, 3)` inside each formula.
//!
//! Downstream usage
//! ----------------
//! - `false_alarm` evaluates its closed forms per [`Normalization`] and uses
//!   [`DegreesOfFreedom::residuals`] to obtain `(NH, NK)`.
//! - `periodogram` produces standard powers and converts them to the
//!   requested scale with [`convert_normalization`].

pub mod convert;
pub mod errors;
pub mod kind;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::convert::{compute_chi2_ref, convert_normalization, convert_value};
pub use self::errors::{NormError, NormResult};
pub use self::kind::{DegreesOfFreedom, Normalization};
