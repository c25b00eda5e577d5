//! optimization — argmin-backed inversion, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Provide the numerical machinery the false-alarm layer leans on: a
//! log-domain inversion driver built on `argmin`'s Brent solvers, the
//! log-space primitives that keep tail probabilities accurate, and a single
//! error/result surface for both.
//!
//! Key behaviors
//! -------------
//! - `inversion` solves `f(x) = y` for monotone `f` over a positive bracket
//!   and reports unconverged solves as `OptError::InversionFailed`.
//! - `numerical_stability` supplies `log1mexp`, `log_add_exp` and `ln_sinh`.
//! - `errors` maps backend `argmin` failures into `OptError` with a common
//!   result alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Callers never see raw `argmin` errors.
//! - Solver progress can be printed through the `obs_slog` feature; events
//!   about converged and failed inversions go through `tracing`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end behavior is covered
//!   through the significance-level tests of `false_alarm`.

pub mod errors;
pub mod inversion;
pub mod numerical_stability;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{OptError, OptResult};
pub use self::inversion::{Bracket, InversionOptions, InversionSolver, Inverted, invert};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use lomb_scargle_fap::optimization::prelude::*;
//
// to import the inversion surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::inversion::{Bracket, InversionOptions, InversionSolver, Inverted, invert};
}
