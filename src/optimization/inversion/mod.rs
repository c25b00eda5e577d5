//! inversion — numerical inverses of monotone scalar functions.
//!
//! Purpose
//! -------
//! Turn a one-argument function `f: (0, ∞) → ℝ` into its inverse by solving
//! `f(x) = y` on the log domain `u = ln x` with `argmin`'s Brent solvers.
//! The false-alarm layer uses this to map a target probability back to a
//! power threshold, but nothing here knows about periodograms.
//!
//! Key behaviors
//! -------------
//! - [`invert`] wraps `f` and a name into an [`Inverted`] value; each
//!   evaluation builds and runs a fresh solver.
//! - Two formulations via [`InversionSolver`]: bracketed root finding on the
//!   residual (default) or bracketed minimization of the squared residual.
//! - Failures of any kind surface as `OptError::InversionFailed` carrying the
//!   target and the function name.
//!
//! Invariants & assumptions
//! ------------------------
//! - `f` is finite on the whole [`Bracket`]; non-finite values abort the
//!   solve with `NonFiniteCost`, reported as an inversion failure.
//! - Monotonicity is assumed, not checked; for non-monotone `f` the root
//!   solver returns one of the crossings inside the bracket.
//!
//! Downstream usage
//! ----------------
//! - `false_alarm::api` inverts analytic FAP estimators at `1 − significance`
//!   with a normalization-specific bracket.
//!
//! Testing notes
//! -------------
//! - `api` tests invert `1/(1 + x)` with both solvers and exercise every
//!   failure path; `types` tests cover option validation; `adapter` tests
//!   the cost evaluation and its non-finite guard.

pub mod adapter;
pub mod api;
pub mod run;
pub mod types;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{Inverted, invert};
pub use self::run::SolverOutcome;
pub use self::types::{Bracket, InversionOptions, InversionSolver};
