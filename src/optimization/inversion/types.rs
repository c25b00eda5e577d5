//! inversion::types — configuration for log-domain function inversion.
//!
//! Purpose
//! -------
//! Hold the solver choice, tolerances and search bracket used when a
//! monotone scalar function is inverted numerically.
//!
//! Key behaviors
//! -------------
//! - [`InversionSolver`] selects between a bracketed root finder on
//!   `f(eᵘ) − y` and a bracketed minimizer of `(f(eᵘ) − y)²`; it parses
//!   case-insensitively from `"root"` / `"minimize"`.
//! - [`InversionOptions`] and [`Bracket`] validate their numeric fields in
//!   `new` and provide conservative defaults.
//!
//! Invariants & assumptions
//! ------------------------
//! - Brackets live in the *positive* domain `0 < lower < upper < ∞`; the
//!   solvers work on `u = ln x` inside `[ln lower, ln upper]`.
//! - Tolerances are finite and strictly positive; `max_iter > 0`.
use std::str::FromStr;

use crate::optimization::{
    errors::{OptError, OptResult},
    numerical_stability::LOG_DOMAIN_FLOOR,
};

/// Algorithm used to invert a function on the log domain.
///
/// Variants:
/// - `Root`: Brent's root finder on `f(eᵘ) − y`. Requires a sign change
///   across the bracket.
/// - `Minimize`: Brent's bounded minimizer on `(f(eᵘ) − y)²`. Accepted only
///   when the final residual is within `residual_tol`.
///
/// Parsing:
/// Accepts case-insensitive `"root"` and `"minimize"`. Unknown names return
/// `OptError::InvalidSolver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InversionSolver {
    #[default]
    Root,
    Minimize,
}

impl FromStr for InversionSolver {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "root" => Ok(InversionSolver::Root),
            "minimize" => Ok(InversionSolver::Minimize),
            _ => Err(OptError::InvalidSolver {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'root' or 'minimize'.",
            }),
        }
    }
}

/// Solver configuration for one inversion.
///
/// Fields:
/// - `solver: InversionSolver` — algorithm (default `Root`).
/// - `tol: f64` — absolute tolerance on `ln x` (default `1e-12`).
/// - `residual_tol: f64` — accepted `|f(x) − y|`, relative to `max(1, |y|)`
///   (default `1e-6`).
/// - `max_iter: u64` — iteration cap per target (default `200`).
/// - `verbose: bool` — attach a terminal observer (behind the `obs_slog`
///   feature).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionOptions {
    pub solver: InversionSolver,
    pub tol: f64,
    pub residual_tol: f64,
    pub max_iter: u64,
    pub verbose: bool,
}

impl InversionOptions {
    /// Create validated inversion options.
    ///
    /// # Errors
    /// - `OptError::InvalidTolerance` if `tol` is not finite and `> 0`.
    /// - `OptError::InvalidResidualTolerance` if `residual_tol` is not finite and `> 0`.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        solver: InversionSolver, tol: f64, residual_tol: f64, max_iter: u64, verbose: bool,
    ) -> OptResult<Self> {
        if !(tol.is_finite() && tol > 0.0) {
            return Err(OptError::InvalidTolerance {
                tol,
                reason: "Tolerance must be finite and positive.",
            });
        }
        if !(residual_tol.is_finite() && residual_tol > 0.0) {
            return Err(OptError::InvalidResidualTolerance {
                tol: residual_tol,
                reason: "Residual tolerance must be finite and positive.",
            });
        }
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { solver, tol, residual_tol, max_iter, verbose })
    }
}

impl Default for InversionOptions {
    fn default() -> Self {
        Self {
            solver: InversionSolver::Root,
            tol: 1e-12,
            residual_tol: 1e-6,
            max_iter: 200,
            verbose: false,
        }
    }
}

/// Positive search interval `[lower, upper]` for the inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
}

impl Bracket {
    /// # Errors
    /// - `OptError::InvalidBracket` unless `0 < lower < upper < ∞`.
    pub fn new(lower: f64, upper: f64) -> OptResult<Self> {
        if !(lower > 0.0 && upper > lower && upper.is_finite()) {
            return Err(OptError::InvalidBracket { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The bracket on the log domain, `(ln lower, ln upper)`.
    pub fn log_bounds(&self) -> (f64, f64) {
        (self.lower.ln(), self.upper.ln())
    }
}

impl Default for Bracket {
    fn default() -> Self {
        Self { lower: LOG_DOMAIN_FLOOR, upper: 1e12 }
    }
}
