//! High-level API for inverting monotone scalar functions numerically.
//!
//! - [`invert`]: wrap a function `f: (0, ∞) → ℝ` and a descriptive name.
//! - [`Inverted`]: the resulting inverse; evaluate it at one target with
//!   [`Inverted::eval`] or element-wise with [`Inverted::eval_array`].
//!
//! Each evaluation builds its own solver instance; nothing is shared between
//! calls, so an `Inverted` can be evaluated from several threads at once
//! when `F: Sync`.
use argmin::solver::brent::{BrentOpt, BrentRoot};
use ndarray::{Array, ArrayBase, Data, Dimension};
use tracing::{debug, warn};

use crate::optimization::{
    errors::{OptError, OptResult},
    inversion::{
        adapter::{LogDomainObjective, Objective},
        run::run_solver,
        types::{Bracket, InversionOptions, InversionSolver},
    },
};

/// Numerical inverse of a monotone scalar function.
///
/// `eval(y)` returns `x` inside the bracket with `f(x) ≈ y`, searching over
/// `u = ln x`. The name is carried into `OptError::InversionFailed` so that
/// failures can be traced back to the function being inverted.
#[derive(Debug, Clone)]
pub struct Inverted<F> {
    f: F,
    name: String,
    bracket: Bracket,
    opts: InversionOptions,
}

/// Build the inverse of `f` with the default bracket `[1e-12, 1e12]` and
/// default [`InversionOptions`].
///
/// # Examples
/// ```rust
/// # use lomb_scargle_fap::optimization::inversion::invert;
/// let g = invert(|x: f64| 1.0 / (1.0 + x), "reciprocal");
/// let x = g.eval(0.25).unwrap();
/// assert!((x - 3.0).abs() < 1e-9);
/// ```
pub fn invert<F>(f: F, name: impl Into<String>) -> Inverted<F>
where
    F: Fn(f64) -> f64,
{
    Inverted { f, name: name.into(), bracket: Bracket::default(), opts: InversionOptions::default() }
}

impl<F> Inverted<F>
where
    F: Fn(f64) -> f64,
{
    pub fn with_bracket(mut self, bracket: Bracket) -> Self {
        self.bracket = bracket;
        self
    }

    pub fn with_options(mut self, opts: InversionOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Solve `f(x) = y` for `x` inside the bracket.
    ///
    /// Errors
    /// ------
    /// - `OptError::InversionFailed { target, function, reason }` when `y` is
    ///   not finite, the backend solver errors (e.g. `f − y` has no sign
    ///   change across the bracket), the solver stops without converging, or
    ///   the final residual exceeds `residual_tol · max(1, |y|)`.
    pub fn eval(&self, y: f64) -> OptResult<f64> {
        let failed = |reason: String| {
            warn!(target_value = y, function = %self.name, %reason, "inversion failed");
            OptError::InversionFailed { target: y, function: self.name.clone(), reason }
        };
        if !y.is_finite() {
            return Err(failed("target must be finite".to_string()));
        }

        let (lower, upper) = self.bracket.log_bounds();
        let outcome = match self.opts.solver {
            InversionSolver::Root => {
                let problem = LogDomainObjective::new(&self.f, y, Objective::Residual);
                run_solver(problem, BrentRoot::new(lower, upper, self.opts.tol), &self.opts)
            }
            InversionSolver::Minimize => {
                let problem = LogDomainObjective::new(&self.f, y, Objective::SquaredResidual);
                let solver =
                    BrentOpt::new(lower, upper).set_tolerance(f64::EPSILON.sqrt(), self.opts.tol);
                run_solver(problem, solver, &self.opts)
            }
        }
        .map_err(|err| failed(err.to_string()))?;

        if !outcome.converged() {
            return Err(failed(format!(
                "solver stopped with status {:?} after {} iterations",
                outcome.status, outcome.iterations
            )));
        }

        let x = outcome.log_x.exp();
        let residual = (self.f)(x) - y;
        if !(residual.abs() <= self.opts.residual_tol * y.abs().max(1.0)) {
            return Err(failed(format!("residual {residual:e} at x = {x} exceeds tolerance")));
        }

        debug!(
            target_value = y,
            function = %self.name,
            x,
            iterations = outcome.iterations,
            "inversion converged"
        );
        Ok(x)
    }

    /// Element-wise [`eval`](Self::eval); the output has the shape of `ys`.
    ///
    /// The first failing element aborts the whole call.
    pub fn eval_array<S, D>(&self, ys: &ArrayBase<S, D>) -> OptResult<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let mut out = Array::zeros(ys.raw_dim());
        for (slot, &y) in out.iter_mut().zip(ys.iter()) {
            *slot = self.eval(y)?;
        }
        Ok(out)
    }
}
