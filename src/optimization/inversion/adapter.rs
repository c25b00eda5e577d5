//! Adapter that exposes "find x with f(x) = y" as an `argmin` problem on the
//! log domain.
//!
//! The solver parameter is `u = ln x`. Depending on the objective mode the
//! cost is either the signed residual `f(eᵘ) − y` (root finding) or its
//! square (least-squares minimization).
use argmin::core::{CostFunction, Error};

use crate::optimization::errors::OptError;

/// What the adapter reports as the cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// `f(eᵘ) − y`
    Residual,
    /// `(f(eᵘ) − y)²`
    SquaredResidual,
}

/// Bridges a scalar function `f: (0, ∞) → ℝ` and a target `y` to `argmin`'s
/// `CostFunction`.
#[derive(Debug, Clone)]
pub struct LogDomainObjective<'a, F> {
    pub f: &'a F,
    pub target: f64,
    pub objective: Objective,
}

impl<'a, F> LogDomainObjective<'a, F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: &'a F, target: f64, objective: Objective) -> Self {
        Self { f, target, objective }
    }

    /// Signed residual `f(eᵘ) − y` at `u = log_x`.
    pub fn residual(&self, log_x: f64) -> f64 {
        (self.f)(log_x.exp()) - self.target
    }
}

impl<F> CostFunction for LogDomainObjective<'_, F>
where
    F: Fn(f64) -> f64,
{
    type Param = f64;
    type Output = f64;

    /// Evaluate the residual (or its square) at `u = ln x`.
    ///
    /// # Errors
    /// Returns `OptError::NonFiniteCost` when `f(eᵘ)` is not finite, so the
    /// solver stops instead of bisecting on `NaN`.
    fn cost(&self, log_x: &Self::Param) -> Result<Self::Output, Error> {
        let r = self.residual(*log_x);
        if !r.is_finite() {
            return Err((OptError::NonFiniteCost { value: r, log_x: *log_x }).into());
        }
        Ok(match self.objective {
            Objective::Residual => r,
            Objective::SquaredResidual => r * r,
        })
    }
}
