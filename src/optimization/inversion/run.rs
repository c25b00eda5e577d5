//! Execution helper that runs an `argmin` solver on a log-domain inversion
//! problem and returns a crate-friendly [`SolverOutcome`].
use argmin::core::{Executor, IterState, Solver, State, TerminationReason, TerminationStatus};

use crate::optimization::{
    errors::{OptError, OptResult},
    inversion::{adapter::LogDomainObjective, types::InversionOptions},
};

/// Scalar solver state used by Brent's methods.
pub type ScalarState = IterState<f64, (), (), (), (), f64>;

/// Result of one solver run on the log domain.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    /// Best `u = ln x` found.
    pub log_x: f64,
    pub iterations: u64,
    pub status: TerminationStatus,
}

impl SolverOutcome {
    /// `true` when the solver stopped on its own convergence criterion.
    pub fn converged(&self) -> bool {
        matches!(
            self.status,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        )
    }
}

/// Run an `argmin` solver for a log-domain inversion problem.
///
/// Wires up the problem, the iteration cap from `opts` and, if the
/// `obs_slog` feature is enabled and `opts.verbose == true`, a terminal slog
/// observer; then executes the solver and extracts the best parameter.
///
/// # Errors
/// - Propagates any `argmin` runtime error (no sign change across the
///   bracket, non-finite cost, ...) via `From<argmin::core::Error>`.
/// - `OptError::MissingSolution` if the final state carries no parameter.
pub fn run_solver<'a, F, S>(
    problem: LogDomainObjective<'a, F>, solver: S, opts: &InversionOptions,
) -> OptResult<SolverOutcome>
where
    F: Fn(f64) -> f64,
    S: Solver<LogDomainObjective<'a, F>, ScalarState>,
{
    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.max_iters(opts.max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let result = executor.run()?;
    let state = result.state();
    let log_x = state
        .get_best_param()
        .or_else(|| state.get_param())
        .copied()
        .ok_or(OptError::MissingSolution)?;

    Ok(SolverOutcome {
        log_x,
        iterations: state.get_iter(),
        status: state.get_termination_status().clone(),
    })
}
