//! optimization::errors — error surface of the argmin-backed solvers.
//!
//! Purpose
//! -------
//! Normalize solver configuration mistakes, non-finite objective values,
//! backend (`argmin`) failures and unsuccessful inversions into a single
//! enum with a common result alias.
//!
//! Conventions
//! -----------
//! - Backend errors are downcast to `argmin::core::ArgminError` and mapped
//!   to dedicated wrapper variants; crate errors raised inside a cost
//!   function come back unchanged; anything else becomes `BackendError`.
use argmin::core::{ArgminError, Error};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- InversionOptions ----
    /// Solver tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Residual tolerance needs to be positive and finite.
    InvalidResidualTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: u64,
        reason: &'static str,
    },
    /// Invalid solver name.
    InvalidSolver {
        name: String,
        reason: &'static str,
    },
    /// Bracket must satisfy 0 < lower < upper < ∞.
    InvalidBracket {
        lower: f64,
        upper: f64,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
        log_x: f64,
    },

    // ---- Inversion outcome ----
    /// Solver finished without reporting a parameter.
    MissingSolution,
    /// The function could not be inverted at `target`.
    InversionFailed {
        target: f64,
        function: String,
        reason: String,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- InversionOptions ----
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid solver tolerance {tol}: {reason}")
            }
            OptError::InvalidResidualTolerance { tol, reason } => {
                write!(f, "Invalid residual tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidSolver { name, reason } => {
                write!(f, "Invalid inversion solver '{name}': {reason}")
            }
            OptError::InvalidBracket { lower, upper } => {
                write!(f, "Invalid bracket [{lower}, {upper}]: must satisfy 0 < lower < upper < inf")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value, log_x } => {
                write!(f, "Non-finite cost value {value} at ln(x) = {log_x}")
            }

            // ---- Inversion outcome ----
            OptError::MissingSolution => {
                write!(f, "Solver finished without a solution")
            }
            OptError::InversionFailed { target, function, reason } => {
                write!(f, "Failed to invert {function} at target {target}: {reason}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
