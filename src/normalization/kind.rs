//! normalization::kind — normalization tags and degrees-of-freedom configuration.
//!
//! Purpose
//! -------
//! Define the closed set of periodogram power normalizations and the
//! `(dH, dK)` pair of model degrees of freedom that every closed-form FAP
//! and conversion formula depends on.
//!
//! Key behaviors
//! -------------
//! - [`Normalization`] parses case-insensitively from
//!   `"standard" | "model" | "log" | "psd"` and rejects anything else with
//!   [`NormError::InvalidNormalization`].
//! - [`DegreesOfFreedom`] defaults to `(dH, dK) = (1, 3)`: a floating mean
//!   under the null and mean plus one sinusoid under the alternative.
//!
//! Invariants & assumptions
//! ------------------------
//! - `dK > dH` for every constructed [`DegreesOfFreedom`].
//! - [`DegreesOfFreedom::residuals`] only succeeds when `N − dK ≥ 1` and
//!   `N − dH ≥ 2`; the Γ-ratio of the Davies term needs `(NH − 1)/2 > 0`.
use std::str::FromStr;

use crate::normalization::errors::{NormError, NormResult};

/// Periodogram power normalization.
///
/// - `Standard`: fraction of the chi-square reduction, `Z ∈ [0, 1]`.
/// - `Model`: ratio of explained to residual chi-square, `Z ∈ [0, ∞)`.
/// - `Log`: `−ln(1 − Z_standard)`, `Z ∈ [0, ∞)`.
/// - `Psd`: half the chi-square reduction in absolute units; converting
///   to or from it needs the reference chi-square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    Standard,
    Model,
    Log,
    Psd,
}

impl Normalization {
    /// All normalizations in canonical order.
    pub const ALL: [Normalization; 4] =
        [Normalization::Standard, Normalization::Model, Normalization::Log, Normalization::Psd];

    /// Lower-case tag used in messages and by the parser.
    pub fn as_str(&self) -> &'static str {
        match self {
            Normalization::Standard => "standard",
            Normalization::Model => "model",
            Normalization::Log => "log",
            Normalization::Psd => "psd",
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalization {
    type Err = NormError;

    /// Parse a normalization tag (case-insensitive, surrounding whitespace
    /// ignored). Unknown tags return `NormError::InvalidNormalization`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Normalization::Standard),
            "model" => Ok(Normalization::Model),
            "log" => Ok(Normalization::Log),
            "psd" => Ok(Normalization::Psd),
            _ => Err(NormError::InvalidNormalization { name: s.to_string() }),
        }
    }
}

/// Model degrees of freedom for the null (`dh`) and alternative (`dk`)
/// hypotheses.
///
/// Constructor:
/// - `new(dh, dk) -> NormResult<Self>` — requires `dk > dh`.
///
/// Defaults:
/// - `dh = 1`, `dk = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreesOfFreedom {
    pub dh: usize,
    pub dk: usize,
}

impl DegreesOfFreedom {
    pub fn new(dh: usize, dk: usize) -> NormResult<Self> {
        if dk <= dh {
            return Err(NormError::InvalidDof { dh, dk });
        }
        Ok(Self { dh, dk })
    }

    /// Residual degrees of freedom `(NH, NK) = (N − dH, N − dK)` as `f64`.
    ///
    /// # Errors
    /// - `NormError::NonPositiveDof` when `N − dK < 1` or `N − dH < 2`.
    pub fn residuals(&self, n: usize) -> NormResult<(f64, f64)> {
        if n < self.dk + 1 || n < self.dh + 2 {
            return Err(NormError::NonPositiveDof { n, dh: self.dh, dk: self.dk });
        }
        Ok(((n - self.dh) as f64, (n - self.dk) as f64))
    }

    /// `dK − dH`, the number of extra parameters of the alternative model.
    ///
    /// # Errors
    /// - `NormError::InvalidDof` when `dk ≤ dh` (fields set without [`new`](Self::new)).
    pub fn extra_parameters(&self) -> NormResult<usize> {
        match self.dk.checked_sub(self.dh) {
            Some(extra) if extra > 0 => Ok(extra),
            _ => Err(NormError::InvalidDof { dh: self.dh, dk: self.dk }),
        }
    }
}

impl Default for DegreesOfFreedom {
    fn default() -> Self {
        Self { dh: 1, dk: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing of every tag, case-insensitivity and rejection of unknowns.
    // - DOF construction rules and residual DOF bounds.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Every canonical tag parses back to its variant, in any case.
    //
    // Given
    // -----
    // - The tags from `Normalization::ALL`, upper-cased.
    //
    // Expect
    // ------
    // - Each parses to the originating variant.
    fn normalization_parses_all_tags_case_insensitively() {
        for norm in Normalization::ALL {
            // Arrange
            let tag = norm.as_str().to_uppercase();

            // Act
            let parsed: Normalization = tag.parse().unwrap();

            // Assert
            assert_eq!(parsed, norm);
        }
    }

    #[test]
    // Purpose
    // -------
    // Unknown tags are rejected with the offending name preserved.
    //
    // Given
    // -----
    // - The tag "power".
    //
    // Expect
    // ------
    // - `Err(NormError::InvalidNormalization { name: "power" })`.
    fn normalization_rejects_unknown_tag() {
        // Act
        let result = "power".parse::<Normalization>();

        // Assert
        match result {
            Err(NormError::InvalidNormalization { name }) => assert_eq!(name, "power"),
            other => panic!("expected InvalidNormalization, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // The null model must nest strictly inside the alternative.
    //
    // Given
    // -----
    // - dh = dk = 2.
    //
    // Expect
    // ------
    // - `Err(NormError::InvalidDof { .. })`.
    fn dof_new_rejects_non_nested_models() {
        match DegreesOfFreedom::new(2, 2) {
            Err(NormError::InvalidDof { dh: 2, dk: 2 }) => (),
            other => panic!("expected InvalidDof, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Residual DOF are reported for valid sample sizes and rejected when
    // the alternative model has no residual freedom left.
    //
    // Given
    // -----
    // - Default DOF (1, 3) with N = 10 and N = 3.
    //
    // Expect
    // ------
    // - N = 10 yields (9, 7); N = 3 yields `NonPositiveDof`.
    fn dof_residuals_follow_sample_size() {
        // Arrange
        let dof = DegreesOfFreedom::default();

        // Act
        let ok = dof.residuals(10).unwrap();
        let err = dof.residuals(3);

        // Assert
        assert_eq!(ok, (9.0, 7.0));
        match err {
            Err(NormError::NonPositiveDof { n: 3, .. }) => (),
            other => panic!("expected NonPositiveDof, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // A pair built with its public fields, bypassing `new`, is still
    // rejected instead of underflowing.
    //
    // Given
    // -----
    // - DegreesOfFreedom { dh: 3, dk: 1 } and { dh: 2, dk: 2 }.
    //
    // Expect
    // ------
    // - `InvalidDof` for both; the default pair has 2 extra parameters.
    fn extra_parameters_rejects_inverted_pair() {
        for (dh, dk) in [(3, 1), (2, 2)] {
            match (DegreesOfFreedom { dh, dk }).extra_parameters() {
                Err(NormError::InvalidDof { dh: h, dk: k }) => assert_eq!((h, k), (dh, dk)),
                other => panic!("expected InvalidDof, got {other:?}"),
            }
        }
        assert_eq!(DegreesOfFreedom::default().extra_parameters().unwrap(), 2);
    }
}
