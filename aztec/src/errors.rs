//! Error types for note construction, proving and verification.

use bn128::CurveError;
use thiserror::Error;

/// Errors that can occur while building or checking a proof.
///
/// Every variant is terminal for the operation that raised it. Verification
/// reports rejection through this type, never through a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AztecError {
    /// Wrong note count, bad hex, wrong length or an unreduced value.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A coordinate pair fails y^2 = x^3 + 3.
    ///
    /// Raised before the point takes part in any group operation.
    #[error("point is not on the curve")]
    InvalidPoint,

    /// A note point or a blinding point is the identity.
    #[error("unexpected point at infinity")]
    PointAtInfinity,

    /// The recomputed Fiat-Shamir challenge differs from the supplied one.
    #[error("challenge mismatch, proof rejected")]
    ChallengeMismatch,

    /// The trusted setup has no base point for this value.
    #[error("no setup point for value {value}, supported range is [{k_min}, {k_max}]")]
    SetupLookupFailure { value: u64, k_min: u64, k_max: u64 },

    /// A compressed x-coordinate has no square root on the curve.
    #[error("compressed point cannot be decompressed")]
    DecompressionFailure,

    /// `to_scalar` was called on a transcript that was not collapsed.
    #[error("transcript holds {words} words, expected exactly one")]
    TranscriptMisuse { words: usize },
}

impl AztecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }
}

impl From<CurveError> for AztecError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::NotOnCurve => Self::InvalidPoint,
            CurveError::NonCanonical => Self::malformed("value is not reduced"),
            CurveError::NotQuadraticResidue => Self::DecompressionFailure,
            CurveError::PointAtInfinity => Self::PointAtInfinity,
        }
    }
}
