//! Error types for curve and field decoding.

use thiserror::Error;

/// Errors raised when untrusted bytes are turned into field elements or points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The coordinates do not satisfy y^2 = x^3 + 3.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// An encoded value is not below its modulus.
    #[error("encoded value is not reduced")]
    NonCanonical,

    /// A compressed x-coordinate has no matching y.
    #[error("x^3 + 3 is not a quadratic residue")]
    NotQuadraticResidue,

    /// The point at infinity was encountered where a proper point is required.
    #[error("unexpected point at infinity")]
    PointAtInfinity,
}
