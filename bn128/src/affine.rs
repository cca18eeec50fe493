// alt_bn128 (BN254) G1 : y^2 = x^3 + 3 over GF(p)
// p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
// n = 21888242871839275222246405745257275088548364400416034343698204186575808495617 (prime order, cofactor 1)
// g = (1, 2)
// h = hash_to_curve("AZTEC_BN128_H"), discrete log w.r.t. g unknown

use crate::errors::CurveError;
use crate::hash_to_curve::{hash_to_curve, H_SEED};
use crate::{BaseField, Group, Projective, ScalarField};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static H: Lazy<Affine> = Lazy::new(|| hash_to_curve(H_SEED));

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affine {
    /// The x-coordinate of the point
    pub x: BaseField,
    /// The y-coordinate of the point
    pub y: BaseField,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    /// The 'b' coefficient of y^2 = x^3 + b
    #[inline]
    pub fn curve_b() -> BaseField {
        BaseField::from_u64(3)
    }

    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: BaseField::ZERO,
        y: BaseField::ZERO,
        is_infinity: true,
    };

    /// Create a new affine point without checking the curve equation.
    pub fn new(x: BaseField, y: BaseField) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    /// Create a point from coordinates, rejecting pairs off the curve.
    pub fn from_coordinates(x: BaseField, y: BaseField) -> Result<Self, CurveError> {
        let point = Affine::new(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CurveError::NotOnCurve)
        }
    }

    /// Parse `x || y` as two 32-byte big-endian words.
    ///
    /// Coordinates must be canonical and satisfy the curve equation. The
    /// all-zero encoding is not accepted; infinity never appears on the wire.
    pub fn from_be_bytes(bytes: &[u8; 64]) -> Result<Self, CurveError> {
        let (x_bytes, y_bytes) = bytes.split_at(32);
        let x = parse_coordinate(x_bytes)?;
        let y = parse_coordinate(y_bytes)?;
        Self::from_coordinates(x, y)
    }

    /// `x || y` as two 32-byte big-endian words. Infinity encodes as zeros.
    pub fn to_be_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        if !self.is_infinity {
            out[..32].copy_from_slice(&self.x.to_be_bytes());
            out[32..].copy_from_slice(&self.y.to_be_bytes());
        }
        out
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + b.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        self.y.square() == self.x.square() * self.x + Self::curve_b()
    }

    /// Generator point (1, 2).
    pub fn generator() -> Self {
        Affine::new(BaseField::ONE, BaseField::from_u64(2))
    }

    /// Second generator with no known discrete log relative to `g`.
    pub fn h() -> Self {
        *H
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        Projective::from_affine(self).double().to_affine()
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return *self;
        }
        Affine::new(self.x, -self.y)
    }
}

fn parse_coordinate(bytes: &[u8]) -> Result<BaseField, CurveError> {
    let word: &[u8; 32] = bytes.try_into().map_err(|_| CurveError::NonCanonical)?;
    BaseField::from_be_bytes(word).ok_or(CurveError::NonCanonical)
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Affine::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    /// Runs in Jacobian coordinates and normalizes once at the end.
    fn scalar_mul(&self, scalar: &ScalarField) -> Self {
        Projective::from_affine(self)
            .scalar_mul_windowed(scalar)
            .to_affine()
    }
}

impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Projective::from_affine(&self).add_affine(&other).to_affine()
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Affine> for ScalarField {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinity() {
        let inf = Affine::INFINITY;
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
    }

    #[test]
    fn test_generators_on_curve() {
        assert!(Affine::generator().is_on_curve(), "g is not on the curve");
        assert!(Affine::h().is_on_curve(), "h is not on the curve");
        assert_ne!(Affine::generator(), Affine::h());
    }

    #[test]
    fn test_h_coordinates() {
        let h = Affine::h();
        assert_eq!(
            h.x.to_string(),
            "0x142ff605be33832994092cc1d3c95333933061006fb38370dbc808ac45e493bd"
        );
        assert_eq!(
            h.y.to_string(),
            "0x0bcc2d4224764a5c22a99a5055bc16dad69295f92cade00fa4e25c3a914522e6"
        );
    }

    #[test]
    fn test_from_coordinates_rejects_off_curve() {
        let bad = Affine::from_coordinates(BaseField::ONE, BaseField::from_u64(3));
        assert_eq!(bad, Err(CurveError::NotOnCurve));
        let good = Affine::from_coordinates(BaseField::ONE, BaseField::from_u64(2));
        assert_eq!(good, Ok(Affine::generator()));
    }

    #[test]
    fn test_byte_roundtrip() {
        let p = Affine::h() * ScalarField::from_u64(99);
        let bytes = p.to_be_bytes();
        assert_eq!(Affine::from_be_bytes(&bytes), Ok(p));
    }

    #[test]
    fn test_from_bytes_rejects_non_canonical() {
        let mut bytes = Affine::generator().to_be_bytes();
        bytes[..32].copy_from_slice(&[0xff; 32]);
        assert_eq!(Affine::from_be_bytes(&bytes), Err(CurveError::NonCanonical));
        assert_eq!(
            Affine::from_be_bytes(&[0u8; 64]),
            Err(CurveError::NotOnCurve)
        );
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Affine::generator();
        let inf = Affine::INFINITY;

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
    }

    #[test]
    fn test_point_doubling() {
        let g = Affine::generator();
        let g2 = g.double();

        assert!(g2.is_on_curve(), "Doubled point is not on the curve");
        assert_eq!(g + g, g2);
    }

    #[test]
    fn test_point_negation() {
        let g = Affine::generator();
        let neg_g = g.negate();

        assert!(neg_g.is_on_curve());
        assert_eq!(g + neg_g, Affine::INFINITY);
    }

    #[test]
    fn test_scalar_multiplication() {
        let g = Affine::generator();
        let result = g * ScalarField::from_u64(5);

        // 5*G = G + G + G + G + G
        let expected = g + g + g + g + g;
        assert_eq!(result, expected);
        assert!(result.is_on_curve());
    }

    #[test]
    fn test_scalar_mul_zero_and_one() {
        let g = Affine::generator();
        assert_eq!(g * ScalarField::ZERO, Affine::INFINITY);
        assert_eq!(g * ScalarField::ONE, g);
    }

    #[test]
    fn test_distributivity() {
        let h = Affine::h();
        let a = ScalarField::from_u64(3);
        let b = ScalarField::from_i64(-5);

        // (a + b) * H = a*H + b*H
        let left = h * (a + b);
        let right = h * a + h * b;

        assert_eq!(left, right);
        assert_eq!(left, h.double().negate());
    }

    #[test]
    fn test_mul_u64_matches_scalar_mul() {
        let g = Affine::generator();
        let n = 42u64;
        assert_eq!(g.mul_u64(n), g * ScalarField::from_u64(n));
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = Affine::generator() * ScalarField::from_u64(17);
        let bytes = bincode::serialize(&p).expect("serialize");
        let back: Affine = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(back, p);
    }
}
