use crate::affine::Affine;
use crate::{BaseField, Group, ScalarField};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Projective point on the elliptic curve.
/// Jacobian coordinates (X:Y:Z) with (x, y) = (X/Z^2, Y/Z^3).
/// The point at infinity is represented by Z = 0.
#[derive(Copy, Clone, Debug)]
pub struct Projective {
    pub x: BaseField,
    pub y: BaseField,
    pub z: BaseField,
}

impl Projective {
    /// The point at infinity (identity element): (0:1:0)
    pub const INFINITY: Self = Projective {
        x: BaseField::ZERO,
        y: BaseField::ONE,
        z: BaseField::ZERO,
    };

    /// Create a new projective point.
    pub fn new(x: BaseField, y: BaseField, z: BaseField) -> Self {
        Projective { x, y, z }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> Affine {
        let Some(z_inv) = self.z.inverse() else {
            return Affine::INFINITY;
        };

        let z_inv2 = z_inv.square();
        let x = self.x * z_inv2;
        let y = self.y * z_inv2 * z_inv;

        Affine::new(x, y)
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        if point.is_infinity() {
            return Self::INFINITY;
        }

        Projective::new(point.x, point.y, BaseField::ONE)
    }

    /// Check if a point is on the curve: Y^2 = X^3 + b*Z^6.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }

        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        self.y.square() == self.x.square() * self.x + Affine::curve_b() * z6
    }

    /// Point doubling, dbl-2009-l (a = 0).
    pub fn double(&self) -> Self {
        if self.is_infinity() {
            return *self;
        }

        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();

        let x3 = f - d.double();
        let eight_c = c.double().double().double();
        let y3 = e * (d - x3) - eight_c;
        let z3 = (self.y * self.z).double();

        Projective::new(x3, y3, z3)
    }

    /// Mixed addition with an affine point, madd-2007-bl.
    pub fn add_affine(&self, other: &Affine) -> Self {
        if other.is_infinity() {
            return *self;
        }
        if self.is_infinity() {
            return Self::from_affine(other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - self.x;
        let r = (s2 - self.y).double();

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::INFINITY
            };
        }

        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let v = self.x * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;

        Projective::new(x3, y3, z3)
    }
}

impl PartialEq for Projective {
    /// Compares the represented points, not the coordinates.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => true,
            (false, false) => {
                let z1z1 = self.z.square();
                let z2z2 = other.z.square();
                self.x * z2z2 == other.x * z1z1
                    && self.y * z2z2 * other.z == other.y * z1z1 * self.z
            }
            _ => false,
        }
    }
}

impl Eq for Projective {}

impl Group for Projective {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }
}

// Point addition, add-2007-bl.
impl Add for Projective {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // Handle infinity cases
        if self.is_infinity() {
            return other;
        }
        if other.is_infinity() {
            return self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - u1;
        let r = (s2 - s1).double();

        if h.is_zero() {
            // Same x: either the same point or its negation
            return if r.is_zero() {
                self.double()
            } else {
                Self::INFINITY
            };
        }

        let i = h.double().square();
        let j = h * i;
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;

        Projective::new(x3, y3, z3)
    }
}

impl AddAssign for Projective {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Projective {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}

impl SubAssign for Projective {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Projective {
    type Output = Self;

    fn neg(self) -> Self {
        Projective::new(self.x, -self.y, self.z)
    }
}

impl Mul<ScalarField> for Projective {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        self.scalar_mul_windowed(&scalar)
    }
}

impl Mul<&ScalarField> for Projective {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        self.scalar_mul_windowed(scalar)
    }
}
