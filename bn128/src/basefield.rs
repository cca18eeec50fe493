//! Base field of alt_bn128. p = 0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47

use crate::field::{FieldParams, Fp};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FqParams;

impl FieldParams for FqParams {
    const NAME: &'static str = "BaseField";

    const MODULUS: [u64; 4] = [
        0x3c208c16d87cfd47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];

    const R: [u64; 4] = [
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ];

    const R2: [u64; 4] = [
        0xf32cfc5b538afa89,
        0xb5e71911d44501fb,
        0x47ab1eff0a417ff6,
        0x06d89f71cab8351f,
    ];

    const INV: u64 = 0x87d20782e4866389;
}

/// Element of the curve's coordinate field, always reduced mod p.
pub type BaseField = Fp<FqParams>;

// (p + 1) / 4, valid because p = 3 mod 4
const SQRT_EXP: [u64; 4] = [
    0x4f082305b61f3f52,
    0x65e05aa45a1c72a3,
    0x6e14116da0605617,
    0x0c19139cb84c680a,
];

impl BaseField {
    /// Square root, or `None` when `self` is not a quadratic residue.
    ///
    /// Which of the two roots is returned is unspecified; callers fix the
    /// parity themselves.
    pub fn sqrt(&self) -> Option<Self> {
        let candidate = self.pow_vartime(SQRT_EXP);
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_of_square() {
        let a = BaseField::from_u64(1234567);
        let root = a.square().sqrt().expect("a square has a root");
        assert!(root == a || root == -a);
    }

    #[test]
    fn test_three_is_not_a_square() {
        // x = 0 therefore never lies on y^2 = x^3 + 3
        assert!(BaseField::from_u64(3).sqrt().is_none());
    }

    #[test]
    fn test_sqrt_zero() {
        assert_eq!(BaseField::ZERO.sqrt(), Some(BaseField::ZERO));
    }
}
