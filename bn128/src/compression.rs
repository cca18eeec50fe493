//! Point compression in the wire format used by AZTEC note registries.
//!
//! A compressed point is one 32-byte big-endian word holding `x`, with bit
//! 255 set when `y` is odd. `p < 2^254`, so the flag never collides with
//! the coordinate. Since 3 is not a square mod p no curve point has
//! `x = 0`, which frees the all-zero word to stand for infinity.

use crate::errors::CurveError;
use crate::{Affine, BaseField};

/// Bit 255 of the big-endian word.
pub const Y_PARITY_FLAG: u8 = 0x80;

/// Compress a single point.
pub fn compress(point: &Affine) -> [u8; 32] {
    if point.is_infinity() {
        return [0u8; 32];
    }
    let mut word = point.x.to_be_bytes();
    if point.y.is_odd() {
        word[0] |= Y_PARITY_FLAG;
    }
    word
}

/// Recover a point from its compressed word.
pub fn decompress(word: &[u8; 32]) -> Result<Affine, CurveError> {
    if word.iter().all(|&b| b == 0) {
        return Ok(Affine::INFINITY);
    }

    let odd = word[0] & Y_PARITY_FLAG != 0;
    let mut x_bytes = *word;
    x_bytes[0] &= !Y_PARITY_FLAG;

    let x = BaseField::from_be_bytes(&x_bytes).ok_or(CurveError::NonCanonical)?;
    let rhs = x.square() * x + Affine::curve_b();
    let root = rhs.sqrt().ok_or(CurveError::NotQuadraticResidue)?;
    let y = if root.is_odd() == odd { root } else { -root };

    Ok(Affine::new(x, y))
}

/// Compress a `(gamma, sigma)` note pair into two consecutive words.
pub fn compress_pair(first: &Affine, second: &Affine) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&compress(first));
    out[32..].copy_from_slice(&compress(second));
    out
}

/// Inverse of [`compress_pair`].
pub fn decompress_pair(bytes: &[u8; 64]) -> Result<(Affine, Affine), CurveError> {
    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    first.copy_from_slice(&bytes[..32]);
    second.copy_from_slice(&bytes[32..]);
    Ok((decompress(&first)?, decompress(&second)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScalarField;
    use proptest::prelude::*;

    #[test]
    fn test_generator_roundtrip() {
        let g = Affine::generator();
        let word = compress(&g);
        assert_eq!(word[31], 1);
        assert_eq!(word[0] & Y_PARITY_FLAG, 0, "y = 2 is even");
        assert_eq!(decompress(&word), Ok(g));
    }

    #[test]
    fn test_negated_point_sets_flag() {
        let g = Affine::generator().negate();
        let word = compress(&g);
        assert_ne!(word[0] & Y_PARITY_FLAG, 0);
        assert_eq!(decompress(&word), Ok(g));
    }

    #[test]
    fn test_infinity_roundtrip() {
        assert_eq!(compress(&Affine::INFINITY), [0u8; 32]);
        assert_eq!(decompress(&[0u8; 32]), Ok(Affine::INFINITY));
    }

    #[test]
    fn test_rejects_non_residue() {
        // a flagged zero word decodes as x = 0, and 3 has no square root
        let mut word = [0u8; 32];
        word[0] = Y_PARITY_FLAG;
        assert_eq!(decompress(&word), Err(CurveError::NotQuadraticResidue));
    }

    #[test]
    fn test_rejects_non_canonical_x() {
        let mut word = [0x7f; 32];
        word[0] = 0x7f;
        assert_eq!(decompress(&word), Err(CurveError::NonCanonical));
    }

    #[test]
    fn test_pair_with_shared_y() {
        // P and -P share x; P and P share both coordinates.
        let p = Affine::h() * ScalarField::from_u64(11);
        let bytes = compress_pair(&p, &p);
        assert_eq!(decompress_pair(&bytes), Ok((p, p)));

        let bytes = compress_pair(&p, &p.negate());
        assert_eq!(decompress_pair(&bytes), Ok((p, p.negate())));
    }

    proptest! {
        #[test]
        fn pair_roundtrip(a in 1u64.., b in 1u64..) {
            let gamma = Affine::generator() * ScalarField::from_u64(a);
            let sigma = Affine::h() * ScalarField::from_u64(b);
            let bytes = compress_pair(&gamma, &sigma);
            prop_assert_eq!(decompress_pair(&bytes), Ok((gamma, sigma)));
        }
    }
}
