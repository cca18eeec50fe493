use crate::group::ScalarBits;
use crate::{Affine, Projective, ScalarField};

const WINDOW_BITS: usize = 4;
const TABLE_SIZE: usize = 1 << WINDOW_BITS;

/// Compute `sum(s_i * P_i)` with interleaved 4-bit windows (Straus).
///
/// All terms share one run of doublings, which is what makes the three-term
/// `gamma^kBar * h^aBar * sigma^-c` recomputation cheaper than three
/// separate multiplications.
pub fn multi_scalar_mul(terms: &[(Affine, ScalarField)]) -> Projective {
    let tables: Vec<[Projective; TABLE_SIZE]> = terms
        .iter()
        .map(|(point, _)| window_table(point))
        .collect();
    let limbs: Vec<[u64; 4]> = terms
        .iter()
        .map(|(_, scalar)| scalar.to_u64_limbs())
        .collect();

    let mut result = Projective::INFINITY;

    for limb_idx in (0..4).rev() {
        for shift in (0..64).step_by(WINDOW_BITS).rev() {
            for _ in 0..WINDOW_BITS {
                result = result.double();
            }

            for (table, scalar_limbs) in tables.iter().zip(limbs.iter()) {
                let window = ((scalar_limbs[limb_idx] >> shift) & 0xF) as usize;
                if window != 0 {
                    result += table[window];
                }
            }
        }
    }

    result
}

fn window_table(point: &Affine) -> [Projective; TABLE_SIZE] {
    let mut table = [Projective::INFINITY; TABLE_SIZE];
    for i in 1..TABLE_SIZE {
        table[i] = table[i - 1].add_affine(point);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_separate_multiplications() {
        let g = Affine::generator();
        let h = Affine::h();
        let p = g * ScalarField::from_u64(1234);

        let a = ScalarField::from_u64(7);
        let b = ScalarField::from_i64(-11);
        let c = ScalarField::from_u64(u64::MAX);

        let result = multi_scalar_mul(&[(g, a), (h, b), (p, c)]).to_affine();
        let expected = g * a + h * b + p * c;

        assert_eq!(result, expected);
        assert!(result.is_on_curve());
    }

    #[test]
    fn test_empty_and_zero_terms() {
        assert!(multi_scalar_mul(&[]).is_infinity());
        let g = Affine::generator();
        assert!(multi_scalar_mul(&[(g, ScalarField::ZERO)]).is_infinity());
        assert!(multi_scalar_mul(&[(Affine::INFINITY, ScalarField::ONE)]).is_infinity());
    }

    #[test]
    fn test_cancelling_terms() {
        let h = Affine::h();
        let s = ScalarField::from_u64(99);
        assert!(multi_scalar_mul(&[(h, s), (h, -s)]).is_infinity());
    }
}
