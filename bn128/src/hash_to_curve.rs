//! Deterministic seed-to-point map used to fix the second generator.

use sha3::{Digest, Keccak256};

use crate::{Affine, BaseField};

/// Seed from which `h` is derived.
pub const H_SEED: &[u8] = b"AZTEC_BN128_H";

/// Try-and-increment: start from `keccak256(seed) mod p` and step `x` by one
/// until `x^3 + 3` is a square, then take the even root.
///
/// Roughly half of all x-coordinates succeed, so the loop ends after a
/// handful of steps for any seed.
pub fn hash_to_curve(seed: &[u8]) -> Affine {
    let digest: [u8; 32] = Keccak256::digest(seed).into();
    let mut x = BaseField::from_be_bytes_reduced(&digest);

    loop {
        let rhs = x.square() * x + Affine::curve_b();
        if let Some(root) = rhs.sqrt() {
            let y = if root.is_odd() { -root } else { root };
            return Affine::new(x, y);
        }
        x += BaseField::ONE;
    }
}
