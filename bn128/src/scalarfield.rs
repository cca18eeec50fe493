//! Scalar field (group order) of alt_bn128. n = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001

use crate::field::{FieldParams, Fp};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrParams;

impl FieldParams for FrParams {
    const NAME: &'static str = "ScalarField";

    const MODULUS: [u64; 4] = [
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];

    const R: [u64; 4] = [
        0xac96341c4ffffffb,
        0x36fc76959f60cd29,
        0x666ea36f7879462e,
        0x0e0a77c19a07df2f,
    ];

    const R2: [u64; 4] = [
        0x1bb8e645ae216da7,
        0x53fe3ab1e35c59e3,
        0x8c49833d53bb8085,
        0x0216d0b17f4e44a5,
    ];

    const INV: u64 = 0xc2e1f593efffffff;
}

/// Group scalar, always reduced mod n.
pub type ScalarField = Fp<FrParams>;
