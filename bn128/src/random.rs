use rand::distr::{Distribution, StandardUniform};
use rand::CryptoRng;

use crate::field::{FieldParams, Fp};
use crate::ScalarField;

/// Helper trait for sampling uniform field elements.
///
/// Only cryptographically secure generators are accepted: these values end
/// up as commitment randomness and Sigma-protocol nonces.
pub trait RandomField: Sized {
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self;
}

impl<P: FieldParams> RandomField for Fp<P> {
    #[inline]
    fn random<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

/// Uniform scalar in `[0, n)` drawn from the thread-local CSPRNG.
///
/// Every call draws fresh randomness.
pub fn random_scalar() -> ScalarField {
    ScalarField::random(&mut rand::rng())
}
