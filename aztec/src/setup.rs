//! Trusted setup collaborator.
//!
//! A note for value `k` is built on the base point `mu_k`, whose discrete
//! log relative to `h` is `1 / (y - k)` for a ceremony secret `y` nobody
//! knows. The core only needs `lookup(k) -> mu_k`.

use core::fmt::{self, Debug, Formatter};

use bn128::{Affine, RandomField, ScalarField, compress, decompress};
use rand::CryptoRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SetupConfig;
use crate::errors::AztecError;

/// Resolves a note value to its setup base point.
///
/// Implementations must be deterministic per value and must fail with
/// `SetupLookupFailure` for values they cannot resolve.
pub trait TrustedSetup {
    fn lookup(&self, value: u64) -> Result<Affine, AztecError>;
}

impl<T: TrustedSetup + ?Sized> TrustedSetup for &T {
    fn lookup(&self, value: u64) -> Result<Affine, AztecError> {
        (**self).lookup(value)
    }
}

/// A setup whose secret is known to the holder.
///
/// Produces points with the same algebraic form as the ceremony output, so
/// proofs built on it exercise every code path. Anyone holding the trapdoor
/// can open commitments to arbitrary values: use it for tests and local
/// development only.
#[derive(Clone)]
pub struct SimulatedSetup {
    trapdoor: ScalarField,
    config: SetupConfig,
}

impl SimulatedSetup {
    pub fn new(trapdoor: ScalarField, config: SetupConfig) -> Result<Self, AztecError> {
        config.validate()?;
        Ok(Self { trapdoor, config })
    }

    pub fn random<R: CryptoRng + ?Sized>(
        rng: &mut R,
        config: SetupConfig,
    ) -> Result<Self, AztecError> {
        Self::new(ScalarField::random(rng), config)
    }

    pub fn config(&self) -> &SetupConfig {
        &self.config
    }
}

impl Debug for SimulatedSetup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedSetup")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TrustedSetup for SimulatedSetup {
    fn lookup(&self, value: u64) -> Result<Affine, AztecError> {
        if !self.config.contains(value) {
            return Err(self.config.lookup_failure(value));
        }
        // y == k only if the trapdoor is a small integer
        let exponent = (self.trapdoor - ScalarField::from_u64(value))
            .inverse()
            .ok_or_else(|| self.config.lookup_failure(value))?;
        Ok(Affine::h() * exponent)
    }
}

/// Precomputed setup points for a contiguous value range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupTable {
    config: SetupConfig,
    points: Vec<Affine>,
}

/// On-disk form: the range followed by one compressed point per value.
#[derive(Serialize, Deserialize)]
struct EncodedTable {
    k_min: u64,
    k_max: u64,
    points: Vec<[u8; 32]>,
}

impl SetupTable {
    /// Resolve every value of `config` through `source`.
    pub fn build<S: TrustedSetup + ?Sized>(
        source: &S,
        config: SetupConfig,
    ) -> Result<Self, AztecError> {
        config.validate()?;
        let points = (config.k_min..=config.k_max)
            .map(|value| source.lookup(value))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(k_min = config.k_min, k_max = config.k_max, "built setup table");
        Ok(Self { config, points })
    }

    pub fn config(&self) -> &SetupConfig {
        &self.config
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AztecError> {
        let encoded = EncodedTable {
            k_min: self.config.k_min,
            k_max: self.config.k_max,
            points: self.points.iter().map(compress).collect(),
        };
        bincode::serialize(&encoded)
            .map_err(|err| AztecError::malformed(format!("setup table encoding: {err}")))
    }

    /// Decode a table, checking that the range and point count agree and
    /// that every point decompresses onto the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AztecError> {
        let encoded: EncodedTable = bincode::deserialize(bytes)
            .map_err(|err| AztecError::malformed(format!("setup table decoding: {err}")))?;
        let config = SetupConfig {
            k_min: encoded.k_min,
            k_max: encoded.k_max,
        };
        config.validate()?;

        let expected = usize::try_from(config.value_count())
            .map_err(|_| AztecError::malformed("setup range too large"))?;
        if encoded.points.len() != expected {
            return Err(AztecError::malformed(format!(
                "setup table holds {} points for {} values",
                encoded.points.len(),
                expected
            )));
        }

        let points = encoded
            .points
            .iter()
            .map(|word| {
                let point = decompress(word)?;
                if point.is_infinity() {
                    return Err(AztecError::PointAtInfinity);
                }
                Ok(point)
            })
            .collect::<Result<Vec<_>, AztecError>>()?;

        Ok(Self { config, points })
    }
}

impl TrustedSetup for SetupTable {
    fn lookup(&self, value: u64) -> Result<Affine, AztecError> {
        if !self.config.contains(value) {
            return Err(self.config.lookup_failure(value));
        }
        usize::try_from(value - self.config.k_min)
            .ok()
            .and_then(|index| self.points.get(index))
            .copied()
            .ok_or_else(|| self.config.lookup_failure(value))
    }
}
