//! Confidential notes.
//!
//! A note commits to a value `k` with blinding factor `a` as the pair
//! `gamma = mu_k^a`, `sigma = gamma^k * h^a`, where `mu_k` comes from the
//! trusted setup. `k` and `a` never leave the owner except through the
//! view key; only `gamma` and `sigma` are public.

use bn128::{Affine, RandomField, ScalarField, compress_pair, decompress_pair, multi_scalar_mul};
use rand::CryptoRng;
use serde::{Deserialize, Serialize};

use crate::constants::VIEW_KEY_LENGTH;
use crate::errors::AztecError;
use crate::setup::TrustedSetup;

/// The public half of a note.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment {
    pub gamma: Affine,
    pub sigma: Affine,
}

impl Commitment {
    /// Validate both points coming from an untrusted source.
    pub fn from_points(gamma: Affine, sigma: Affine) -> Result<Self, AztecError> {
        let commitment = Self { gamma, sigma };
        commitment.validate()?;
        Ok(commitment)
    }

    /// Both points must lie on the curve and differ from the identity.
    pub fn validate(&self) -> Result<(), AztecError> {
        for point in [&self.gamma, &self.sigma] {
            if point.is_infinity() {
                return Err(AztecError::PointAtInfinity);
            }
            if !point.is_on_curve() {
                return Err(AztecError::InvalidPoint);
            }
        }
        Ok(())
    }

    /// `gammaX || gammaY || sigmaX || sigmaY`, the bytes an owner signs to
    /// approve spending the note.
    pub fn signing_bytes(&self) -> [u8; 128] {
        let mut out = [0u8; 128];
        out[..64].copy_from_slice(&self.gamma.to_be_bytes());
        out[64..].copy_from_slice(&self.sigma.to_be_bytes());
        out
    }

    pub fn compressed(&self) -> [u8; 64] {
        compress_pair(&self.gamma, &self.sigma)
    }

    pub fn from_compressed(bytes: &[u8; 64]) -> Result<Self, AztecError> {
        let (gamma, sigma) = decompress_pair(bytes)?;
        Self::from_points(gamma, sigma)
    }
}

/// A note together with its private opening.
#[derive(Clone, PartialEq, Eq)]
pub struct Note {
    commitment: Commitment,
    value: u64,
    a: ScalarField,
    metadata: Vec<u8>,
}

impl Note {
    /// New note for `value` with a fresh blinding factor.
    pub fn generate<S, R>(setup: &S, value: u64, rng: &mut R) -> Result<Self, AztecError>
    where
        S: TrustedSetup + ?Sized,
        R: CryptoRng + ?Sized,
    {
        let mut a = ScalarField::random(rng);
        while a.is_zero() {
            a = ScalarField::random(rng);
        }
        Self::from_blinding(setup, value, a)
    }

    /// Rebuild a note from a known blinding factor.
    pub fn from_blinding<S: TrustedSetup + ?Sized>(
        setup: &S,
        value: u64,
        a: ScalarField,
    ) -> Result<Self, AztecError> {
        if a.is_zero() {
            return Err(AztecError::malformed("blinding factor must be non-zero"));
        }
        let mu = setup.lookup(value)?;
        if !mu.is_on_curve() {
            return Err(AztecError::InvalidPoint);
        }

        let gamma = mu * a;
        let k = ScalarField::from_u64(value);
        let sigma = multi_scalar_mul(&[(gamma, k), (Affine::h(), a)]).to_affine();

        Ok(Self {
            commitment: Commitment::from_points(gamma, sigma)?,
            value,
            a,
            metadata: Vec::new(),
        })
    }

    pub fn with_metadata(mut self, metadata: Vec<u8>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    pub fn gamma(&self) -> &Affine {
        &self.commitment.gamma
    }

    pub fn sigma(&self) -> &Affine {
        &self.commitment.sigma
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// The value as a group scalar.
    pub fn k(&self) -> ScalarField {
        ScalarField::from_u64(self.value)
    }

    pub fn a(&self) -> ScalarField {
        self.a
    }

    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    pub fn signing_bytes(&self) -> [u8; 128] {
        self.commitment.signing_bytes()
    }

    pub fn compressed(&self) -> [u8; 64] {
        self.commitment.compressed()
    }

    /// `0x || a (32 bytes) || k (4 bytes)`, both big-endian.
    pub fn view_key(&self) -> Result<String, AztecError> {
        let value = u32::try_from(self.value)
            .map_err(|_| AztecError::malformed("value does not fit a view key"))?;
        let mut bytes = [0u8; VIEW_KEY_LENGTH];
        bytes[..32].copy_from_slice(&self.a.to_be_bytes());
        bytes[32..].copy_from_slice(&value.to_be_bytes());
        Ok(format!("0x{}", hex::encode(bytes)))
    }

    /// Rebuild a note from its view key.
    pub fn from_view_key<S: TrustedSetup + ?Sized>(
        setup: &S,
        view_key: &str,
    ) -> Result<Self, AztecError> {
        let digits = view_key.strip_prefix("0x").unwrap_or(view_key);
        let mut bytes = [0u8; VIEW_KEY_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|err| AztecError::malformed(format!("view key: {err}")))?;

        let (a_bytes, k_bytes) = bytes.split_at(32);
        let mut a_word = [0u8; 32];
        a_word.copy_from_slice(a_bytes);
        let a = ScalarField::from_be_bytes(&a_word)
            .ok_or_else(|| AztecError::malformed("view key blinding factor is not reduced"))?;
        let mut k_word = [0u8; 4];
        k_word.copy_from_slice(k_bytes);

        Self::from_blinding(setup, u64::from(u32::from_be_bytes(k_word)), a)
    }
}

impl core::fmt::Debug for Note {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Note")
            .field("commitment", &self.commitment)
            .finish_non_exhaustive()
    }
}

/// New note for `value` with a random blinding factor.
pub fn generate_commitment<S, R>(setup: &S, value: u64, rng: &mut R) -> Result<Note, AztecError>
where
    S: TrustedSetup + ?Sized,
    R: CryptoRng + ?Sized,
{
    Note::generate(setup, value, rng)
}

/// Note for `value` with the blinding factor given as a hex word.
pub fn construct_commitment<S: TrustedSetup + ?Sized>(
    setup: &S,
    value: u64,
    a_hex: &str,
) -> Result<Note, AztecError> {
    let a = ScalarField::from_be_hex(a_hex)
        .ok_or_else(|| AztecError::malformed(format!("blinding factor {a_hex:?}")))?;
    Note::from_blinding(setup, value, a)
}
