//! Atomic and bilateral swaps over four notes.
//!
//! Notes are `[maker bid, maker ask, taker bid, taker ask]`. The proof shows
//! `k_0 == k_2` and `k_1 == k_3` by sharing blinding factors across the
//! pairs: `bk_2 = bk_0`, `bk_3 = bk_1`. Equal values and equal `bk` give
//! equal `kBar`, so the verifier reuses the maker's `kBar` for the taker
//! notes. A bilateral swap additionally binds the sender address.

use bn128::ScalarField;
use rand::CryptoRng;

use super::{ProofData, Statement, construct, verify};
use crate::address::Address;
use crate::constants::SWAP_NOTE_COUNT;
use crate::errors::AztecError;
use crate::note::Note;
use crate::transcript::Transcript;

/// Index of the maker note paired with taker note `index`.
fn paired(index: usize) -> Option<usize> {
    index.checked_sub(2)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Swap {
    sender: Option<Address>,
}

impl Swap {
    pub fn atomic() -> Self {
        Self { sender: None }
    }

    pub fn bilateral(sender: Address) -> Self {
        Self {
            sender: Some(sender),
        }
    }
}

impl Statement for Swap {
    fn name(&self) -> &'static str {
        match self.sender {
            Some(_) => "bilateral-swap",
            None => "atomic-swap",
        }
    }

    fn check_arity(&self, count: usize) -> Result<(), AztecError> {
        if count != SWAP_NOTE_COUNT {
            return Err(AztecError::malformed(format!(
                "swap takes exactly {SWAP_NOTE_COUNT} notes, got {count}"
            )));
        }
        Ok(())
    }

    fn absorb_public(&self, transcript: &mut Transcript) {
        if let Some(sender) = &self.sender {
            transcript.append_address(sender);
        }
    }

    fn is_scaled(&self, _index: usize, _count: usize) -> bool {
        false
    }

    fn constrain_bk(
        &self,
        index: usize,
        _count: usize,
        previous: &[ScalarField],
        drawn: ScalarField,
    ) -> ScalarField {
        paired(index)
            .and_then(|maker| previous.get(maker))
            .copied()
            .unwrap_or(drawn)
    }

    fn recover_kbar(
        &self,
        index: usize,
        _count: usize,
        recovered: &[ScalarField],
        supplied: ScalarField,
        _challenge: ScalarField,
    ) -> Result<ScalarField, AztecError> {
        match paired(index).and_then(|maker| recovered.get(maker)) {
            Some(&maker) if maker != supplied => Err(AztecError::ChallengeMismatch),
            Some(&maker) => Ok(maker),
            None => Ok(supplied),
        }
    }

    fn check_values(&self, values: &[ScalarField]) -> Result<(), AztecError> {
        match values {
            [bid, ask, taker_bid, taker_ask] if bid == taker_bid && ask == taker_ask => Ok(()),
            _ => Err(AztecError::malformed(
                "maker and taker notes do not match",
            )),
        }
    }
}

pub fn construct_atomic_swap<R: CryptoRng + ?Sized>(
    notes: &[Note],
    rng: &mut R,
) -> Result<ProofData, AztecError> {
    construct(&Swap::atomic(), notes, rng)
}

pub fn verify_atomic_swap(proof: &ProofData) -> Result<(), AztecError> {
    verify(&Swap::atomic(), proof)
}

pub fn construct_bilateral_swap<R: CryptoRng + ?Sized>(
    notes: &[Note],
    sender: Address,
    rng: &mut R,
) -> Result<ProofData, AztecError> {
    construct(&Swap::bilateral(sender), notes, rng)
}

pub fn verify_bilateral_swap(proof: &ProofData, sender: Address) -> Result<(), AztecError> {
    verify(&Swap::bilateral(sender), proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetupConfig;
    use crate::proof::{blinding_factors_and_challenge, recover};
    use crate::setup::SimulatedSetup;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn notes(values: &[u64], rng: &mut StdRng) -> Vec<Note> {
        let setup = SimulatedSetup::new(ScalarField::from_u64(271_828), SetupConfig::default())
            .expect("setup");
        values
            .iter()
            .map(|&value| Note::generate(&setup, value, rng).expect("note"))
            .collect()
    }

    #[test]
    fn test_blinding_factors_are_paired() {
        let mut rng = StdRng::seed_from_u64(40);
        // pairing holds for any four notes, matching or not
        let notes = notes(&[1, 2, 3, 4], &mut rng);
        let (factors, _) =
            blinding_factors_and_challenge(&Swap::atomic(), &notes, &mut rng).expect("factors");
        assert_eq!(factors[0].bk, factors[2].bk);
        assert_eq!(factors[1].bk, factors[3].bk);
        assert_ne!(factors[0].bk, factors[1].bk);
        assert_ne!(factors[0].ba, factors[2].ba);
    }

    #[test]
    fn test_atomic_swap_roundtrip() {
        let mut rng = StdRng::seed_from_u64(41);
        let notes = notes(&[10, 20, 10, 20], &mut rng);
        let proof = construct_atomic_swap(&notes, &mut rng).expect("proof");
        assert_eq!(proof.notes[0].kbar, proof.notes[2].kbar);
        assert_eq!(proof.notes[1].kbar, proof.notes[3].kbar);
        assert_eq!(verify_atomic_swap(&proof), Ok(()));

        let recovered = recover(&Swap::atomic(), &proof).expect("recover");
        assert_eq!(recovered.kbars[0], recovered.kbars[2]);
        assert_eq!(recovered.kbars[1], recovered.kbars[3]);
    }

    #[test]
    fn test_bilateral_binds_sender() {
        let mut rng = StdRng::seed_from_u64(42);
        let notes = notes(&[5, 6, 5, 6], &mut rng);
        let sender = Address([0x44; 20]);
        let proof = construct_bilateral_swap(&notes, sender, &mut rng).expect("proof");
        assert_eq!(verify_bilateral_swap(&proof, sender), Ok(()));
        assert_eq!(
            verify_bilateral_swap(&proof, Address([0x45; 20])),
            Err(AztecError::ChallengeMismatch)
        );
        assert_eq!(verify_atomic_swap(&proof), Err(AztecError::ChallengeMismatch));
    }

    #[test]
    fn test_mismatched_values_rejected() {
        let mut rng = StdRng::seed_from_u64(43);
        let notes = notes(&[10, 20, 11, 20], &mut rng);
        assert!(matches!(
            construct_atomic_swap(&notes, &mut rng),
            Err(AztecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_tampered_taker_kbar() {
        let mut rng = StdRng::seed_from_u64(44);
        let notes = notes(&[10, 20, 10, 20], &mut rng);
        let mut proof = construct_atomic_swap(&notes, &mut rng).expect("proof");
        proof.notes[3].kbar += ScalarField::ONE;
        assert_eq!(verify_atomic_swap(&proof), Err(AztecError::ChallengeMismatch));
    }

    #[test]
    fn test_arity() {
        let mut rng = StdRng::seed_from_u64(45);
        let notes = notes(&[1, 1, 1, 1, 1], &mut rng);
        for count in [1, 2, 3, 5] {
            assert!(matches!(
                construct_atomic_swap(&notes[..count], &mut rng),
                Err(AztecError::MalformedInput(_))
            ));
            assert!(matches!(
                blinding_factors_and_challenge(&Swap::atomic(), &notes[..count], &mut rng),
                Err(AztecError::MalformedInput(_))
            ));
        }
    }
}
