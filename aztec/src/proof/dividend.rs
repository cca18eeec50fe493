//! Dividend computation over three notes `[z, r, residual]`.
//!
//! Proves `za * k_z == zb * k_r + k_residual` for public ratio scalars
//! `za`, `zb`: note `r` is the `za / zb` share of note `z`, rounded down,
//! and the residual absorbs the remainder. The residual's blinding factor
//! is `za * bk_z - zb * bk_r`, so the verifier can rebuild its `kBar` from
//! the other two. Notes `r` and residual are scaled by the rolling hash.

use bn128::ScalarField;
use rand::CryptoRng;

use super::{ProofData, Statement, construct, verify};
use crate::address::Address;
use crate::constants::DIVIDEND_NOTE_COUNT;
use crate::errors::AztecError;
use crate::note::Note;
use crate::transcript::Transcript;

const RESIDUAL: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dividend {
    pub sender: Address,
    pub za: ScalarField,
    pub zb: ScalarField,
}

impl Dividend {
    pub fn new(sender: Address, za: u64, zb: u64) -> Self {
        Self {
            sender,
            za: ScalarField::from_u64(za),
            zb: ScalarField::from_u64(zb),
        }
    }

    fn combine(&self, z: ScalarField, r: ScalarField) -> ScalarField {
        self.za * z - self.zb * r
    }
}

impl Statement for Dividend {
    fn name(&self) -> &'static str {
        "dividend"
    }

    fn check_arity(&self, count: usize) -> Result<(), AztecError> {
        if count != DIVIDEND_NOTE_COUNT {
            return Err(AztecError::malformed(format!(
                "dividend proof takes {DIVIDEND_NOTE_COUNT} notes, got {count}"
            )));
        }
        Ok(())
    }

    fn absorb_public(&self, transcript: &mut Transcript) {
        transcript.append_address(&self.sender);
        transcript.append_scalar(&self.za);
        transcript.append_scalar(&self.zb);
    }

    fn is_scaled(&self, index: usize, _count: usize) -> bool {
        index > 0
    }

    fn constrain_bk(
        &self,
        index: usize,
        _count: usize,
        previous: &[ScalarField],
        drawn: ScalarField,
    ) -> ScalarField {
        match (index, previous) {
            (RESIDUAL, [z, r]) => self.combine(*z, *r),
            _ => drawn,
        }
    }

    fn recover_kbar(
        &self,
        index: usize,
        _count: usize,
        recovered: &[ScalarField],
        supplied: ScalarField,
        _challenge: ScalarField,
    ) -> Result<ScalarField, AztecError> {
        match (index, recovered) {
            (RESIDUAL, [z, r]) => {
                let expected = self.combine(*z, *r);
                if supplied != expected {
                    return Err(AztecError::ChallengeMismatch);
                }
                Ok(expected)
            }
            _ => Ok(supplied),
        }
    }

    fn check_values(&self, values: &[ScalarField]) -> Result<(), AztecError> {
        match values {
            [z, r, residual] if self.combine(*z, *r) == *residual => Ok(()),
            _ => Err(AztecError::malformed(
                "za * z does not equal zb * r + residual",
            )),
        }
    }
}

/// Prove that `notes = [z, r, residual]` split `z` in the ratio `za : zb`.
pub fn construct_payment<R: CryptoRng + ?Sized>(
    notes: &[Note],
    za: u64,
    zb: u64,
    sender: Address,
    rng: &mut R,
) -> Result<ProofData, AztecError> {
    construct(&Dividend::new(sender, za, zb), notes, rng)
}

pub fn verify_payment(
    proof: &ProofData,
    za: u64,
    zb: u64,
    sender: Address,
) -> Result<(), AztecError> {
    verify(&Dividend::new(sender, za, zb), proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetupConfig;
    use crate::proof::{blinding_factors_and_challenge, recover};
    use crate::setup::SimulatedSetup;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn notes(values: [u64; 3], rng: &mut StdRng) -> Vec<Note> {
        let setup = SimulatedSetup::new(ScalarField::from_u64(31_337), SetupConfig::default())
            .expect("setup");
        values
            .iter()
            .map(|&value| Note::generate(&setup, value, rng).expect("note"))
            .collect()
    }

    fn sender() -> Address {
        Address([0x33; 20])
    }

    #[test]
    fn test_residual_blinding_relation() {
        let mut rng = StdRng::seed_from_u64(30);
        let notes = notes([1000, 50, 0], &mut rng);
        let statement = Dividend::new(sender(), 5, 100);
        let (factors, _) =
            blinding_factors_and_challenge(&statement, &notes, &mut rng).expect("factors");
        assert_eq!(
            factors[2].bk,
            statement.za * factors[0].bk - statement.zb * factors[1].bk
        );
        assert_eq!(factors[0].x, ScalarField::ONE);
        assert_ne!(factors[1].x, ScalarField::ONE);
        assert_ne!(factors[2].x, ScalarField::ONE);
    }

    #[test]
    fn test_payment_with_remainder() {
        let mut rng = StdRng::seed_from_u64(31);
        // 3 * 1001 = 100 * 30 + 3
        let notes = notes([1001, 30, 3], &mut rng);
        let proof = construct_payment(&notes, 3, 100, sender(), &mut rng).expect("proof");
        assert_eq!(verify_payment(&proof, 3, 100, sender()), Ok(()));

        let recovered = recover(&Dividend::new(sender(), 3, 100), &proof).expect("recover");
        assert_eq!(recovered.kbars[2], proof.notes[2].kbar);
    }

    #[test]
    fn test_tampered_residual_kbar() {
        let mut rng = StdRng::seed_from_u64(32);
        let notes = notes([1000, 50, 0], &mut rng);
        let mut proof = construct_payment(&notes, 5, 100, sender(), &mut rng).expect("proof");
        proof.notes[2].kbar += ScalarField::ONE;
        assert_eq!(
            verify_payment(&proof, 5, 100, sender()),
            Err(AztecError::ChallengeMismatch)
        );
    }

    #[test]
    fn test_wrong_ratio_rejected_at_construction() {
        let mut rng = StdRng::seed_from_u64(33);
        let notes = notes([1000, 51, 0], &mut rng);
        let result = construct_payment(&notes, 5, 100, sender(), &mut rng);
        assert!(matches!(result, Err(AztecError::MalformedInput(_))));
    }

    #[test]
    fn test_arity() {
        let mut rng = StdRng::seed_from_u64(34);
        let notes = notes([1000, 50, 0], &mut rng);
        let result = construct_payment(&notes[..2], 5, 100, sender(), &mut rng);
        assert!(matches!(result, Err(AztecError::MalformedInput(_))));
    }
}
