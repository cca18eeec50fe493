//! Join-split: `m` input notes, the rest outputs, and a public balance.
//!
//! Proves `sum(k_in) - sum(k_out) == kPublic` (mod n). The last note's
//! blinding factor is forced so that the same signed sum of `bk` is zero,
//! and its `kBar` slot carries `kPublic` itself; the verifier rebuilds the
//! real `kBar` of the last note from the others. Outputs are scaled by the
//! rolling hash.

use bn128::ScalarField;
use rand::CryptoRng;

use super::{ProofData, Statement, construct, verify};
use crate::address::Address;
use crate::errors::AztecError;
use crate::note::Note;
use crate::transcript::Transcript;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JoinSplit {
    /// Number of input notes; notes at `index >= m` are outputs.
    pub m: usize,
    pub sender: Address,
    /// Net public value, `sum(inputs) - sum(outputs)`.
    pub k_public: ScalarField,
}

impl JoinSplit {
    pub fn new(m: usize, sender: Address, k_public: ScalarField) -> Self {
        Self {
            m,
            sender,
            k_public,
        }
    }

    fn is_input(&self, index: usize) -> bool {
        index < self.m
    }

    /// `sum(+v_in) + sum(-v_out)` over `values`.
    fn signed_sum(&self, values: &[ScalarField]) -> ScalarField {
        values
            .iter()
            .enumerate()
            .map(|(index, &v)| if self.is_input(index) { v } else { -v })
            .sum()
    }
}

impl Statement for JoinSplit {
    fn name(&self) -> &'static str {
        "join-split"
    }

    fn check_arity(&self, count: usize) -> Result<(), AztecError> {
        if self.m > count {
            return Err(AztecError::malformed(format!(
                "m = {} exceeds the {count} notes supplied",
                self.m
            )));
        }
        Ok(())
    }

    fn absorb_public(&self, transcript: &mut Transcript) {
        transcript.append_address(&self.sender);
        transcript.append_scalar(&self.k_public);
        transcript.append_u64(self.m as u64);
    }

    fn is_scaled(&self, index: usize, _count: usize) -> bool {
        !self.is_input(index)
    }

    fn constrain_bk(
        &self,
        index: usize,
        count: usize,
        previous: &[ScalarField],
        drawn: ScalarField,
    ) -> ScalarField {
        if index + 1 != count {
            return drawn;
        }
        let sum = self.signed_sum(previous);
        if self.is_input(index) { -sum } else { sum }
    }

    fn response_kbar(&self, index: usize, count: usize, computed: ScalarField) -> ScalarField {
        if index + 1 == count {
            self.k_public
        } else {
            computed
        }
    }

    fn recover_kbar(
        &self,
        index: usize,
        count: usize,
        recovered: &[ScalarField],
        supplied: ScalarField,
        challenge: ScalarField,
    ) -> Result<ScalarField, AztecError> {
        if index + 1 != count {
            return Ok(supplied);
        }
        if supplied != self.k_public {
            return Err(AztecError::malformed(
                "last note of a join-split must carry kPublic",
            ));
        }
        let sum = self.signed_sum(recovered);
        let public = self.k_public * challenge;
        Ok(if self.is_input(index) {
            public - sum
        } else {
            sum - public
        })
    }

    fn check_values(&self, values: &[ScalarField]) -> Result<(), AztecError> {
        if self.signed_sum(values) != self.k_public {
            return Err(AztecError::malformed(
                "inputs minus outputs does not equal kPublic",
            ));
        }
        Ok(())
    }
}

/// Prove that the first `m` notes minus the rest equal `k_public`.
pub fn construct_join_split<R: CryptoRng + ?Sized>(
    notes: &[Note],
    m: usize,
    sender: Address,
    k_public: ScalarField,
    rng: &mut R,
) -> Result<ProofData, AztecError> {
    construct(&JoinSplit::new(m, sender, k_public), notes, rng)
}

pub fn verify_join_split(
    proof: &ProofData,
    m: usize,
    sender: Address,
    k_public: ScalarField,
) -> Result<(), AztecError> {
    verify(&JoinSplit::new(m, sender, k_public), proof)
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
        let setup = SimulatedSetup::new(ScalarField::from_u64(424_242), SetupConfig::default())
            .expect("setup");
        values
            .iter()
            .map(|&value| Note::generate(&setup, value, rng).expect("note"))
            .collect()
    }

    fn sender() -> Address {
        Address([0x11; 20])
    }

    #[test]
    fn test_blinding_factors_balance() {
        let mut rng = StdRng::seed_from_u64(20);
        let notes = notes(&[10, 20, 25, 5], &mut rng);
        let statement = JoinSplit::new(2, sender(), ScalarField::ZERO);
        let (factors, _) =
            blinding_factors_and_challenge(&statement, &notes, &mut rng).expect("factors");
        let bks: Vec<_> = factors.iter().map(|f| f.bk).collect();
        assert_eq!(statement.signed_sum(&bks), ScalarField::ZERO);
        assert_eq!(factors[0].x, ScalarField::ONE);
        assert_eq!(factors[1].x, ScalarField::ONE);
        assert_ne!(factors[2].x, ScalarField::ONE);
        assert_ne!(factors[2].x, factors[3].x);
    }

    #[test]
    fn test_last_slot_carries_k_public() {
        let mut rng = StdRng::seed_from_u64(21);
        let notes = notes(&[50, 20], &mut rng);
        let k_public = ScalarField::from_u64(30);
        let proof = construct_join_split(&notes, 1, sender(), k_public, &mut rng).expect("proof");
        assert_eq!(proof.notes[1].kbar, k_public);
        assert_eq!(verify_join_split(&proof, 1, sender(), k_public), Ok(()));
    }

    #[test]
    fn test_recovered_kbar_matches_response_formula() {
        let mut rng = StdRng::seed_from_u64(22);
        let notes = notes(&[7, 3, 4], &mut rng);
        let statement = JoinSplit::new(1, sender(), ScalarField::ZERO);
        let (factors, challenge) =
            blinding_factors_and_challenge(&statement, &notes, &mut rng.clone()).expect("factors");
        let proof = construct(&statement, &notes, &mut rng).expect("proof");

        let recovered = recover(&statement, &proof).expect("recover");
        let expected = notes[2].k() * challenge + factors[2].bk;
        assert_eq!(recovered.kbars[2], expected);
    }

    #[test]
    fn test_deposit_with_negative_k_public() {
        let mut rng = StdRng::seed_from_u64(23);
        let notes = notes(&[40, 100], &mut rng);
        let k_public = ScalarField::from_i64(-60);
        let proof = construct_join_split(&notes, 1, sender(), k_public, &mut rng).expect("proof");
        assert_eq!(verify_join_split(&proof, 1, sender(), k_public), Ok(()));
    }

    #[test]
    fn test_all_inputs_redeem() {
        let mut rng = StdRng::seed_from_u64(24);
        let notes = notes(&[3, 4], &mut rng);
        let k_public = ScalarField::from_u64(7);
        let proof = construct_join_split(&notes, 2, sender(), k_public, &mut rng).expect("proof");
        assert_eq!(verify_join_split(&proof, 2, sender(), k_public), Ok(()));
    }

    #[test]
    fn test_unbalanced_notes_rejected() {
        let mut rng = StdRng::seed_from_u64(25);
        let notes = notes(&[10, 11], &mut rng);
        let result = construct_join_split(&notes, 1, sender(), ScalarField::ZERO, &mut rng);
        assert!(matches!(result, Err(AztecError::MalformedInput(_))));
    }

    #[test]
    fn test_public_inputs_are_bound() {
        let mut rng = StdRng::seed_from_u64(26);
        let notes = notes(&[9, 9], &mut rng);
        let proof =
            construct_join_split(&notes, 1, sender(), ScalarField::ZERO, &mut rng).expect("proof");

        let other = Address([0x22; 20]);
        assert_eq!(
            verify_join_split(&proof, 1, other, ScalarField::ZERO),
            Err(AztecError::ChallengeMismatch)
        );
        assert!(verify_join_split(&proof, 2, sender(), ScalarField::ZERO).is_err());
        assert!(matches!(
            verify_join_split(&proof, 1, sender(), ScalarField::ONE),
            Err(AztecError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_m_larger_than_notes() {
        let mut rng = StdRng::seed_from_u64(27);
        let notes = notes(&[1], &mut rng);
        let result = construct_join_split(&notes, 2, sender(), ScalarField::ONE, &mut rng);
        assert!(matches!(result, Err(AztecError::MalformedInput(_))));
    }
}
