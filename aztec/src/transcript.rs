//! Fiat-Shamir transcript over 32-byte words.
//!
//! The transcript is an append-only list of words. `keccak` collapses the
//! whole list into the single word `keccak256(w_0 || w_1 || ...)`, which
//! is byte-for-byte what the Solidity verifier recomputes. Collapsing a
//! transcript that already holds one word chains the hash, which is how the
//! rolling hash derives one mixing scalar per note.

use bn128::{Affine, ScalarField};
use sha3::{Digest, Keccak256};

use crate::abi::Word;
use crate::address::Address;
use crate::errors::AztecError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    words: Vec<Word>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb `x` then `y`, each as a big-endian word.
    pub fn append(&mut self, point: &Affine) {
        self.words.push(point.x.to_be_bytes());
        self.words.push(point.y.to_be_bytes());
    }

    pub fn append_scalar(&mut self, scalar: &ScalarField) {
        self.words.push(scalar.to_be_bytes());
    }

    pub fn append_u64(&mut self, value: u64) {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        self.words.push(word);
    }

    pub fn append_address(&mut self, address: &Address) {
        self.words.push(address.to_word());
    }

    pub fn append_word(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Replace the accumulated words with their Keccak-256 digest.
    pub fn keccak(&mut self) {
        let mut hasher = Keccak256::new();
        for word in &self.words {
            hasher.update(word);
        }
        let digest: Word = hasher.finalize().into();
        self.words.clear();
        self.words.push(digest);
    }

    /// Reduce the collapsed word modulo the group order.
    pub fn to_scalar(&self) -> Result<ScalarField, AztecError> {
        match self.words.as_slice() {
            [word] => Ok(ScalarField::from_be_bytes_reduced(word)),
            words => Err(AztecError::TranscriptMisuse { words: words.len() }),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
