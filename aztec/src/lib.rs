//! AZTEC confidential-transaction proofs over the BN254 (alt_bn128) curve.
//!
//! This library implements the AZTEC protocol using:
//! - Notes committing to a value `k` as `gamma = mu_k^a`, `sigma = gamma^k * h^a`
//! - Keccak-256 for the Fiat-Shamir challenge, bit-compatible with the
//!   Solidity verifiers
//! - A trusted setup supplying the value-indexed base points `mu_k`
//!
//! # Overview
//!
//! Every proof is a Sigma protocol over a list of notes. The statements
//! differ only in the linear relation imposed on the blinding factors:
//! - Join-split: inputs minus outputs equal a public value
//! - Dividend: one note is a fixed ratio of another, plus a residual
//! - Atomic and bilateral swap: two pairs of notes hold equal values
//! - Commit and reveal: a set of notes sums to a public total
//!
//! Verification returns `Ok(())` or the reason for rejection.
//!
//! # Example
//!
//! ```
//! use aztec::{Address, SetupConfig, SimulatedSetup, construct_join_split, generate_commitment, verify_join_split};
//! use bn128::ScalarField;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let setup = SimulatedSetup::random(&mut rng, SetupConfig::default()).expect("setup");
//!
//! // Spend 10 + 20, create 25 + 5
//! let notes = [10, 20, 25, 5]
//!     .into_iter()
//!     .map(|value| generate_commitment(&setup, value, &mut rng))
//!     .collect::<Result<Vec<_>, _>>()
//!     .expect("notes");
//!
//! let sender = Address([0x42; 20]);
//! let proof = construct_join_split(&notes, 2, sender, ScalarField::ZERO, &mut rng).expect("prove");
//! verify_join_split(&proof, 2, sender, ScalarField::ZERO).expect("verify");
//! ```
//!
//! # Security Considerations
//!
//! - Blinding factors are drawn fresh for every proof; never reuse an RNG state
//! - `SimulatedSetup` knows its trapdoor and must not back real notes
//! - Every point taken from proof data is checked against the curve equation
//!   before it enters a group operation

mod abi;
mod address;
mod config;
mod constants;
mod errors;
mod note;
mod proof;
mod setup;
mod transcript;


pub use abi::{
    Word, decode_hex, decode_metadata, decode_proof_data, encode_bilateral_swap, encode_hex,
    encode_metadata, encode_proof_data,
};
pub use address::Address;
pub use config::SetupConfig;
pub use constants::{
    ADDRESS_LENGTH, COMPRESSED_POINT_LENGTH, DIVIDEND_NOTE_COUNT, K_MAX, K_MIN, NOTE_WORDS,
    SWAP_NOTE_COUNT, VIEW_KEY_LENGTH, WORD_SIZE,
};
pub use errors::AztecError;
pub use note::{Commitment, Note, construct_commitment, generate_commitment};
pub use proof::commit::{PublicTotal, construct_commit, construct_reveal, verify_commit, verify_reveal};
pub use proof::dividend::{Dividend, construct_payment, verify_payment};
pub use proof::join_split::{JoinSplit, construct_join_split, verify_join_split};
pub use proof::swap::{
    Swap, construct_atomic_swap, construct_bilateral_swap, verify_atomic_swap,
    verify_bilateral_swap,
};
pub use proof::{
    BlindingFactor, ProofData, ProofNote, Recovered, Statement, blinding_factors_and_challenge,
    construct, recover, verify,
};
pub use setup::{SetupTable, SimulatedSetup, TrustedSetup};
pub use transcript::Transcript;
