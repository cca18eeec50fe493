//! Sigma-protocol engine shared by every AZTEC statement.
//!
//! Construction draws blinding scalars `(bk_i, ba_i)` per note, commits to
//! `B_i = gamma_i^{bk_i} * h^{ba_i}` (scaled by the rolling-hash scalar
//! `x_i` where the statement asks for it), derives the challenge `c` from
//! the transcript and answers with
//!
//! ```text
//! kBar_i = k_i * c + bk_i
//! aBar_i = a_i * c + ba_i
//! ```
//!
//! Verification recomputes `B_i = (gamma_i^{kBar_i} * h^{aBar_i} * sigma_i^{-c})^{x_i}`
//! from public data, replays the transcript and accepts only if the
//! challenge reproduces.
//!
//! A [`Statement`] supplies the parts that differ between proofs: arity,
//! public inputs, which notes are scaled, and the linear relation imposed
//! on the `bk_i`.

pub mod commit;
pub mod dividend;
pub mod join_split;
pub mod swap;

use bn128::{Affine, RandomField, ScalarField, multi_scalar_mul};
use rand::CryptoRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::errors::AztecError;
use crate::note::{Commitment, Note};
use crate::transcript::Transcript;

/// Per-note prover randomness. Lives for one construction only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlindingFactor {
    pub bk: ScalarField,
    pub ba: ScalarField,
    pub b: Affine,
    /// Rolling-hash scalar, `ONE` for unscaled notes.
    pub x: ScalarField,
}

/// One note of a proof as it appears on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNote {
    pub kbar: ScalarField,
    pub abar: ScalarField,
    pub commitment: Commitment,
}

/// Output of a construction and input of a verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofData {
    pub notes: Vec<ProofNote>,
    pub challenge: ScalarField,
}

/// What the verifier rebuilds from a proof before checking the challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovered {
    /// `kBar` per note after the statement's reconstruction.
    pub kbars: Vec<ScalarField>,
    pub blinding_points: Vec<Affine>,
}

/// The linear relation a proof enforces over its blinding factors.
pub trait Statement {
    fn name(&self) -> &'static str;

    fn check_arity(&self, count: usize) -> Result<(), AztecError>;

    /// Public inputs placed in the challenge transcript ahead of the notes.
    fn absorb_public(&self, transcript: &mut Transcript);

    /// Whether note `index` is scaled by the rolling-hash scalar.
    fn is_scaled(&self, index: usize, count: usize) -> bool;

    /// `bk` for note `index`, given the factors already chosen for the
    /// notes before it and a freshly drawn random scalar.
    fn constrain_bk(
        &self,
        index: usize,
        count: usize,
        previous: &[ScalarField],
        drawn: ScalarField,
    ) -> ScalarField;

    /// The `kBar` written to the wire for note `index`.
    fn response_kbar(&self, _index: usize, _count: usize, computed: ScalarField) -> ScalarField {
        computed
    }

    /// The `kBar` the verifier uses for note `index`.
    fn recover_kbar(
        &self,
        _index: usize,
        _count: usize,
        _recovered: &[ScalarField],
        supplied: ScalarField,
        _challenge: ScalarField,
    ) -> Result<ScalarField, AztecError> {
        Ok(supplied)
    }

    /// Reject openings that cannot satisfy the statement. Called once the
    /// arity has been checked.
    fn check_values(&self, _values: &[ScalarField]) -> Result<(), AztecError> {
        Ok(())
    }

    /// A public total `K` with `sum(k_i) == K`. When present, `g^{sum(bk)}`
    /// follows the blinding points in the challenge transcript.
    fn blinding_total(&self) -> Option<ScalarField> {
        None
    }
}

fn check_commitments<'a, S: Statement + ?Sized>(
    statement: &S,
    commitments: impl ExactSizeIterator<Item = &'a Commitment>,
) -> Result<(), AztecError> {
    let count = commitments.len();
    if count == 0 {
        return Err(AztecError::malformed("proof needs at least one note"));
    }
    statement.check_arity(count)?;
    for commitment in commitments {
        commitment.validate()?;
    }
    Ok(())
}

/// Rolling transcript seeded with every commitment.
fn rolling_hash<'a>(commitments: impl Iterator<Item = &'a Commitment>) -> Transcript {
    let mut rolling = Transcript::new();
    for commitment in commitments {
        rolling.append(&commitment.gamma);
        rolling.append(&commitment.sigma);
    }
    rolling
}

/// Challenge transcript up to and including the commitments.
fn challenge_transcript<'a, S: Statement + ?Sized>(
    statement: &S,
    commitments: impl Iterator<Item = &'a Commitment>,
) -> Transcript {
    let mut transcript = Transcript::new();
    statement.absorb_public(&mut transcript);
    for commitment in commitments {
        transcript.append(&commitment.gamma);
        transcript.append(&commitment.sigma);
    }
    transcript
}

fn next_x<S: Statement + ?Sized>(
    statement: &S,
    rolling: &mut Transcript,
    index: usize,
    count: usize,
) -> Result<ScalarField, AztecError> {
    if !statement.is_scaled(index, count) {
        return Ok(ScalarField::ONE);
    }
    rolling.keccak();
    let x = rolling.to_scalar()?;
    trace!(index, %x, "rolling hash scalar");
    Ok(x)
}

fn blinding_point(terms: &[(Affine, ScalarField)]) -> Result<Affine, AztecError> {
    let point = multi_scalar_mul(terms).to_affine();
    if point.is_infinity() {
        return Err(AztecError::PointAtInfinity);
    }
    Ok(point)
}

fn nonzero_scalar<R: CryptoRng + ?Sized>(rng: &mut R) -> ScalarField {
    loop {
        let scalar = ScalarField::random(rng);
        if !scalar.is_zero() {
            return scalar;
        }
    }
}

/// Draw blinding factors for `notes` and derive the challenge.
pub fn blinding_factors_and_challenge<S, R>(
    statement: &S,
    notes: &[Note],
    rng: &mut R,
) -> Result<(Vec<BlindingFactor>, ScalarField), AztecError>
where
    S: Statement + ?Sized,
    R: CryptoRng + ?Sized,
{
    check_commitments(statement, notes.iter().map(Note::commitment))?;
    let count = notes.len();

    let mut rolling = rolling_hash(notes.iter().map(Note::commitment));
    let mut transcript = challenge_transcript(statement, notes.iter().map(Note::commitment));

    let mut bks = Vec::with_capacity(count);
    let mut factors = Vec::with_capacity(count);
    for (index, note) in notes.iter().enumerate() {
        let bk = statement.constrain_bk(index, count, &bks, nonzero_scalar(rng));
        let ba = nonzero_scalar(rng);
        let x = next_x(statement, &mut rolling, index, count)?;
        let b = blinding_point(&[(*note.gamma(), x * bk), (Affine::h(), x * ba)])?;

        transcript.append(&b);
        bks.push(bk);
        factors.push(BlindingFactor { bk, ba, b, x });
    }

    if statement.blinding_total().is_some() {
        let sum: ScalarField = bks.iter().copied().sum();
        transcript.append(&(Affine::generator() * sum));
    }

    transcript.keccak();
    let challenge = transcript.to_scalar()?;
    trace!(statement = statement.name(), %challenge, "derived challenge");
    Ok((factors, challenge))
}

/// Build a proof for `notes` under `statement`.
pub fn construct<S, R>(statement: &S, notes: &[Note], rng: &mut R) -> Result<ProofData, AztecError>
where
    S: Statement + ?Sized,
    R: CryptoRng + ?Sized,
{
    debug!(statement = statement.name(), notes = notes.len(), "constructing proof");
    let (factors, challenge) = blinding_factors_and_challenge(statement, notes, rng)?;
    let values: Vec<ScalarField> = notes.iter().map(Note::k).collect();
    statement.check_values(&values)?;
    let count = notes.len();

    let proof_notes = notes
        .iter()
        .zip(&factors)
        .enumerate()
        .map(|(index, (note, factor))| ProofNote {
            kbar: statement.response_kbar(index, count, note.k() * challenge + factor.bk),
            abar: note.a() * challenge + factor.ba,
            commitment: *note.commitment(),
        })
        .collect();

    debug!(statement = statement.name(), notes = count, "constructed proof");
    Ok(ProofData {
        notes: proof_notes,
        challenge,
    })
}

/// Rebuild the `kBar` values and blinding points from a proof.
pub fn recover<S: Statement + ?Sized>(
    statement: &S,
    proof: &ProofData,
) -> Result<Recovered, AztecError> {
    check_commitments(statement, proof.notes.iter().map(|note| &note.commitment))?;
    let challenge = proof.challenge;
    if challenge.is_zero() {
        return Err(AztecError::malformed("challenge is zero"));
    }
    let count = proof.notes.len();

    let mut rolling = rolling_hash(proof.notes.iter().map(|note| &note.commitment));
    let mut kbars = Vec::with_capacity(count);
    let mut blinding_points = Vec::with_capacity(count);
    for (index, note) in proof.notes.iter().enumerate() {
        let kbar = statement.recover_kbar(index, count, &kbars, note.kbar, challenge)?;
        let x = next_x(statement, &mut rolling, index, count)?;
        let Commitment { gamma, sigma } = note.commitment;
        let b = blinding_point(&[
            (gamma, x * kbar),
            (Affine::h(), x * note.abar),
            (sigma, -(x * challenge)),
        ])?;

        kbars.push(kbar);
        blinding_points.push(b);
    }

    Ok(Recovered {
        kbars,
        blinding_points,
    })
}

fn check_challenge<S: Statement + ?Sized>(statement: &S, proof: &ProofData) -> Result<(), AztecError> {
    let recovered = recover(statement, proof)?;

    let mut transcript =
        challenge_transcript(statement, proof.notes.iter().map(|note| &note.commitment));
    for b in &recovered.blinding_points {
        transcript.append(b);
    }
    if let Some(total) = statement.blinding_total() {
        let sum: ScalarField = recovered.kbars.iter().copied().sum();
        transcript.append(&(Affine::generator() * (sum - total * proof.challenge)));
    }

    transcript.keccak();
    if transcript.to_scalar()? != proof.challenge {
        return Err(AztecError::ChallengeMismatch);
    }
    Ok(())
}

/// Accept `proof` under `statement` or say why it is rejected.
pub fn verify<S: Statement + ?Sized>(statement: &S, proof: &ProofData) -> Result<(), AztecError> {
    match check_challenge(statement, proof) {
        Ok(()) => {
            debug!(statement = statement.name(), notes = proof.notes.len(), "proof verified");
            Ok(())
        }
        Err(err) => {
            warn!(statement = statement.name(), error = %err, "proof rejected");
            Err(err)
        }
    }
}
