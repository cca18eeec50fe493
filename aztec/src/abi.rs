//! Word-level encoding consumed by the on-chain verifiers.
//!
//! Every scalar and coordinate is a 32-byte big-endian word. Hex forms are
//! `0x` followed by 64 lowercase digits. Decoding is strict: values must be
//! reduced (scalars below `n`, coordinates below `p`) and every point must
//! satisfy the curve equation before it is handed to the proof engines.

use bn128::{Affine, BaseField, ScalarField};

use crate::constants::{NOTE_WORDS, SWAP_NOTE_COUNT, WORD_SIZE};
use crate::errors::AztecError;
use crate::note::{Commitment, Note};
use crate::proof::{ProofData, ProofNote};

pub type Word = [u8; WORD_SIZE];

pub fn encode_hex(word: &Word) -> String {
    format!("0x{}", hex::encode(word))
}

/// Parse exactly 64 hex digits, with or without the `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Word, AztecError> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    let mut word = [0u8; WORD_SIZE];
    hex::decode_to_slice(digits, &mut word)
        .map_err(|err| AztecError::malformed(format!("word {input:?}: {err}")))?;
    Ok(word)
}

fn usize_word(value: usize) -> Word {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn scalar_from_word(word: &Word, what: &str) -> Result<ScalarField, AztecError> {
    ScalarField::from_be_bytes(word)
        .ok_or_else(|| AztecError::malformed(format!("{what} is not below the group order")))
}

fn coordinate_from_word(word: &Word, what: &str) -> Result<BaseField, AztecError> {
    BaseField::from_be_bytes(word)
        .ok_or_else(|| AztecError::malformed(format!("{what} is not below the field modulus")))
}

fn point_from_words(x: &Word, y: &Word, what: &str) -> Result<Affine, AztecError> {
    let x = coordinate_from_word(x, what)?;
    let y = coordinate_from_word(y, what)?;
    Ok(Affine::from_coordinates(x, y)?)
}

impl ProofNote {
    /// `[kBar, aBar, gammaX, gammaY, sigmaX, sigmaY]`.
    pub fn to_words(&self) -> [Word; NOTE_WORDS] {
        let Commitment { gamma, sigma } = &self.commitment;
        [
            self.kbar.to_be_bytes(),
            self.abar.to_be_bytes(),
            gamma.x.to_be_bytes(),
            gamma.y.to_be_bytes(),
            sigma.x.to_be_bytes(),
            sigma.y.to_be_bytes(),
        ]
    }

    pub fn from_words(words: &[Word; NOTE_WORDS]) -> Result<Self, AztecError> {
        let [kbar, abar, gamma_x, gamma_y, sigma_x, sigma_y] = words;
        let kbar = scalar_from_word(kbar, "kBar")?;
        let abar = scalar_from_word(abar, "aBar")?;
        let gamma = point_from_words(gamma_x, gamma_y, "gamma")?;
        let sigma = point_from_words(sigma_x, sigma_y, "sigma")?;
        Ok(Self {
            kbar,
            abar,
            commitment: Commitment::from_points(gamma, sigma)?,
        })
    }
}

impl ProofData {
    pub fn to_hex_tuples(&self) -> Vec<[String; NOTE_WORDS]> {
        self.notes
            .iter()
            .map(|note| note.to_words().map(|word| encode_hex(&word)))
            .collect()
    }

    pub fn challenge_hex(&self) -> String {
        encode_hex(&self.challenge.to_be_bytes())
    }

    /// Parse proof data from its hex form.
    pub fn from_hex_tuples<S: AsRef<str>>(
        tuples: &[[S; NOTE_WORDS]],
        challenge: &str,
    ) -> Result<Self, AztecError> {
        let notes = tuples
            .iter()
            .map(|tuple| {
                let mut words = [[0u8; WORD_SIZE]; NOTE_WORDS];
                for (word, text) in words.iter_mut().zip(tuple) {
                    *word = decode_hex(text.as_ref())?;
                }
                ProofNote::from_words(&words)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let challenge = scalar_from_word(&decode_hex(challenge)?, "challenge")?;
        Ok(Self { notes, challenge })
    }
}

/// `word(count) || 6 words per note`.
pub fn encode_proof_data(proof: &ProofData) -> Vec<u8> {
    let mut out = Vec::with_capacity(WORD_SIZE * (1 + NOTE_WORDS * proof.notes.len()));
    out.extend_from_slice(&usize_word(proof.notes.len()));
    for note in &proof.notes {
        for word in note.to_words() {
            out.extend_from_slice(&word);
        }
    }
    out
}

/// Inverse of [`encode_proof_data`]. The challenge travels separately.
pub fn decode_proof_data(bytes: &[u8], challenge: ScalarField) -> Result<ProofData, AztecError> {
    let mut reader = WordReader::new(bytes);
    let count = reader.read_usize()?;
    let expected = count
        .checked_mul(NOTE_WORDS * WORD_SIZE)
        .and_then(|len| len.checked_add(WORD_SIZE))
        .ok_or_else(|| AztecError::malformed("note count overflows"))?;
    if bytes.len() != expected {
        return Err(AztecError::malformed(format!(
            "proof data holds {} bytes, {count} notes need {expected}",
            bytes.len()
        )));
    }

    let mut notes = Vec::with_capacity(count);
    for _ in 0..count {
        let mut words = [[0u8; WORD_SIZE]; NOTE_WORDS];
        for word in words.iter_mut() {
            *word = reader.read_word()?;
        }
        notes.push(ProofNote::from_words(&words)?);
    }
    Ok(ProofData { notes, challenge })
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Ethereum ABI `bytes[]`, prefixed with the length of everything after
/// the prefix.
///
/// Layout: `word(L) || word(count) || offsets || entries`, where each entry
/// is `word(len) || data` right-padded to a word boundary and each offset
/// is measured from the start of the offset block.
pub fn encode_metadata(entries: &[&[u8]]) -> Vec<u8> {
    let mut offsets = Vec::with_capacity(entries.len());
    let mut offset = WORD_SIZE * entries.len();
    for entry in entries {
        offsets.push(offset);
        offset += WORD_SIZE + padded_len(entry.len());
    }

    let mut body = Vec::with_capacity(WORD_SIZE + offset);
    body.extend_from_slice(&usize_word(entries.len()));
    for offset in offsets {
        body.extend_from_slice(&usize_word(offset));
    }
    for entry in entries {
        body.extend_from_slice(&usize_word(entry.len()));
        body.extend_from_slice(entry);
        body.resize(body.len() + padded_len(entry.len()) - entry.len(), 0);
    }

    let mut out = Vec::with_capacity(WORD_SIZE + body.len());
    out.extend_from_slice(&usize_word(body.len()));
    out.extend_from_slice(&body);
    out
}

/// Inverse of [`encode_metadata`].
pub fn decode_metadata(bytes: &[u8]) -> Result<Vec<Vec<u8>>, AztecError> {
    let mut reader = WordReader::new(bytes);
    let total = reader.read_usize()?;
    let body = &bytes[WORD_SIZE..];
    if body.len() != total {
        return Err(AztecError::malformed(format!(
            "metadata declares {total} bytes, found {}",
            body.len()
        )));
    }

    let mut reader = WordReader::new(body);
    let count = reader.read_usize()?;
    let table = &body[WORD_SIZE..];
    let offsets = (0..count)
        .map(|_| reader.read_usize())
        .collect::<Result<Vec<_>, _>>()?;

    offsets
        .into_iter()
        .map(|offset| {
            let mut entry = WordReader::at(table, offset)?;
            let len = entry.read_usize()?;
            entry.read_bytes(len)
        })
        .collect()
}

/// Calldata for the bilateral swap verifier: the proof blob, the challenge
/// word, then the metadata of the two taker notes.
pub fn encode_bilateral_swap(proof: &ProofData, notes: &[Note]) -> Result<Vec<u8>, AztecError> {
    if proof.notes.len() != SWAP_NOTE_COUNT || notes.len() != SWAP_NOTE_COUNT {
        return Err(AztecError::malformed(format!(
            "bilateral swap takes {SWAP_NOTE_COUNT} notes, got {} proof notes and {} notes",
            proof.notes.len(),
            notes.len()
        )));
    }
    for (proof_note, note) in proof.notes.iter().zip(notes) {
        if proof_note.commitment != *note.commitment() {
            return Err(AztecError::malformed("notes do not match the proof"));
        }
    }

    let metadata: Vec<&[u8]> = notes[2..].iter().map(Note::metadata).collect();
    let mut out = encode_proof_data(proof);
    out.extend_from_slice(&proof.challenge.to_be_bytes());
    out.extend_from_slice(&encode_metadata(&metadata));
    Ok(out)
}

struct WordReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> WordReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn at(bytes: &'a [u8], position: usize) -> Result<Self, AztecError> {
        if position > bytes.len() {
            return Err(AztecError::malformed(format!("offset {position} out of bounds")));
        }
        Ok(Self { bytes, position })
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, AztecError> {
        let end = self
            .position
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| AztecError::malformed("unexpected end of data"))?;
        let out = self.bytes[self.position..end].to_vec();
        self.position = end;
        Ok(out)
    }

    fn read_word(&mut self) -> Result<Word, AztecError> {
        let bytes = self.read_bytes(WORD_SIZE)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(&bytes);
        Ok(word)
    }

    fn read_usize(&mut self) -> Result<usize, AztecError> {
        let word = self.read_word()?;
        let (high, low) = word.split_at(WORD_SIZE - 8);
        if high.iter().any(|&byte| byte != 0) {
            return Err(AztecError::malformed("length word too large"));
        }
        let mut value = [0u8; 8];
        value.copy_from_slice(low);
        usize::try_from(u64::from_be_bytes(value))
            .map_err(|_| AztecError::malformed("length word too large"))
    }
}
