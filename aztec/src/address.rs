//! Ethereum addresses bound into proof transcripts.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::abi::Word;
use crate::constants::ADDRESS_LENGTH;
use crate::errors::AztecError;

/// A 20-byte account address, typically the proof sender.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    /// Left-padded to a 32-byte word, as the verifier contract sees it.
    pub fn to_word(&self) -> Word {
        let mut word = [0u8; 32];
        word[32 - ADDRESS_LENGTH..].copy_from_slice(&self.0);
        word
    }
}

impl FromStr for Address {
    type Err = AztecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|err| AztecError::malformed(format!("address {s:?}: {err}")))?;
        Ok(Self(bytes))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
