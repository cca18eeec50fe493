//! Protocol constants.

/// Smallest note value covered by the trusted setup.
pub const K_MIN: u64 = 0;

/// Largest note value covered by the trusted setup.
pub const K_MAX: u64 = 14_336;

/// Size of one ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Words per note in proof data: `kBar, aBar, gammaX, gammaY, sigmaX, sigmaY`.
pub const NOTE_WORDS: usize = 6;

/// Notes in an atomic or bilateral swap: two maker notes, two taker notes.
pub const SWAP_NOTE_COUNT: usize = 4;

/// Notes in a dividend proof: input, output and residual.
pub const DIVIDEND_NOTE_COUNT: usize = 3;

/// Length marker of a compressed point entry in a metadata blob.
pub const COMPRESSED_POINT_LENGTH: usize = 0x21;

/// Bytes in a view key: 32-byte blinding factor and a 4-byte value.
pub const VIEW_KEY_LENGTH: usize = 36;

/// Bytes in an Ethereum address.
pub const ADDRESS_LENGTH: usize = 20;
