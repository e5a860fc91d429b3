//! The 2048-bit `logsBloom` commitment carried in every block header.
//!
//! Bit derivation follows the chain's wire format exactly:
//!   digest = keccak256(candidate)
//!   p_i    = u16::from_be_bytes(digest[2i..2i+2]) mod 2048, i in {0, 1, 2}
//!   byte   = 255 - p_i / 8   (bit 2047 lives in byte 0)
//!   mask   = 1 << (p_i % 8)
use sha3::{Digest, Keccak256};

use crate::error::CheckError;

/// Size of a logs bloom in bytes.
pub const BLOOM_BYTES: usize = 256;
/// Size of a logs bloom in bits.
pub const BLOOM_BITS: usize = BLOOM_BYTES * 8;
/// Number of probes derived per candidate.
pub const PROBES: usize = 3;

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// One bit of the filter, in `[0, 2048)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitPosition(u16);

impl BitPosition {
    /// Wraps a raw position, reducing it into range.
    pub fn new(raw: u16) -> Self {
        Self(raw % BLOOM_BITS as u16)
    }

    /// Position as an integer.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Index into the 256-byte representation. Byte order is reversed.
    pub fn byte_index(self) -> usize {
        BLOOM_BYTES - 1 - (self.0 as usize / 8)
    }

    /// Mask selecting this bit inside its byte.
    pub fn mask(self) -> u8 {
        1 << (self.0 % 8)
    }
}

/// The three probe positions for `candidate`.
pub fn bit_positions(candidate: &[u8]) -> [BitPosition; PROBES] {
    let digest = keccak256(candidate);
    let mut out = [BitPosition(0); PROBES];
    for (i, pos) in out.iter_mut().enumerate() {
        let raw = u16::from_be_bytes([digest[2 * i], digest[2 * i + 1]]);
        *pos = BitPosition::new(raw);
    }
    out
}

/// An immutable logs bloom taken from a block header.
#[derive(Clone, PartialEq, Eq)]
pub struct LogsBloom([u8; BLOOM_BYTES]);

impl LogsBloom {
    /// Validates and copies a raw filter.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CheckError> {
        let arr: [u8; BLOOM_BYTES] =
            bytes.try_into().map_err(|_| CheckError::InvalidFilterLength {
                got: bytes.len(),
                expected: BLOOM_BYTES,
            })?;
        Ok(Self(arr))
    }

    /// Parses the hex form used by JSON-RPC (`0x` prefix optional).
    pub fn from_hex(s: &str) -> Result<Self, CheckError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    /// Raw bytes, bit 2047 first.
    pub fn as_bytes(&self) -> &[u8; BLOOM_BYTES] {
        &self.0
    }

    /// Whether a single bit is set.
    pub fn is_set(&self, pos: BitPosition) -> bool {
        self.0[pos.byte_index()] & pos.mask() != 0
    }

    /// `true` iff all three probes for `candidate` are set.
    ///
    /// A candidate that was accrued into the bloom always tests positive;
    /// unrelated candidates may too.
    pub fn contains(&self, candidate: &[u8]) -> bool {
        bit_positions(candidate).iter().all(|&p| self.is_set(p))
    }
}

impl TryFrom<&[u8]> for LogsBloom {
    type Error = CheckError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl std::fmt::Debug for LogsBloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogsBloom(0x{})", hex::encode(self.0))
    }
}
