//! What to look for: an optional address and an optional topic0.
use std::fmt;

use crate::error::CheckError;

/// Kind of candidate being probed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// 20-byte emitting contract address.
    Address,
    /// 32-byte first topic, usually the event signature hash.
    Topic0,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::Address => f.write_str("address"),
            CandidateKind::Topic0 => f.write_str("topic0"),
        }
    }
}

/// A labelled byte string handed to the bloom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// What the bytes represent.
    pub kind: CandidateKind,
    /// Raw bytes that get hashed.
    pub bytes: Vec<u8>,
}

impl AsRef<[u8]> for Candidate {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// A single check: address and/or topic0 at one block.
///
/// Both fields are optional, but a request with neither is rejected when it
/// is checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckRequest {
    /// Emitting contract address.
    pub address: Option<[u8; 20]>,
    /// First log topic.
    pub topic0: Option<[u8; 32]>,
}

impl CheckRequest {
    /// Empty request; add filters with the builders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the address filter.
    pub fn with_address(mut self, address: [u8; 20]) -> Self {
        self.address = Some(address);
        self
    }

    /// Set the topic0 filter.
    pub fn with_topic0(mut self, topic0: [u8; 32]) -> Self {
        self.topic0 = Some(topic0);
        self
    }

    /// Parse hex inputs as they arrive from a command line or RPC payload.
    ///
    /// The address may omit its `0x` prefix; topic0 may not.
    pub fn parse(address: Option<&str>, topic0: Option<&str>) -> Result<Self, CheckError> {
        let address = address
            .map(|s| {
                let s = s.strip_prefix("0x").unwrap_or(s);
                decode_fixed::<20>(CandidateKind::Address, s)
            })
            .transpose()?;
        let topic0 = topic0
            .map(|s| {
                let s = s.strip_prefix("0x").ok_or_else(|| CheckError::InvalidCandidate {
                    kind: CandidateKind::Topic0,
                    reason: "must be 0x-prefixed hex".into(),
                })?;
                decode_fixed::<32>(CandidateKind::Topic0, s)
            })
            .transpose()?;
        Ok(Self { address, topic0 })
    }

    /// `true` when neither filter is set.
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.topic0.is_none()
    }

    /// Candidates in probe order: address, then topic0.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(2);
        if let Some(a) = self.address {
            out.push(Candidate {
                kind: CandidateKind::Address,
                bytes: a.to_vec(),
            });
        }
        if let Some(t) = self.topic0 {
            out.push(Candidate {
                kind: CandidateKind::Topic0,
                bytes: t.to_vec(),
            });
        }
        out
    }
}

fn decode_fixed<const N: usize>(kind: CandidateKind, s: &str) -> Result<[u8; N], CheckError> {
    let bytes = hex::decode(s).map_err(|e| CheckError::InvalidCandidate {
        kind,
        reason: e.to_string(),
    })?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| CheckError::InvalidCandidate {
        kind,
        reason: format!("expected {N} bytes, got {len}"),
    })
}
