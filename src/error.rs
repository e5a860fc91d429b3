//! Error types for bloom checks and their collaborators.
use thiserror::Error;

use crate::request::CandidateKind;

/// Errors returned by the checker.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The filter is not exactly 256 bytes. Caller contract violation.
    #[error("logs bloom must be {expected} bytes, got {got}")]
    InvalidFilterLength {
        /// Length supplied.
        got: usize,
        /// Required length.
        expected: usize,
    },

    /// The filter was supplied as hex and did not decode.
    #[error("logs bloom is not valid hex: {0}")]
    InvalidFilterHex(#[from] hex::FromHexError),

    /// Neither an address nor a topic was given.
    #[error("no candidates supplied: provide an address and/or a topic0")]
    NoCandidatesSupplied,

    /// An address or topic failed to parse.
    #[error("invalid {kind}: {reason}")]
    InvalidCandidate {
        /// Which input was rejected.
        kind: CandidateKind,
        /// Parser message.
        reason: String,
    },

    /// Header fetch failed; passed through unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Exact log fetch was attempted and failed.
    #[error("verification unavailable: {source}")]
    VerificationUnavailable {
        /// Collaborator failure.
        #[source]
        source: SourceError,
    },
}

/// Errors reported by a [`BlockSource`](crate::block_source::BlockSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider does not know the requested block.
    #[error("block {block} not found")]
    BlockNotFound {
        /// Requested block number.
        block: u64,
    },

    /// Transport or provider failure.
    #[error("provider error: {0:#}")]
    Provider(#[from] anyhow::Error),
}
