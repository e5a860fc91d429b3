#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! logs-bloom-check: test whether an address and/or event topic could have
//! produced a log in a block, using only the header's `logsBloom`.
//!
//! ## What you implement
//! - [`BlockSource`]: fetch a block header and, for verification, its logs.
//!
//! ## What the crate does
//! - Derives the three Keccak-based probe bits for each candidate and tests
//!   them against the 2048-bit bloom ([`test_membership`], [`test_any`]).
//! - Combines address and topic probes conjunctively.
//! - Optionally fetches exact logs and classifies the result as
//!   confirmed absent, possible, confirmed present, or a bloom false positive
//!   ([`reconcile`]).
//!
//! The bloom test never yields false negatives: if the bloom says no, no
//! matching log exists in the block.
//!
//! ## Minimal usage
//! ```rust,ignore
//! use logs_bloom_check::prelude::*;
//! use async_trait::async_trait;
//!
//! struct MyNode;
//! #[async_trait]
//! impl BlockSource for MyNode {
//!     async fn get_block_header(&self, block: u64) -> Result<BlockHeader, SourceError> {
//!         Ok(BlockHeader { number: block, logs_bloom: vec![0u8; 256] })
//!     }
//!     async fn get_logs(&self, _q: &LogQuery) -> Result<Vec<LogEntry>, SourceError> {
//!         Ok(vec![])
//!     }
//! }
//!
//! async fn run() -> anyhow::Result<()> {
//!     let request = CheckRequest::parse(
//!         Some("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
//!         Some("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"),
//!     )?;
//!     let checker = BloomChecker::new(MyNode).with_verification(true);
//!     let report = checker.check(18_000_000, &request).await?;
//!     println!("{}", report.verification.outcome);
//!     Ok(())
//! }
//! ```
/// Orchestrator: header fetch, bloom probes, optional exact verification.
pub mod engine;

/// Trait and types for fetching headers and logs from a node.
pub mod block_source;

/// The 256-byte logs bloom and probe-bit derivation.
pub mod bloom;

/// Checker configuration and the exact-log predicate.
pub mod config;

/// Error types.
pub mod error;

/// Membership tests over raw filters.
pub mod matcher;

/// Bloom verdict vs. exact logs.
pub mod reconcile;

/// Address/topic request parsing.
pub mod request;

// Public re-exports
pub use block_source::{BlockHeader, BlockSource, LogEntry, LogQuery};
pub use bloom::{bit_positions, keccak256, BitPosition, LogsBloom};
pub use config::{CheckConfig, LogMatch};
pub use engine::{BloomChecker, CheckReport};
pub use error::{CheckError, SourceError};
pub use matcher::{test_any, test_membership, MembershipResult};
pub use reconcile::{reconcile, Verification, VerificationOutcome};
pub use request::{Candidate, CandidateKind, CheckRequest};

/// Convenience prelude for end users.
pub mod prelude {
    pub use crate::{
        BlockHeader, BlockSource, BloomChecker, CheckConfig, CheckError, CheckReport,
        CheckRequest, LogEntry, LogMatch, LogQuery, SourceError, VerificationOutcome,
    };
}
