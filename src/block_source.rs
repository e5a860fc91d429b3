//! Abstraction over the node that serves headers and logs (JSON-RPC or otherwise).
use async_trait::async_trait;

use crate::error::SourceError;

/// The header fields a bloom check needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block number.
    pub number: u64,
    /// Raw `logsBloom` bytes as served. Length is validated by the checker.
    pub logs_bloom: Vec<u8>,
}

/// One event log as returned by `eth_getLogs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitting contract.
    pub address: [u8; 20],
    /// Indexed topics, topic0 first.
    pub topics: Vec<[u8; 32]>,
    /// Unindexed payload.
    pub data: Vec<u8>,
}

impl LogEntry {
    /// First topic, if any.
    pub fn topic0(&self) -> Option<&[u8; 32]> {
        self.topics.first()
    }
}

/// Server-side filters for a single-block log fetch.
///
/// `None` means "do not filter on this field".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Block to read (`fromBlock == toBlock`).
    pub block: u64,
    /// Restrict to this emitter.
    pub address: Option<[u8; 20]>,
    /// Restrict to this topic0.
    pub topic0: Option<[u8; 32]>,
}

/// Network provider for headers and logs.
///
/// Retries, connection pooling and endpoint selection live in the
/// implementation; the checker calls each method at most once per check.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch the header of `block`. Unknown blocks map to [`SourceError::BlockNotFound`].
    async fn get_block_header(&self, block: u64) -> Result<BlockHeader, SourceError>;

    /// Fetch logs matching `query`. Only called when verification is enabled.
    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, SourceError>;
}
