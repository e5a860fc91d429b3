//! Checker configuration.
use std::{fmt, sync::Arc, time::Duration};

use crate::{
    block_source::{LogEntry, LogQuery},
    request::CheckRequest,
};

/// Default per-call timeout around collaborator fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// How exact logs are matched against a request during verification.
#[derive(Clone, Default)]
pub enum LogMatch {
    /// Address AND topic0 must match (each only when supplied).
    /// Filters are forwarded to the provider.
    #[default]
    Conjunctive,
    /// Either supplied filter may match. The whole block is fetched.
    Disjunctive,
    /// Caller-defined predicate over the whole block's logs.
    Custom(Arc<dyn Fn(&LogEntry) -> bool + Send + Sync>),
}

impl LogMatch {
    /// Wrap a closure as a custom predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&LogEntry) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Query to send the provider for `request` at `block`.
    pub fn query(&self, block: u64, request: &CheckRequest) -> LogQuery {
        match self {
            Self::Conjunctive => LogQuery {
                block,
                address: request.address,
                topic0: request.topic0,
            },
            Self::Disjunctive | Self::Custom(_) => LogQuery {
                block,
                ..LogQuery::default()
            },
        }
    }

    /// Whether `log` counts as a match for `request`.
    pub fn matches(&self, log: &LogEntry, request: &CheckRequest) -> bool {
        let addr = request.address.map(|a| log.address == a);
        let topic = request.topic0.map(|t| log.topic0() == Some(&t));
        match self {
            Self::Conjunctive => addr.unwrap_or(true) && topic.unwrap_or(true),
            Self::Disjunctive => addr.unwrap_or(false) || topic.unwrap_or(false),
            Self::Custom(f) => f(log),
        }
    }
}

impl fmt::Debug for LogMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conjunctive => f.write_str("Conjunctive"),
            Self::Disjunctive => f.write_str("Disjunctive"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Knobs for [`BloomChecker`](crate::engine::BloomChecker).
#[derive(Clone, Debug)]
pub struct CheckConfig {
    /// Fetch exact logs after the bloom test.
    pub verify: bool,
    /// Timeout per collaborator call; `None` waits forever.
    pub fetch_timeout: Option<Duration>,
    /// Exact-log predicate.
    pub log_match: LogMatch,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            verify: false,
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
            log_match: LogMatch::Conjunctive,
        }
    }
}
