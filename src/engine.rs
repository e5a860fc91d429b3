//! Orchestrator for a single-block bloom check:
//! 1) fetch the block header and validate its logs bloom,
//! 2) probe the bloom for the requested address and/or topic0,
//! 3) optionally fetch exact logs and reconcile them with the bloom verdict.
use std::{future::Future, time::Duration};

use anyhow::anyhow;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    block_source::{BlockHeader, BlockSource, LogEntry},
    bloom::LogsBloom,
    config::{CheckConfig, LogMatch},
    error::{CheckError, SourceError},
    matcher::MembershipResult,
    reconcile::{reconcile, Verification},
    request::{CandidateKind, CheckRequest},
};

/// Everything learned about one request at one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckReport {
    /// Block that was checked.
    pub block: u64,
    /// Address probe, when an address was requested.
    pub address: Option<MembershipResult>,
    /// Topic0 probe, when a topic was requested.
    pub topic0: Option<MembershipResult>,
    /// Conjunction of every probe.
    pub bloom_verdict: bool,
    /// Reconciled outcome.
    pub verification: Verification,
    /// A counted log carries a candidate whose own probe was negative.
    /// Points at a bad provider or bad inputs; the outcome is unaffected.
    pub soundness_violation: bool,
    /// Wall time spent on the check, fetches included.
    pub elapsed: Duration,
}

/// Core checker. `S` = header/log source.
pub struct BloomChecker<S> {
    source: S,
    config: CheckConfig,
}

impl<S> BloomChecker<S>
where
    S: BlockSource + 'static,
{
    /// Create a checker with default configuration (no verification, 30s timeouts).
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: CheckConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable exact log verification.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.config.verify = verify;
        self
    }

    /// Per-call timeout around collaborator fetches.
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    /// Predicate used to count exact logs.
    pub fn with_log_match(mut self, log_match: LogMatch) -> Self {
        self.config.log_match = log_match;
        self
    }

    /// Check `request` against the logs bloom of `block`.
    ///
    /// # Errors
    /// - [`CheckError::NoCandidatesSupplied`] for an empty request (nothing is fetched).
    /// - [`CheckError::Source`] when the header cannot be fetched.
    /// - [`CheckError::InvalidFilterLength`] when the header's bloom is not 256 bytes.
    /// - [`CheckError::VerificationUnavailable`] when the bloom matched and the
    ///   exact log fetch failed.
    pub async fn check(
        &self,
        block: u64,
        request: &CheckRequest,
    ) -> Result<CheckReport, CheckError> {
        if request.is_empty() {
            return Err(CheckError::NoCandidatesSupplied);
        }
        let started = Instant::now();

        let header: BlockHeader = self
            .timed(self.source.get_block_header(block))
            .await
            .map_err(|e| {
                warn!(block, error = %e, "header fetch failed");
                e
            })?;
        let bloom = LogsBloom::from_slice(&header.logs_bloom)?;

        // (a) Probe each candidate; the verdict is their conjunction
        let mut address = None;
        let mut topic0 = None;
        let mut bloom_verdict = true;
        for c in request.candidates() {
            let result = MembershipResult {
                possibly_present: bloom.contains(&c.bytes),
            };
            debug!(
                block,
                kind = %c.kind,
                possibly_present = result.possibly_present,
                "bloom probe"
            );
            bloom_verdict &= result.possibly_present;
            match c.kind {
                CandidateKind::Address => address = Some(result),
                CandidateKind::Topic0 => topic0 = Some(result),
            }
        }

        // (b) Optional exact fetch
        let exact = if self.config.verify {
            Some(self.matching_logs(block, request).await)
        } else {
            None
        };

        // A counted log only contradicts the bloom if it carries a candidate
        // whose own probe came back negative.
        let soundness_violation = match &exact {
            Some(Ok(logs)) => {
                let contradicting = logs
                    .iter()
                    .filter(|l| contradicts_probe(l, request, address, topic0))
                    .count();
                if contradicting > 0 {
                    warn!(
                        block,
                        contradicting,
                        "log carries a candidate the bloom ruled out; re-check inputs/provider"
                    );
                }
                contradicting > 0
            }
            _ => false,
        };

        // (c) Reconcile
        let verification = reconcile(bloom_verdict, exact).map_err(|e| {
            warn!(block, error = %e, "exact log fetch failed");
            e
        })?;

        let elapsed = started.elapsed();
        info!(
            block,
            bloom_verdict,
            outcome = %verification.outcome,
            matching_logs = verification.matching_logs,
            ?elapsed,
            "bloom check done"
        );

        Ok(CheckReport {
            block,
            address,
            topic0,
            bloom_verdict,
            verification,
            soundness_violation,
            elapsed,
        })
    }

    async fn matching_logs(
        &self,
        block: u64,
        request: &CheckRequest,
    ) -> Result<Vec<LogEntry>, SourceError> {
        let query = self.config.log_match.query(block, request);
        let logs = self.timed(self.source.get_logs(&query)).await?;
        let fetched = logs.len();
        let matching: Vec<LogEntry> = logs
            .into_iter()
            .filter(|l| self.config.log_match.matches(l, request))
            .collect();
        debug!(block, fetched, matching = matching.len(), "exact logs fetched");
        Ok(matching)
    }

    async fn timed<T, F>(&self, fut: F) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| SourceError::Provider(anyhow!("timed out after {limit:?}")))?,
            None => fut.await,
        }
    }
}

fn contradicts_probe(
    log: &LogEntry,
    request: &CheckRequest,
    address: Option<MembershipResult>,
    topic0: Option<MembershipResult>,
) -> bool {
    let addr_hit = matches!((request.address, address), (Some(a), Some(r))
        if r.definitely_absent() && log.address == a);
    let topic_hit = matches!((request.topic0, topic0), (Some(t), Some(r))
        if r.definitely_absent() && log.topic0() == Some(&t));
    addr_hit || topic_hit
}
