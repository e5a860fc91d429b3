use async_trait::async_trait;
use logs_bloom_check::prelude::*;
use std::sync::{Arc, Mutex};

/// Source stub: every block has an empty bloom; records log queries.
struct EmptyBlocks {
    log_queries: Arc<Mutex<Vec<LogQuery>>>,
    header_calls: Arc<Mutex<u32>>,
}
impl EmptyBlocks {
    fn new() -> Self {
        Self {
            log_queries: Arc::new(Mutex::new(Vec::new())),
            header_calls: Arc::new(Mutex::new(0)),
        }
    }
}

#[async_trait]
impl BlockSource for EmptyBlocks {
    async fn get_block_header(&self, block: u64) -> Result<BlockHeader, SourceError> {
        *self.header_calls.lock().unwrap() += 1;
        Ok(BlockHeader {
            number: block,
            logs_bloom: vec![0u8; 256],
        })
    }
    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, SourceError> {
        self.log_queries.lock().unwrap().push(query.clone());
        Ok(Vec::new())
    }
}

/// Source stub that only knows block 1 and serves a truncated bloom for it.
struct ShortBloom;
#[async_trait]
impl BlockSource for ShortBloom {
    async fn get_block_header(&self, block: u64) -> Result<BlockHeader, SourceError> {
        if block == 1 {
            Ok(BlockHeader {
                number: 1,
                logs_bloom: vec![0xff; 255],
            })
        } else {
            Err(SourceError::BlockNotFound { block })
        }
    }
    async fn get_logs(&self, _query: &LogQuery) -> Result<Vec<LogEntry>, SourceError> {
        Err(anyhow::anyhow!("never called").into())
    }
}

fn usdt() -> CheckRequest {
    CheckRequest::parse(Some("0xdAC17F958D2ee523a2206206994597C13D831ec7"), None).unwrap()
}

#[tokio::test]
async fn empty_bloom_is_confirmed_absent_without_fetching_logs() -> anyhow::Result<()> {
    let source = EmptyBlocks::new();
    let queries = source.log_queries.clone();
    let checker = BloomChecker::new(source);

    let report = checker.check(42, &usdt()).await?;

    assert_eq!(report.block, 42);
    assert!(!report.bloom_verdict);
    assert_eq!(report.address.map(|m| m.possibly_present), Some(false));
    assert!(report.topic0.is_none());
    assert_eq!(report.verification.outcome, VerificationOutcome::ConfirmedAbsent);
    assert_eq!(report.verification.matching_logs, 0);
    assert!(!report.soundness_violation);
    assert!(queries.lock().unwrap().is_empty(), "verification is off by default");

    Ok(())
}

#[tokio::test]
async fn empty_request_fails_before_any_fetch() {
    let source = EmptyBlocks::new();
    let calls = source.header_calls.clone();
    let checker = BloomChecker::new(source).with_verification(true);

    let err = checker.check(1, &CheckRequest::new()).await.unwrap_err();

    assert!(matches!(err, CheckError::NoCandidatesSupplied));
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn unknown_block_is_surfaced_unchanged() {
    let checker = BloomChecker::new(ShortBloom);

    let err = checker.check(2, &usdt()).await.unwrap_err();

    assert!(matches!(
        err,
        CheckError::Source(SourceError::BlockNotFound { block: 2 })
    ));
}

#[tokio::test]
async fn truncated_bloom_is_a_contract_violation() {
    let checker = BloomChecker::new(ShortBloom).with_verification(true);

    let err = checker.check(1, &usdt()).await.unwrap_err();

    assert!(matches!(
        err,
        CheckError::InvalidFilterLength {
            got: 255,
            expected: 256
        }
    ));
}

#[test]
fn default_config_is_unverified_with_timeout() {
    let cfg = CheckConfig::default();
    assert!(!cfg.verify);
    assert_eq!(cfg.fetch_timeout, Some(std::time::Duration::from_secs(30)));
    assert!(matches!(cfg.log_match, LogMatch::Conjunctive));
}
