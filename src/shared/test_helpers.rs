use std::sync::Arc;

use fake::faker::internet::en::SafeEmail;
use fake::Fake;

use crate::core::config::MatchingConfig;
use crate::features::claims::ClaimAdjudicator;
use crate::features::matches::MatchLedger;
use crate::features::reports::services::MatchStrategy;
use crate::features::reports::{CandidateMatcher, ReportService};
use crate::modules::records::MemoryRecordStore;
use crate::modules::storage::MemoryBlobStore;

pub fn fake_email() -> String {
    SafeEmail().fake()
}

/// Services wired over in-memory stores, with handles on the stores for
/// assertions and failure injection
pub struct TestContext {
    pub store: Arc<MemoryRecordStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub ledger: Arc<MatchLedger>,
    pub report_service: Arc<ReportService>,
    pub claim_adjudicator: Arc<ClaimAdjudicator>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(MatchingConfig::default())
    }

    pub fn with_strategy(strategy: MatchStrategy) -> Self {
        Self::with_config(MatchingConfig {
            strategy,
            ..MatchingConfig::default()
        })
    }

    pub fn with_config(config: MatchingConfig) -> Self {
        let store = Arc::new(MemoryRecordStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let ledger = Arc::new(MatchLedger::new(store.clone()));

        let report_service = Arc::new(ReportService::new(
            store.clone(),
            blobs.clone(),
            ledger.clone(),
            CandidateMatcher::from_config(&config),
        ));
        let claim_adjudicator = Arc::new(ClaimAdjudicator::new(
            store.clone(),
            blobs.clone(),
            ledger.clone(),
            config.min_claim_score,
            config.claim_image_url_ttl_secs,
        ));

        Self {
            store,
            blobs,
            ledger,
            report_service,
            claim_adjudicator,
        }
    }
}
