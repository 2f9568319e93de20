use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::matches::models::{
    CreateMatch, MatchFilter, MatchRecord, MatchState, MatchStatus,
};
use crate::modules::records::RecordStore;

/// Ordering key for picking the authoritative record of a found report:
/// latest `created_at` first, `verified` over `pending` on equal timestamps.
fn precedence(record: &MatchRecord) -> (DateTime<Utc>, MatchState) {
    (record.created_at, record.status.into())
}

/// Current match state of a found report given every record referencing it
pub fn resolve_state(records: &[MatchRecord]) -> MatchState {
    records
        .iter()
        .max_by_key(|r| precedence(r))
        .map(|r| r.status.into())
        .unwrap_or_default()
}

/// Lifecycle of lost/found pairings
pub struct MatchLedger {
    store: Arc<dyn RecordStore>,
}

impl MatchLedger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Pair a newly submitted lost report with an existing found report.
    ///
    /// The claimant still has to prove ownership, so the record starts
    /// as `pending`.
    pub async fn record_pending(
        &self,
        lost_item_id: Uuid,
        found_item_id: Uuid,
    ) -> Result<MatchRecord> {
        self.record(lost_item_id, found_item_id, MatchStatus::Pending)
            .await
    }

    /// Pair a newly submitted found report with an existing lost report.
    ///
    /// The finder's submission is taken as sufficient evidence, so the
    /// record is `verified` from the start.
    pub async fn record_verified(
        &self,
        lost_item_id: Uuid,
        found_item_id: Uuid,
    ) -> Result<MatchRecord> {
        self.record(lost_item_id, found_item_id, MatchStatus::Verified)
            .await
    }

    async fn record(
        &self,
        lost_item_id: Uuid,
        found_item_id: Uuid,
        status: MatchStatus,
    ) -> Result<MatchRecord> {
        let record = self
            .store
            .insert_match(CreateMatch {
                lost_item_id,
                found_item_id,
                status,
            })
            .await?;

        tracing::info!(
            "Match recorded: id={}, lost={}, found={}, status={}",
            record.id,
            lost_item_id,
            found_item_id,
            status
        );

        Ok(record)
    }

    /// Mark a match record as verified. Repeating the call rewrites the
    /// same state.
    pub async fn promote(&self, match_id: Uuid) -> Result<()> {
        self.store
            .set_match_status(match_id, MatchStatus::Verified)
            .await?;

        tracing::info!("Match promoted to verified: id={}", match_id);
        Ok(())
    }

    /// Pending records referencing a found report, oldest first
    pub async fn pending_for_found(&self, found_item_id: Uuid) -> Result<Vec<MatchRecord>> {
        self.store
            .list_matches(MatchFilter {
                found_item_id: Some(found_item_id),
                status: Some(MatchStatus::Pending),
            })
            .await
    }

    /// Match state of one found report, `none` when no record references it
    pub async fn status_of(&self, found_item_id: Uuid) -> Result<MatchState> {
        let records = self
            .store
            .list_matches(MatchFilter {
                found_item_id: Some(found_item_id),
                status: None,
            })
            .await?;

        Ok(resolve_state(&records))
    }

    /// Match state of every found report referenced by at least one record
    pub async fn status_map(&self) -> Result<HashMap<Uuid, MatchState>> {
        let records = self.store.list_matches(MatchFilter::default()).await?;

        let mut latest: HashMap<Uuid, &MatchRecord> = HashMap::new();
        for record in &records {
            latest
                .entry(record.found_item_id)
                .and_modify(|current| {
                    if precedence(record) > precedence(current) {
                        *current = record;
                    }
                })
                .or_insert(record);
        }

        Ok(latest
            .into_iter()
            .map(|(found_item_id, record)| (found_item_id, record.status.into()))
            .collect())
    }
}
