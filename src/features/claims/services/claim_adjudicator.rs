use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::claims::dtos::{ClaimResultDto, SubmitClaimDto};
use crate::features::claims::services::keyword_score;
use crate::features::matches::models::MatchRecord;
use crate::features::matches::MatchLedger;
use crate::features::reports::models::{Report, ReportKind};
use crate::modules::records::RecordStore;
use crate::modules::storage::BlobStore;

/// Contact details and image released once a claim is approved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    pub finder_email: String,
    /// Owner of the lost report whose pending match was promoted
    pub loser_email: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub approved: bool,
    pub disclosure: Option<Disclosure>,
}

impl ClaimOutcome {
    pub fn rejected() -> Self {
        Self {
            approved: false,
            disclosure: None,
        }
    }
}

/// Decides whether a claimant's description proves ownership of a found item
pub struct ClaimAdjudicator {
    store: Arc<dyn RecordStore>,
    blob_store: Arc<dyn BlobStore>,
    ledger: Arc<MatchLedger>,
    min_score: usize,
    image_url_ttl_secs: u32,
}

impl ClaimAdjudicator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blob_store: Arc<dyn BlobStore>,
        ledger: Arc<MatchLedger>,
        min_score: usize,
        image_url_ttl_secs: u32,
    ) -> Self {
        Self {
            store,
            blob_store,
            ledger,
            min_score,
            image_url_ttl_secs,
        }
    }

    /// Handle a claim submitted over HTTP. An id that is not a UUID cannot
    /// reference any found report and is rejected like an unknown one.
    pub async fn submit_claim(&self, dto: SubmitClaimDto) -> Result<ClaimResultDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let found_item_id = match Uuid::parse_str(dto.found_item_id.trim()) {
            Ok(id) => id,
            Err(_) => {
                debug!("Claim for malformed found item id '{}'", dto.found_item_id);
                return Ok(ClaimOutcome::rejected().into());
            }
        };

        let outcome = self
            .adjudicate(found_item_id, &dto.verification_text())
            .await?;
        Ok(outcome.into())
    }

    /// Approve a claim when the verification text shares enough words with
    /// the found report's description.
    ///
    /// On approval every pending match of the found report is promoted to
    /// verified. A missing report or low score is a rejection, never an error.
    pub async fn adjudicate(
        &self,
        found_item_id: Uuid,
        verification_text: &str,
    ) -> Result<ClaimOutcome> {
        let Some(found) = self.store.get_report(ReportKind::Found, found_item_id).await? else {
            debug!("Claim for unknown found item {}", found_item_id);
            return Ok(ClaimOutcome::rejected());
        };

        let score = keyword_score(&found.description, verification_text);
        if score < self.min_score {
            info!(
                "Claim rejected: found={}, score={}, required={}",
                found.id, score, self.min_score
            );
            return Ok(ClaimOutcome::rejected());
        }

        let pending = self.ledger.pending_for_found(found.id).await?;
        for record in &pending {
            self.ledger.promote(record.id).await?;
        }

        let loser_email = match latest(&pending) {
            Some(record) => self
                .store
                .get_report(ReportKind::Lost, record.lost_item_id)
                .await?
                .map(|lost| lost.contact_email),
            None => None,
        };

        let image_url = self.image_url(&found).await;

        info!(
            "Claim approved: found={}, score={}, promoted={}",
            found.id,
            score,
            pending.len()
        );

        Ok(ClaimOutcome {
            approved: true,
            disclosure: Some(Disclosure {
                finder_email: found.contact_email,
                loser_email,
                image_url,
            }),
        })
    }

    /// Signed URL for the report's image; a blob store failure yields none
    async fn image_url(&self, found: &Report) -> Option<String> {
        let key = found.image_key.as_deref()?;

        match self
            .blob_store
            .presigned_url(key, self.image_url_ttl_secs)
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Could not sign image URL for found item {}: {}", found.id, e);
                None
            }
        }
    }
}

/// Most recently created record; the later one in arrival order on equal timestamps
fn latest(records: &[MatchRecord]) -> Option<&MatchRecord> {
    records.iter().max_by_key(|r| r.created_at)
}
