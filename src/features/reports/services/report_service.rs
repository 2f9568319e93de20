use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::matches::MatchLedger;
use crate::features::reports::dtos::{
    is_image_type_allowed, sanitize_file_name, CreateFoundReportDto, CreateLostReportDto,
    FoundItemStatusDto, FoundReportSubmittedDto, ImageUpload, LostReportSubmittedDto,
    ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE,
};
use crate::features::reports::models::{CreateReport, Report, ReportKind, ReportStatus};
use crate::features::reports::services::CandidateMatcher;
use crate::modules::records::RecordStore;
use crate::modules::storage::BlobStore;
use crate::shared::validation::parse_event_date;

/// Intake of lost and found reports, including automatic pairing
pub struct ReportService {
    store: Arc<dyn RecordStore>,
    blob_store: Arc<dyn BlobStore>,
    ledger: Arc<MatchLedger>,
    matcher: CandidateMatcher,
}

impl ReportService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        blob_store: Arc<dyn BlobStore>,
        ledger: Arc<MatchLedger>,
        matcher: CandidateMatcher,
    ) -> Self {
        Self {
            store,
            blob_store,
            ledger,
            matcher,
        }
    }

    /// Save a lost report and pair it with the first plausible open found report.
    ///
    /// A pairing made this way is `pending` until the owner proves it
    /// through a claim.
    pub async fn submit_lost(&self, dto: CreateLostReportDto) -> Result<LostReportSubmittedDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let date_of_event = parse_event_date(&dto.date_lost)
            .ok_or_else(|| AppError::Validation("dateLost must be YYYY-MM-DD".to_string()))?;

        let report = self
            .store
            .insert_report(CreateReport {
                kind: ReportKind::Lost,
                category: dto.category,
                description: dto.description.unwrap_or_default(),
                location_text: dto.location,
                date_of_event,
                contact_email: dto.email,
                image_key: None,
            })
            .await?;

        info!(
            "Lost report created: id={}, category={}",
            report.id, report.category
        );

        let candidates = self
            .store
            .list_reports(ReportKind::Found, Some(ReportStatus::Open))
            .await?;

        let matched_found_item_id = match self.matcher.find_match(&report, &candidates) {
            Some(found) => {
                self.ledger.record_pending(report.id, found.id).await?;
                self.close_matched(&report, found).await?;
                Some(found.id)
            }
            None => {
                debug!(
                    "No open found report matches lost report {} ({} candidates, {:?})",
                    report.id,
                    candidates.len(),
                    self.matcher.strategy()
                );
                None
            }
        };

        Ok(LostReportSubmittedDto {
            saved: true,
            matched_found_item_id,
        })
    }

    /// Save a found report (with optional image) and pair it with a plausible
    /// open lost report.
    ///
    /// A pairing made this way is `verified` immediately and the owner's
    /// contact is returned to the finder.
    pub async fn submit_found(
        &self,
        dto: CreateFoundReportDto,
        image: Option<ImageUpload>,
    ) -> Result<FoundReportSubmittedDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let date_of_event = parse_event_date(&dto.date_found)
            .ok_or_else(|| AppError::Validation("dateFound must be YYYY-MM-DD".to_string()))?;
        if let Some(image) = &image {
            Self::check_image(image)?;
        }

        let image_key = match image {
            Some(image) => self.store_image(image).await,
            None => None,
        };

        let report = self
            .store
            .insert_report(CreateReport {
                kind: ReportKind::Found,
                category: dto.category,
                description: dto.description.unwrap_or_default(),
                location_text: dto.location,
                date_of_event,
                contact_email: dto.finder_contact,
                image_key,
            })
            .await?;

        info!(
            "Found report created: id={}, category={}, has_image={}",
            report.id,
            report.category,
            report.image_key.is_some()
        );

        let candidates = self
            .store
            .list_reports(ReportKind::Lost, Some(ReportStatus::Open))
            .await?;

        let matched_lost_owner_email = match self.matcher.find_match(&report, &candidates) {
            Some(lost) => {
                self.ledger.record_verified(lost.id, report.id).await?;
                self.close_matched(lost, &report).await?;
                Some(lost.contact_email.clone())
            }
            None => {
                debug!(
                    "No open lost report matches found report {} ({} candidates, {:?})",
                    report.id,
                    candidates.len(),
                    self.matcher.strategy()
                );
                None
            }
        };

        Ok(FoundReportSubmittedDto {
            saved: true,
            matched_lost_owner_email,
        })
    }

    /// Every found report, newest first, with its current match state
    pub async fn list_found_with_status(&self) -> Result<Vec<FoundItemStatusDto>> {
        let found = self.store.list_reports(ReportKind::Found, None).await?;
        let statuses = self.ledger.status_map().await?;

        Ok(found
            .into_iter()
            .rev()
            .map(|report| FoundItemStatusDto {
                match_status: statuses.get(&report.id).copied().unwrap_or_default(),
                id: report.id,
                category: report.category,
                date_found: report.date_of_event,
            })
            .collect())
    }

    fn check_image(image: &ImageUpload) -> Result<()> {
        if image.data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "Image too large. Maximum size is {} MB",
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        if !is_image_type_allowed(&image.content_type) {
            return Err(AppError::BadRequest(format!(
                "Image type '{}' is not allowed. Allowed types: {}",
                image.content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        Ok(())
    }

    /// Upload the image; a failed upload leaves the report without one
    async fn store_image(&self, image: ImageUpload) -> Option<String> {
        let path = format!(
            "found-{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(&image.file_name)
        );
        let key = self.blob_store.generate_key(&path);

        match self
            .blob_store
            .upload(&key, image.data, &image.content_type)
            .await
        {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Image upload failed, saving report without image: {}", e);
                None
            }
        }
    }

    /// Both sides of a freshly recorded match stop accepting new matches
    async fn close_matched(&self, lost: &Report, found: &Report) -> Result<()> {
        for report in [lost, found] {
            self.store
                .set_report_status(report.kind, report.id, report.status.close())
                .await?;
        }
        Ok(())
    }
}
