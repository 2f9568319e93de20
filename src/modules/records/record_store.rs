use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::matches::models::{CreateMatch, MatchFilter, MatchRecord, MatchStatus};
use crate::features::reports::models::{CreateReport, Report, ReportKind, ReportStatus};

/// Persistent storage for reports and match records.
///
/// Listings are returned in arrival order (`created_at` ascending, id as
/// secondary key). No operation retries; a failure aborts the caller's
/// request.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new report with status `open`
    async fn insert_report(&self, data: CreateReport) -> Result<Report>;

    /// Fetch a report by id, `None` when absent
    async fn get_report(&self, kind: ReportKind, id: Uuid) -> Result<Option<Report>>;

    /// List reports of one kind, optionally restricted to a status
    async fn list_reports(
        &self,
        kind: ReportKind,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>>;

    /// Overwrite the status of a report
    async fn set_report_status(&self, kind: ReportKind, id: Uuid, status: ReportStatus)
        -> Result<()>;

    /// Insert a new match record
    async fn insert_match(&self, data: CreateMatch) -> Result<MatchRecord>;

    /// List match records satisfying every filter that is set
    async fn list_matches(&self, filter: MatchFilter) -> Result<Vec<MatchRecord>>;

    /// Overwrite the status of a match record
    async fn set_match_status(&self, id: Uuid, status: MatchStatus) -> Result<()>;
}
