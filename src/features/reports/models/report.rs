use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which side of the reconciliation a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    /// The kind a new report of this kind is matched against
    pub fn opposite(self) -> Self {
        match self {
            ReportKind::Lost => ReportKind::Found,
            ReportKind::Found => ReportKind::Lost,
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Lost => write!(f, "lost"),
            ReportKind::Found => write!(f, "found"),
        }
    }
}

/// Report status enum matching database enum
///
/// A report is `open` until the first match record referencing it is
/// written, then `closed` for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Open,
    Closed,
}

impl ReportStatus {
    /// Transition taken once a match record references the report
    pub fn close(self) -> Self {
        match self {
            ReportStatus::Open | ReportStatus::Closed => ReportStatus::Closed,
        }
    }

    /// Only open reports are scanned as match candidates
    pub fn accepts_matches(self) -> bool {
        matches!(self, ReportStatus::Open)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Open => write!(f, "open"),
            ReportStatus::Closed => write!(f, "closed"),
        }
    }
}

/// A lost or found item report
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    pub kind: ReportKind,
    pub category: String,
    pub description: String,
    /// Comma-separated place fragments as typed by the reporter
    pub location_text: String,
    pub date_of_event: NaiveDate,
    pub contact_email: String,
    pub status: ReportStatus,
    /// Blob key of the evidence image (found reports only)
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub kind: ReportKind,
    pub category: String,
    pub description: String,
    pub location_text: String,
    pub date_of_event: NaiveDate,
    pub contact_email: String,
    pub image_key: Option<String>,
}
