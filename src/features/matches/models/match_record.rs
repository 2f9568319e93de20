use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Match record status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Verified,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Verified => write!(f, "verified"),
        }
    }
}

/// Match state of a found report as shown to users
///
/// Ordered so that `Verified > Pending > None`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchState {
    #[default]
    None,
    Pending,
    Verified,
}

impl From<MatchStatus> for MatchState {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Pending => MatchState::Pending,
            MatchStatus::Verified => MatchState::Verified,
        }
    }
}

/// Database model for a lost/found pairing
#[derive(Debug, Clone, FromRow)]
pub struct MatchRecord {
    pub id: Uuid,
    pub lost_item_id: Uuid,
    pub found_item_id: Uuid,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

/// Data for creating a new match record
#[derive(Debug, Clone)]
pub struct CreateMatch {
    pub lost_item_id: Uuid,
    pub found_item_id: Uuid,
    pub status: MatchStatus,
}

/// Equality filters for listing match records
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchFilter {
    pub found_item_id: Option<Uuid>,
    pub status: Option<MatchStatus>,
}

impl MatchFilter {
    pub fn matches(&self, record: &MatchRecord) -> bool {
        self.found_item_id.map_or(true, |id| id == record.found_item_id)
            && self.status.map_or(true, |s| s == record.status)
    }
}
