use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::matches::models::{CreateMatch, MatchFilter, MatchRecord, MatchStatus};
use crate::features::reports::models::{CreateReport, Report, ReportKind, ReportStatus};
use crate::modules::records::RecordStore;

const MATCH_COLUMNS: &str = "id, lost_item_id, found_item_id, status, created_at, verified_at";

/// Row shape shared by `lost_items` and `found_items`
#[derive(Debug, FromRow)]
struct ReportRow {
    id: Uuid,
    category: String,
    description: String,
    location_text: String,
    date_of_event: NaiveDate,
    contact_email: String,
    status: ReportStatus,
    image_key: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self, kind: ReportKind) -> Report {
        Report {
            id: self.id,
            kind,
            category: self.category,
            description: self.description,
            location_text: self.location_text,
            date_of_event: self.date_of_event,
            contact_email: self.contact_email,
            status: self.status,
            image_key: self.image_key,
            created_at: self.created_at,
        }
    }
}

fn table(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Lost => "lost_items",
        ReportKind::Found => "found_items",
    }
}

/// Lost reports carry no image column; select NULL in its place
fn report_columns(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Lost => {
            "id, category, description, location_text, date_of_event, contact_email, \
             status, NULL::TEXT AS image_key, created_at"
        }
        ReportKind::Found => {
            "id, category, description, location_text, date_of_event, contact_email, \
             status, image_key, created_at"
        }
    }
}

/// Postgres-backed record store
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert_report(&self, data: CreateReport) -> Result<Report> {
        let kind = data.kind;
        let row = match kind {
            ReportKind::Lost => {
                let sql = format!(
                    "INSERT INTO lost_items \
                     (category, description, location_text, date_of_event, contact_email) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING {}",
                    report_columns(kind)
                );
                sqlx::query_as::<_, ReportRow>(&sql)
                    .bind(&data.category)
                    .bind(&data.description)
                    .bind(&data.location_text)
                    .bind(data.date_of_event)
                    .bind(&data.contact_email)
                    .fetch_one(&self.pool)
                    .await
            }
            ReportKind::Found => {
                let sql = format!(
                    "INSERT INTO found_items \
                     (category, description, location_text, date_of_event, contact_email, image_key) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
                    report_columns(kind)
                );
                sqlx::query_as::<_, ReportRow>(&sql)
                    .bind(&data.category)
                    .bind(&data.description)
                    .bind(&data.location_text)
                    .bind(data.date_of_event)
                    .bind(&data.contact_email)
                    .bind(&data.image_key)
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to insert {} report: {:?}", kind, e);
            AppError::Database(e)
        })?;

        Ok(row.into_report(kind))
    }

    async fn get_report(&self, kind: ReportKind, id: Uuid) -> Result<Option<Report>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            report_columns(kind),
            table(kind)
        );

        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {} report {}: {:?}", kind, id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(|r| r.into_report(kind)))
    }

    async fn list_reports(
        &self,
        kind: ReportKind,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>> {
        let sql = format!(
            "SELECT {} FROM {} \
             WHERE ($1::report_status IS NULL OR status = $1) \
             ORDER BY created_at ASC, id ASC",
            report_columns(kind),
            table(kind)
        );

        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {} reports: {:?}", kind, e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(|r| r.into_report(kind)).collect())
    }

    async fn set_report_status(
        &self,
        kind: ReportKind,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET status = $2, updated_at = NOW() WHERE id = $1",
            table(kind)
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update {} report {}: {:?}", kind, id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    async fn insert_match(&self, data: CreateMatch) -> Result<MatchRecord> {
        let sql = format!(
            "INSERT INTO matches (lost_item_id, found_item_id, status, verified_at) \
             VALUES ($1, $2, $3, CASE WHEN $3 = 'verified'::match_status THEN NOW() END) \
             RETURNING {}",
            MATCH_COLUMNS
        );

        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(data.lost_item_id)
            .bind(data.found_item_id)
            .bind(data.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert match record: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_matches(&self, filter: MatchFilter) -> Result<Vec<MatchRecord>> {
        let sql = format!(
            "SELECT {} FROM matches \
             WHERE ($1::UUID IS NULL OR found_item_id = $1) \
             AND ($2::match_status IS NULL OR status = $2) \
             ORDER BY created_at ASC, id ASC",
            MATCH_COLUMNS
        );

        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(filter.found_item_id)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list match records: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn set_match_status(&self, id: Uuid, status: MatchStatus) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE matches
            SET status = $2,
                verified_at = CASE WHEN $2 = 'verified'::match_status THEN NOW() END
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update match record {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}
