use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::matches::models::{CreateMatch, MatchFilter, MatchRecord, MatchStatus};
use crate::features::reports::models::{CreateReport, Report, ReportKind, ReportStatus};
use crate::modules::records::RecordStore;

#[derive(Default)]
struct Collections {
    lost_items: Vec<Report>,
    found_items: Vec<Report>,
    matches: Vec<MatchRecord>,
}

impl Collections {
    fn reports(&self, kind: ReportKind) -> &Vec<Report> {
        match kind {
            ReportKind::Lost => &self.lost_items,
            ReportKind::Found => &self.found_items,
        }
    }

    fn reports_mut(&mut self, kind: ReportKind) -> &mut Vec<Report> {
        match kind {
            ReportKind::Lost => &mut self.lost_items,
            ReportKind::Found => &mut self.found_items,
        }
    }
}

/// In-process record store; insertion order is arrival order.
///
/// Can be switched to an unavailable state where every call fails, which
/// stands in for a database outage.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: RwLock<Collections>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Internal("Record store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_report(&self, data: CreateReport) -> Result<Report> {
        self.check_available()?;

        let report = Report {
            id: Uuid::now_v7(),
            kind: data.kind,
            category: data.category,
            description: data.description,
            location_text: data.location_text,
            date_of_event: data.date_of_event,
            contact_email: data.contact_email,
            status: ReportStatus::Open,
            image_key: match data.kind {
                ReportKind::Lost => None,
                ReportKind::Found => data.image_key,
            },
            created_at: Utc::now(),
        };

        let mut collections = self.collections.write().await;
        collections.reports_mut(report.kind).push(report.clone());
        Ok(report)
    }

    async fn get_report(&self, kind: ReportKind, id: Uuid) -> Result<Option<Report>> {
        self.check_available()?;

        let collections = self.collections.read().await;
        Ok(collections.reports(kind).iter().find(|r| r.id == id).cloned())
    }

    async fn list_reports(
        &self,
        kind: ReportKind,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>> {
        self.check_available()?;

        let collections = self.collections.read().await;
        Ok(collections
            .reports(kind)
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    async fn set_report_status(
        &self,
        kind: ReportKind,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<()> {
        self.check_available()?;

        let mut collections = self.collections.write().await;
        if let Some(report) = collections.reports_mut(kind).iter_mut().find(|r| r.id == id) {
            report.status = status;
        }
        Ok(())
    }

    async fn insert_match(&self, data: CreateMatch) -> Result<MatchRecord> {
        self.check_available()?;

        let now = Utc::now();
        let record = MatchRecord {
            id: Uuid::now_v7(),
            lost_item_id: data.lost_item_id,
            found_item_id: data.found_item_id,
            status: data.status,
            created_at: now,
            verified_at: (data.status == MatchStatus::Verified).then_some(now),
        };

        self.collections.write().await.matches.push(record.clone());
        Ok(record)
    }

    async fn list_matches(&self, filter: MatchFilter) -> Result<Vec<MatchRecord>> {
        self.check_available()?;

        let collections = self.collections.read().await;
        Ok(collections
            .matches
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn set_match_status(&self, id: Uuid, status: MatchStatus) -> Result<()> {
        self.check_available()?;

        let mut collections = self.collections.write().await;
        if let Some(record) = collections.matches.iter_mut().find(|m| m.id == id) {
            record.status = status;
            record.verified_at = (status == MatchStatus::Verified).then(Utc::now);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_report(kind: ReportKind, category: &str) -> CreateReport {
        CreateReport {
            kind,
            category: category.to_string(),
            description: "black wallet".to_string(),
            location_text: "Library".to_string(),
            date_of_event: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            contact_email: "owner@example.com".to_string(),
            image_key: Some("private/found-1-wallet.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn test_reports_listed_in_arrival_order_per_kind() {
        let store = MemoryRecordStore::new();
        let first = store
            .insert_report(create_report(ReportKind::Found, "wallet"))
            .await
            .unwrap();
        let second = store
            .insert_report(create_report(ReportKind::Found, "phone"))
            .await
            .unwrap();
        store
            .insert_report(create_report(ReportKind::Lost, "keys"))
            .await
            .unwrap();

        let found = store.list_reports(ReportKind::Found, None).await.unwrap();
        let ids: Vec<Uuid> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(first.status, ReportStatus::Open);
    }

    #[tokio::test]
    async fn test_lost_reports_never_carry_an_image() {
        let store = MemoryRecordStore::new();
        let lost = store
            .insert_report(create_report(ReportKind::Lost, "wallet"))
            .await
            .unwrap();
        assert!(lost.image_key.is_none());
    }

    #[tokio::test]
    async fn test_status_filter_and_update() {
        let store = MemoryRecordStore::new();
        let report = store
            .insert_report(create_report(ReportKind::Lost, "wallet"))
            .await
            .unwrap();
        store
            .set_report_status(ReportKind::Lost, report.id, ReportStatus::Closed)
            .await
            .unwrap();

        let open = store
            .list_reports(ReportKind::Lost, Some(ReportStatus::Open))
            .await
            .unwrap();
        assert!(open.is_empty());

        let fetched = store
            .get_report(ReportKind::Lost, report.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, ReportStatus::Closed);
        assert!(store
            .get_report(ReportKind::Found, report.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_match_filters() {
        let store = MemoryRecordStore::new();
        let found_a = Uuid::now_v7();
        let found_b = Uuid::now_v7();
        for (found, status) in [
            (found_a, MatchStatus::Pending),
            (found_a, MatchStatus::Verified),
            (found_b, MatchStatus::Pending),
        ] {
            store
                .insert_match(CreateMatch {
                    lost_item_id: Uuid::now_v7(),
                    found_item_id: found,
                    status,
                })
                .await
                .unwrap();
        }

        let filter = MatchFilter {
            found_item_id: Some(found_a),
            status: Some(MatchStatus::Pending),
        };
        let pending_a = store.list_matches(filter).await.unwrap();
        assert_eq!(pending_a.len(), 1);
        assert!(pending_a[0].verified_at.is_none());

        let all = store.list_matches(MatchFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[1].verified_at.is_some());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryRecordStore::new();
        store.set_unavailable(true);

        let result = store
            .insert_report(create_report(ReportKind::Lost, "wallet"))
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(store.list_matches(MatchFilter::default()).await.is_err());
    }
}
