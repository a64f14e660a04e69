use async_trait::async_trait;
use medvault_core::{AppError, NewReport, Report, ReportFinalize, ReportStatus};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::ReportStore;

/// In-memory report store for local runs and tests.
#[derive(Default)]
pub struct MemoryReportStore {
    records: RwLock<HashMap<Uuid, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records regardless of status or owner.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Stage a fully built record, bypassing the insert/finalize lifecycle.
    /// Lets tests and local seeds control timestamps and status directly.
    pub async fn seed(&self, report: Report) {
        self.records.write().await.insert(report.id, report);
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert(&self, new: NewReport) -> Result<Report, AppError> {
        let report = Report {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            file_name: new.file_name,
            uploaded_file_name: None,
            temp_id: Some(new.temp_id),
            mimetype: new.mimetype,
            size: new.size,
            status: ReportStatus::Pending,
            file_path: None,
            file_url: None,
            uploaded_at: None,
            upload_date: Some(chrono::Utc::now()),
        };

        self.records
            .write()
            .await
            .insert(report.id, report.clone());
        Ok(report)
    }

    async fn finalize(&self, id: Uuid, fin: ReportFinalize) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        let report = records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        report.uploaded_file_name = Some(fin.uploaded_file_name);
        report.file_path = Some(fin.file_path);
        report.file_url = Some(fin.file_url);
        report.uploaded_at = Some(fin.uploaded_at);
        report.status = ReportStatus::Completed;
        report.temp_id = None;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Report>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_completed(&self, user_id: &str) -> Result<Vec<Report>, AppError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id && r.status == ReportStatus::Completed)
            .cloned()
            .collect())
    }
}
