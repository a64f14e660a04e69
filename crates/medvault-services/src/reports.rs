//! Report listing and deletion.

use medvault_api_client::FileBackend;
use medvault_auth::SessionContext;
use medvault_core::{AppError, Report, ReportResponse};
use medvault_db::ReportStore;
use std::sync::Arc;
use uuid::Uuid;

pub struct ReportService {
    store: Arc<dyn ReportStore>,
    backend: Arc<dyn FileBackend>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, backend: Arc<dyn FileBackend>) -> Self {
        Self { store, backend }
    }

    /// All of the user's completed reports, newest first. The sort key is the
    /// store-assigned creation time, falling back to the finalize time, then
    /// epoch ("missing timestamp sorts as oldest").
    pub async fn list_reports(&self, session: &SessionContext) -> Result<Vec<Report>, AppError> {
        let mut reports = self.store.list_completed(&session.user_id).await?;
        reports.sort_by(|a, b| b.effective_timestamp().cmp(&a.effective_timestamp()));
        Ok(reports)
    }

    /// Listing with display-formatted sizes and dates.
    pub async fn list_report_responses(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<ReportResponse>, AppError> {
        let reports = self.list_reports(session).await?;
        Ok(reports.into_iter().map(ReportResponse::from).collect())
    }

    /// Delete a report: the record goes first, then the backing file is
    /// deleted best-effort. A failed file delete is logged and the flow still
    /// succeeds; the record must not resurface in listings.
    pub async fn delete_report(&self, session: &SessionContext, id: Uuid) -> Result<(), AppError> {
        let report = self
            .store
            .get(id)
            .await?
            .filter(|r| r.user_id == session.user_id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        self.store.delete(id).await?;

        if let Some(uploaded_file_name) = &report.uploaded_file_name {
            if let Err(e) = self
                .backend
                .delete_file(&report.user_id, uploaded_file_name)
                .await
            {
                // Record is already gone; the orphaned file is the accepted cost
                tracing::error!(
                    report_id = %id,
                    file = %uploaded_file_name,
                    error = %e,
                    "Failed to delete file from backend"
                );
            }
        }

        tracing::info!(report_id = %id, user_id = %session.user_id, "Report deleted");
        Ok(())
    }
}
