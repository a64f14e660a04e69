//! Analysis flow: submit every completed report for AI summarization.

use medvault_api_client::FileBackend;
use medvault_auth::SessionContext;
use medvault_core::{AppError, Report, ReportSummaries};
use std::sync::Arc;

pub struct AnalyzeService {
    backend: Arc<dyn FileBackend>,
}

impl AnalyzeService {
    pub fn new(backend: Arc<dyn FileBackend>) -> Self {
        Self { backend }
    }

    /// Summarize the given completed reports. Refuses an empty list without
    /// issuing a network call; failures surface as one message and mutate no
    /// report state.
    pub async fn analyze(
        &self,
        session: &SessionContext,
        reports: &[Report],
    ) -> Result<ReportSummaries, AppError> {
        if reports.is_empty() {
            return Err(AppError::InvalidInput(
                "No medical reports available to analyze. Please upload some reports first."
                    .to_string(),
            ));
        }

        // Paths and mime types stay paired; a record without a path (never
        // the case for completed records) is skipped in both lists.
        let mut file_paths = Vec::with_capacity(reports.len());
        let mut mime_types = Vec::with_capacity(reports.len());
        for report in reports {
            if let Some(path) = &report.file_path {
                file_paths.push(path.clone());
                mime_types.push(report.mimetype.clone());
            }
        }

        self.backend
            .analyze(&session.user_id, file_paths, mime_types)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %session.user_id, error = %e, "Analyze call failed");
                AppError::Backend(format!("Analysis failed: {}", e))
            })
    }
}
