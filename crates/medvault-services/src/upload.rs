//! Upload saga
//!
//! Four steps (temp upload, metadata insert, confirm, finalize) with named
//! compensating actions. Success leaves exactly one `completed`
//! record and a durably stored file; failure at any step rolls the attempt
//! back best-effort and surfaces one message.

use medvault_api_client::FileBackend;
use medvault_auth::SessionContext;
use medvault_core::{
    validation::validate_upload, AppError, Config, ErrorMetadata, NewReport, Report,
    ReportFinalize,
};
use medvault_db::ReportStore;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// File selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// The saga's steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaStep {
    /// Stage file bytes on the backend
    TempUpload,
    /// Insert the `pending` record referencing the temp id
    InsertMetadata,
    /// Promote the staged file to durable storage
    ConfirmUpload,
    /// Flip the record to `completed` with final paths
    Finalize,
}

impl SagaStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaStep::TempUpload => "temp_upload",
            SagaStep::InsertMetadata => "insert_metadata",
            SagaStep::ConfirmUpload => "confirm_upload",
            SagaStep::Finalize => "finalize",
        }
    }
}

/// Compensating action registered when a step commits; run in reverse
/// registration order when a later step fails.
enum Compensation {
    /// Delete the metadata record inserted at `InsertMetadata`
    DeleteRecord(Uuid),
    /// Release the staged temp file via the cancel endpoint
    CancelTemp(String),
}

impl Compensation {
    fn as_str(&self) -> &'static str {
        match self {
            Compensation::DeleteRecord(_) => "delete_record",
            Compensation::CancelTemp(_) => "cancel_temp",
        }
    }
}

pub struct UploadSaga {
    store: Arc<dyn ReportStore>,
    backend: Arc<dyn FileBackend>,
    config: Config,
}

impl UploadSaga {
    pub fn new(store: Arc<dyn ReportStore>, backend: Arc<dyn FileBackend>, config: Config) -> Self {
        Self {
            store,
            backend,
            config,
        }
    }

    /// Run the saga for one selected file. On failure every committed step's
    /// compensation runs (best-effort) and the error carries the user-facing
    /// "Upload failed: ..." message.
    pub async fn run(
        &self,
        session: &SessionContext,
        file: UploadFile,
    ) -> Result<Report, AppError> {
        // Local pre-validation: a file rejected here creates no remote state.
        validate_upload(&self.config, &file.name, &file.content_type, file.data.len())?;

        let mut compensations: Vec<Compensation> = Vec::new();

        match self.execute(session, file, &mut compensations).await {
            Ok(report) => {
                tracing::info!(
                    report_id = %report.id,
                    user_id = %session.user_id,
                    file_name = %report.file_name,
                    "Upload completed"
                );
                Ok(report)
            }
            Err((step, err)) => {
                tracing::error!(
                    step = step.as_str(),
                    user_id = %session.user_id,
                    error = %err,
                    "Upload saga failed, compensating"
                );
                self.compensate(compensations).await;
                Err(AppError::Backend(format!(
                    "Upload failed: {}",
                    err.client_message()
                )))
            }
        }
    }

    async fn execute(
        &self,
        session: &SessionContext,
        file: UploadFile,
        compensations: &mut Vec<Compensation>,
    ) -> Result<Report, (SagaStep, AppError)> {
        // Step 1: stage the bytes. An unreferenced temp file is
        // orphan-collected by the backend, so this step alone registers no
        // compensation.
        let temp = self
            .backend
            .upload_temp(&session.user_id, &file.name, &file.content_type, file.data)
            .await
            .map_err(|e| (SagaStep::TempUpload, AppError::Backend(e.to_string())))?;

        // Step 2: insert the pending record. Once metadata references the
        // temp id, rollback means delete the record first, then cancel the
        // temp file (registered in reverse of that order).
        let new = NewReport {
            user_id: session.user_id.clone(),
            file_name: temp.original_name.clone(),
            temp_id: temp.temp_id.clone(),
            mimetype: temp.mimetype.clone(),
            size: temp.size,
        };
        new.validate()
            .map_err(|e| (SagaStep::InsertMetadata, AppError::from(e)))?;

        let report = self
            .store
            .insert(new)
            .await
            .map_err(|e| (SagaStep::InsertMetadata, e))?;
        compensations.push(Compensation::CancelTemp(temp.temp_id.clone()));
        compensations.push(Compensation::DeleteRecord(report.id));

        // Step 3: confirm. The fixed message is what the user sees when the
        // backend refuses to promote the staged file.
        let confirmed = self.backend.confirm_upload(&temp.temp_id).await.map_err(|e| {
            tracing::error!(temp_id = %temp.temp_id, error = %e, "Confirm call failed");
            (
                SagaStep::ConfirmUpload,
                AppError::Backend("Failed to confirm file save on backend.".to_string()),
            )
        })?;

        // Step 4: finalize the record with the confirmed paths.
        let finalize = ReportFinalize {
            uploaded_file_name: confirmed.name.clone(),
            file_path: confirmed.file_path.clone(),
            file_url: confirmed.url.clone(),
            uploaded_at: confirmed.uploaded_at,
        };
        self.store
            .finalize(report.id, finalize)
            .await
            .map_err(|e| (SagaStep::Finalize, e))?;

        let mut completed = report;
        completed.uploaded_file_name = Some(confirmed.name);
        completed.file_path = Some(confirmed.file_path);
        completed.file_url = Some(confirmed.url);
        completed.uploaded_at = Some(confirmed.uploaded_at);
        completed.status = medvault_core::ReportStatus::Completed;
        completed.temp_id = None;

        Ok(completed)
    }

    /// Run registered compensations in reverse order. A failing compensation
    /// is logged and skipped; it never masks the original error.
    async fn compensate(&self, compensations: Vec<Compensation>) {
        for compensation in compensations.into_iter().rev() {
            let name = compensation.as_str();
            let result = match &compensation {
                Compensation::DeleteRecord(id) => self.store.delete(*id).await,
                Compensation::CancelTemp(temp_id) => self
                    .backend
                    .cancel_upload(temp_id)
                    .await
                    .map_err(|e| AppError::Backend(e.to_string())),
            };

            if let Err(e) = result {
                tracing::error!(compensation = name, error = %e, "Compensating action failed");
            }
        }
    }
}
