//! Test doubles for the flow tests: a scriptable file backend that records
//! every call, and a store wrapper that fails selected operations.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use medvault_api_client::FileBackend;
use medvault_auth::SessionContext;
use medvault_core::{AppError, ConfirmedUpload, NewReport, Report, ReportFinalize, ReportSummaries, TempUpload};
use medvault_db::{MemoryReportStore, ReportStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub fn test_session() -> SessionContext {
    SessionContext {
        user_id: "user-1".to_string(),
        email: "pat@example.com".to_string(),
    }
}

/// File backend double: answers with canned payloads, optionally fails
/// selected endpoints, and records every call in order.
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Mutex<Vec<String>>,
    pub fail_upload: bool,
    pub fail_confirm: bool,
    pub fail_cancel: bool,
    pub fail_delete: bool,
    pub fail_analyze: bool,
    temp_counter: AtomicUsize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn failing_confirm(mut self) -> Self {
        self.fail_confirm = true;
        self
    }

    pub fn failing_cancel(mut self) -> Self {
        self.fail_cancel = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn failing_analyze(mut self) -> Self {
        self.fail_analyze = true;
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl FileBackend for RecordingBackend {
    async fn upload_temp(
        &self,
        user_id: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<TempUpload> {
        self.record(format!("upload_temp:{}:{}", user_id, file_name));
        if self.fail_upload {
            anyhow::bail!("File upload failed on backend.");
        }

        let n = self.temp_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TempUpload {
            temp_id: format!("tmp-{}", n),
            original_name: file_name.to_string(),
            mimetype: content_type.to_string(),
            size: data.len() as i64,
        })
    }

    async fn confirm_upload(&self, temp_id: &str) -> Result<ConfirmedUpload> {
        self.record(format!("confirm:{}", temp_id));
        if self.fail_confirm {
            anyhow::bail!("API request failed with status 500: internal error");
        }

        Ok(ConfirmedUpload {
            name: format!("stored-{}.pdf", temp_id),
            file_path: format!("uploads/user-1/stored-{}.pdf", temp_id),
            url: format!("https://files.example.com/stored-{}.pdf", temp_id),
            uploaded_at: Utc.with_ymd_and_hms(2026, 1, 5, 15, 14, 0).unwrap(),
        })
    }

    async fn cancel_upload(&self, temp_id: &str) -> Result<()> {
        self.record(format!("cancel:{}", temp_id));
        if self.fail_cancel {
            anyhow::bail!("API request failed with status 500: internal error");
        }
        Ok(())
    }

    async fn delete_file(&self, user_id: &str, uploaded_file_name: &str) -> Result<()> {
        self.record(format!("delete_file:{}:{}", user_id, uploaded_file_name));
        if self.fail_delete {
            anyhow::bail!("API request failed with status 404: file not found");
        }
        Ok(())
    }

    async fn analyze(
        &self,
        user_id: &str,
        file_paths: Vec<String>,
        mime_types: Vec<String>,
    ) -> Result<ReportSummaries> {
        self.record(format!(
            "analyze:{}:{}:{}",
            user_id,
            file_paths.len(),
            mime_types.len()
        ));
        if self.fail_analyze {
            anyhow::bail!("Analysis failed.");
        }

        Ok(ReportSummaries {
            patient_summary: "All clear.".to_string(),
            doctor_summary: "No anomalies.".to_string(),
        })
    }
}

/// Store wrapper failing selected operations, for partial-saga tests.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryReportStore,
    pub fail_insert: bool,
    pub fail_finalize: bool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    pub fn failing_finalize(mut self) -> Self {
        self.fail_finalize = true;
        self
    }

    pub async fn record_count(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl ReportStore for FlakyStore {
    async fn insert(&self, new: NewReport) -> Result<Report, AppError> {
        if self.fail_insert {
            return Err(AppError::Internal("insert rejected".to_string()));
        }
        self.inner.insert(new).await
    }

    async fn finalize(&self, id: Uuid, fin: ReportFinalize) -> Result<(), AppError> {
        if self.fail_finalize {
            return Err(AppError::Internal("finalize rejected".to_string()));
        }
        self.inner.finalize(id, fin).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.inner.delete(id).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Report>, AppError> {
        self.inner.get(id).await
    }

    async fn list_completed(&self, user_id: &str) -> Result<Vec<Report>, AppError> {
        self.inner.list_completed(user_id).await
    }
}
