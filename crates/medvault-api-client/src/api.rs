//! Domain methods for the file backend.
//!
//! Payload types live in `medvault_core::models`; the `FileBackend` trait is
//! the seam the flows consume, so tests can substitute a scripted double.

use anyhow::{Context, Result};
use async_trait::async_trait;
use medvault_core::models::{ConfirmedUpload, ReportSummaries, TempUpload};
use serde_json::json;
use validator::Validate;

use crate::{BackendClient, Envelope};

/// Reject responses that decode but violate the payload contract (empty temp
/// id, missing paths) before they reach a flow.
fn validate_payload<T: Validate>(payload: &T) -> Result<()> {
    payload
        .validate()
        .map_err(|e| anyhow::anyhow!("Backend returned an invalid payload: {}", e))
}

/// Remote file-storage and analysis operations consumed by the flows.
#[async_trait]
pub trait FileBackend: Send + Sync {
    /// Stage file bytes in temp storage; returns the handle for confirm or
    /// cancel.
    async fn upload_temp(
        &self,
        user_id: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<TempUpload>;

    /// Promote a staged upload to durable storage.
    async fn confirm_upload(&self, temp_id: &str) -> Result<ConfirmedUpload>;

    /// Release a staged upload that will not be confirmed.
    async fn cancel_upload(&self, temp_id: &str) -> Result<()>;

    /// Delete a durably stored file.
    async fn delete_file(&self, user_id: &str, uploaded_file_name: &str) -> Result<()>;

    /// Submit all stored report files for summarization.
    async fn analyze(
        &self,
        user_id: &str,
        file_paths: Vec<String>,
        mime_types: Vec<String>,
    ) -> Result<ReportSummaries>;
}

#[async_trait]
impl FileBackend for BackendClient {
    async fn upload_temp(
        &self,
        user_id: &str,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<TempUpload> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .with_context(|| format!("Invalid content type: {}", content_type))?;

        let form = reqwest::multipart::Form::new()
            .part("pdf", part)
            .text("userId", user_id.to_string());

        let envelope: Envelope<TempUpload> = self.post_multipart("/upload", form).await?;
        validate_payload(&envelope.data)?;
        Ok(envelope.data)
    }

    async fn confirm_upload(&self, temp_id: &str) -> Result<ConfirmedUpload> {
        let envelope: Envelope<ConfirmedUpload> = self
            .post_json("/upload/confirm", &json!({ "tempId": temp_id }))
            .await?;
        validate_payload(&envelope.data)?;
        Ok(envelope.data)
    }

    async fn cancel_upload(&self, temp_id: &str) -> Result<()> {
        self.post_json_no_content("/upload/cancel", &json!({ "tempId": temp_id }))
            .await
    }

    async fn delete_file(&self, user_id: &str, uploaded_file_name: &str) -> Result<()> {
        self.delete(&format!(
            "/files/{}/{}",
            urlencoding::encode(user_id),
            urlencoding::encode(uploaded_file_name)
        ))
        .await
    }

    async fn analyze(
        &self,
        user_id: &str,
        file_paths: Vec<String>,
        mime_types: Vec<String>,
    ) -> Result<ReportSummaries> {
        let envelope: Envelope<ReportSummaries> = self
            .post_json(
                "/analyze",
                &json!({
                    "userId": user_id,
                    "filePaths": file_paths,
                    "mimeTypes": mime_types,
                }),
            )
            .await?;
        Ok(envelope.data)
    }
}
