//! HTTP client for the MedVault file backend.
//!
//! The backend owns file storage (temp-store, confirm, cancel, delete) and
//! the analysis endpoint. This crate provides the raw request plumbing plus
//! typed domain methods, and the `FileBackend` trait the flows consume.

pub mod api;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// JSON envelope every backend response wraps its payload in.
#[derive(Debug, serde::Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the file backend.
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from MEDVAULT_API_URL (default http://localhost:3000).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("MEDVAULT_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and deserialize the response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        let response = check_status(response).await?;

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// POST a JSON body where no response payload is required.
    pub async fn post_json_no_content<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        check_status(response).await?;
        Ok(())
    }

    /// POST a multipart form and deserialize the response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        let response = check_status(response).await?;

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context("Failed to send request")?;

        check_status(response).await?;
        Ok(())
    }
}

/// Map a non-success response to an error carrying the backend's `message`
/// field when it sends one, else status plus raw body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&error_text) {
        return Err(anyhow::anyhow!("{}", body.message));
    }

    Err(anyhow::anyhow!(
        "API request failed with status {}: {}",
        status,
        error_text
    ))
}

// Re-export the trait and payload types for convenience.
pub use api::FileBackend;
pub use medvault_core::models::{ConfirmedUpload, ReportSummaries, TempUpload};
