use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Result of staging file bytes on the backend (`POST /upload`).
/// The temp id is the handle for the later confirm or cancel call.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TempUpload {
    /// Backend-issued handle to the not-yet-finalized file
    #[validate(length(min = 1, message = "Temp id must not be empty"))]
    pub temp_id: String,
    /// Normalized original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    pub original_name: String,
    /// Content type (MIME type) as detected by the backend
    pub mimetype: String,
    /// File size in bytes
    pub size: i64,
}

/// Result of confirming a staged upload (`POST /upload/confirm`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedUpload {
    /// Stored filename (may differ from the original name)
    #[validate(length(min = 1, message = "Stored name must not be empty"))]
    pub name: String,
    /// Backend storage path
    #[validate(length(min = 1, message = "File path must not be empty"))]
    pub file_path: String,
    /// Public URL for viewing the file
    pub url: String,
    /// When the backend finalized the file
    pub uploaded_at: DateTime<Utc>,
}

/// Summaries returned by the analysis endpoint (`POST /analyze`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummaries {
    pub patient_summary: String,
    pub doctor_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_temp_upload_decodes_camel_case() {
        let json = r#"{
            "tempId": "tmp-123",
            "originalName": "scan.pdf",
            "mimetype": "application/pdf",
            "size": 2097152
        }"#;

        let temp: TempUpload = serde_json::from_str(json).unwrap();
        assert_eq!(temp.temp_id, "tmp-123");
        assert_eq!(temp.original_name, "scan.pdf");
        assert_eq!(temp.mimetype, "application/pdf");
        assert_eq!(temp.size, 2097152);
        assert!(temp.validate().is_ok());
    }

    #[test]
    fn test_temp_upload_rejects_empty_temp_id() {
        let temp = TempUpload {
            temp_id: "".to_string(),
            original_name: "scan.pdf".to_string(),
            mimetype: "application/pdf".to_string(),
            size: 1,
        };
        assert!(temp.validate().is_err());
    }

    #[test]
    fn test_confirmed_upload_decodes_camel_case() {
        let json = r#"{
            "name": "scan_1700000000.pdf",
            "filePath": "uploads/user-1/scan_1700000000.pdf",
            "url": "https://files.example.com/user-1/scan_1700000000.pdf",
            "uploadedAt": "2026-01-05T15:14:00Z"
        }"#;

        let confirmed: ConfirmedUpload = serde_json::from_str(json).unwrap();
        assert_eq!(confirmed.name, "scan_1700000000.pdf");
        assert_eq!(confirmed.file_path, "uploads/user-1/scan_1700000000.pdf");
        assert!(confirmed.validate().is_ok());
    }
}
