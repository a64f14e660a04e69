use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::format::{format_date, format_file_size};

/// Lifecycle state gating visibility in the report list.
///
/// `Pending` records are write-in-progress artifacts of the upload saga and
/// must never appear in listings; only `Completed` records are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReportStatus::Pending),
            "completed" => Some(ReportStatus::Completed),
            _ => None,
        }
    }
}

/// Medical report record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    /// Original filename as selected by the user
    pub file_name: String,
    /// Stored filename, set once the upload is confirmed
    pub uploaded_file_name: Option<String>,
    /// Handle to an unconfirmed backend upload; present only mid-saga
    pub temp_id: Option<String>,
    pub mimetype: String,
    pub size: i64,
    pub status: ReportStatus,
    pub file_path: Option<String>,
    pub file_url: Option<String>,
    /// Backend-reported finalize time, set once the upload is confirmed
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Store-assigned creation time
    pub upload_date: Option<DateTime<Utc>>,
}

impl Report {
    /// Sort key for listings: creation time, else finalize time, else epoch.
    /// A record missing both timestamps sorts as oldest.
    pub fn effective_timestamp(&self) -> DateTime<Utc> {
        self.upload_date
            .or(self.uploaded_at)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Fields for inserting a new `pending` record at saga step 2.
#[derive(Debug, Clone, Validate)]
pub struct NewReport {
    pub user_id: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    #[validate(length(min = 1, message = "Temp id must not be empty"))]
    pub temp_id: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub mimetype: String,
    #[validate(range(min = 1, message = "File size must be at least 1 byte"))]
    pub size: i64,
}

/// Partial update applied at saga step 4: final paths, completed status,
/// temp id cleared.
#[derive(Debug, Clone)]
pub struct ReportFinalize {
    pub uploaded_file_name: String,
    pub file_path: String,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Listing entry with display-formatted size and date.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub id: Uuid,
    pub file_name: String,
    pub mimetype: String,
    pub size: i64,
    pub size_display: String,
    pub uploaded_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        let uploaded = report.upload_date.or(report.uploaded_at);
        ReportResponse {
            id: report.id,
            file_name: report.file_name,
            mimetype: report.mimetype,
            size: report.size,
            size_display: format_file_size(report.size),
            uploaded_display: format_date(uploaded),
            file_url: report.file_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn completed_report(size: i64) -> Report {
        Report {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            file_name: "scan.pdf".to_string(),
            uploaded_file_name: Some("scan_1700000000.pdf".to_string()),
            temp_id: None,
            mimetype: "application/pdf".to_string(),
            size,
            status: ReportStatus::Completed,
            file_path: Some("uploads/user-1/scan_1700000000.pdf".to_string()),
            file_url: Some("https://files.example.com/scan_1700000000.pdf".to_string()),
            uploaded_at: Some(Utc::now()),
            upload_date: Some(Utc::now()),
        }
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ReportStatus::parse("pending"), Some(ReportStatus::Pending));
        assert_eq!(
            ReportStatus::parse("completed"),
            Some(ReportStatus::Completed)
        );
        assert_eq!(ReportStatus::parse("unknown"), None);
        assert_eq!(ReportStatus::Pending.as_str(), "pending");
        assert_eq!(ReportStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::from_str::<ReportStatus>("\"pending\"").unwrap(),
            ReportStatus::Pending
        );
    }

    #[test]
    fn test_effective_timestamp_fallback() {
        let mut report = completed_report(100);
        let created = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap();
        let finalized = Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 30).unwrap();

        report.upload_date = Some(created);
        report.uploaded_at = Some(finalized);
        assert_eq!(report.effective_timestamp(), created);

        report.upload_date = None;
        assert_eq!(report.effective_timestamp(), finalized);

        report.uploaded_at = None;
        assert_eq!(
            report.effective_timestamp(),
            Utc.timestamp_opt(0, 0).unwrap()
        );
    }

    #[test]
    fn test_report_response_from_report() {
        let report = completed_report(2 * 1024 * 1024);
        let id = report.id;
        let response = ReportResponse::from(report);

        assert_eq!(response.id, id);
        assert_eq!(response.file_name, "scan.pdf");
        assert_eq!(response.size_display, "2 MB");
        assert!(response.file_url.is_some());
        assert_ne!(response.uploaded_display, "Unknown date");
    }

    #[test]
    fn test_new_report_validation() {
        use validator::Validate;

        let valid = NewReport {
            user_id: "user-1".to_string(),
            file_name: "scan.pdf".to_string(),
            temp_id: "tmp-1".to_string(),
            mimetype: "application/pdf".to_string(),
            size: 1,
        };
        assert!(valid.validate().is_ok());

        let empty_temp = NewReport {
            temp_id: "".to_string(),
            ..valid.clone()
        };
        assert!(empty_temp.validate().is_err());

        let zero_size = NewReport { size: 0, ..valid };
        assert!(zero_size.validate().is_err());
    }
}
