use async_trait::async_trait;
use chrono::{DateTime, Utc};
use medvault_core::{AppError, NewReport, Report, ReportFinalize, ReportStatus};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::store::ReportStore;

const REPORT_COLUMNS: &str = "id, user_id, file_name, uploaded_file_name, temp_id, mimetype, \
     size, status, file_path, file_url, uploaded_at, upload_date";

/// Postgres-backed report store.
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the bundled migrations (creates the reports table).
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, new: NewReport) -> Result<Report, AppError> {
        // Dynamic SQLx queries to avoid requiring DATABASE_URL/sqlx prepare.
        // upload_date is server-assigned, so RETURNING hands back the full row.
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO reports (
                id, user_id, file_name, temp_id, mimetype, size, status, upload_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', NOW())
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&new.user_id)
        .bind(&new.file_name)
        .bind(&new.temp_id)
        .bind(&new.mimetype)
        .bind(new.size)
        .fetch_one(&self.pool)
        .await?;

        row.into_report()
    }

    async fn finalize(&self, id: Uuid, fin: ReportFinalize) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET uploaded_file_name = $2,
                file_path = $3,
                file_url = $4,
                uploaded_at = $5,
                status = 'completed',
                temp_id = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fin.uploaded_file_name)
        .bind(&fin.file_path)
        .bind(&fin.file_url)
        .bind(fin.uploaded_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Report>, AppError> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_report()).transpose()
    }

    async fn list_completed(&self, user_id: &str) -> Result<Vec<Report>, AppError> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {} FROM reports WHERE user_id = $1 AND status = 'completed'",
            REPORT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_report()).collect()
    }
}

/// Raw row with the status still as text; decoded into the domain model by
/// `into_report`.
#[derive(Debug)]
struct ReportRow {
    id: Uuid,
    user_id: String,
    file_name: String,
    uploaded_file_name: Option<String>,
    temp_id: Option<String>,
    mimetype: String,
    size: i64,
    status: String,
    file_path: Option<String>,
    file_url: Option<String>,
    uploaded_at: Option<DateTime<Utc>>,
    upload_date: Option<DateTime<Utc>>,
}

impl ReportRow {
    fn into_report(self) -> Result<Report, AppError> {
        let status = ReportStatus::parse(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown report status '{}'", self.status))
        })?;

        Ok(Report {
            id: self.id,
            user_id: self.user_id,
            file_name: self.file_name,
            uploaded_file_name: self.uploaded_file_name,
            temp_id: self.temp_id,
            mimetype: self.mimetype,
            size: self.size,
            status,
            file_path: self.file_path,
            file_url: self.file_url,
            uploaded_at: self.uploaded_at,
            upload_date: self.upload_date,
        })
    }
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ReportRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ReportRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            file_name: row.get("file_name"),
            uploaded_file_name: row.get("uploaded_file_name"),
            temp_id: row.get("temp_id"),
            mimetype: row.get("mimetype"),
            size: row.get("size"),
            status: row.get("status"),
            file_path: row.get("file_path"),
            file_url: row.get("file_url"),
            uploaded_at: row.get("uploaded_at"),
            upload_date: row.get("upload_date"),
        })
    }
}
