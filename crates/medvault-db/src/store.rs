use async_trait::async_trait;
use medvault_core::{AppError, NewReport, Report, ReportFinalize};
use uuid::Uuid;

/// Document-store interface for report records: insert, partial update,
/// delete by id, and the completed-only listing query.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a new record with `status = pending` and a server-assigned
    /// creation timestamp. Returns the stored record.
    async fn insert(&self, new: NewReport) -> Result<Report, AppError>;

    /// Partial update finalizing a record: stored name, paths, finalize
    /// timestamp, `status = completed`, temp id cleared.
    async fn finalize(&self, id: Uuid, fin: ReportFinalize) -> Result<(), AppError>;

    /// Delete a record by id. Deleting an absent record is not an error;
    /// compensation paths may race with user-initiated deletes.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Fetch a record by id.
    async fn get(&self, id: Uuid) -> Result<Option<Report>, AppError>;

    /// All of a user's `completed` records, in store order. Pending records
    /// never leak into this listing; callers sort for display.
    async fn list_completed(&self, user_id: &str) -> Result<Vec<Report>, AppError>;
}
