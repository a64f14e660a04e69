//! MedVault flows
//!
//! The user-triggered operations: the upload saga, report listing, report
//! deletion, and analysis. Each flow is one sequential chain of awaited
//! calls; failures are caught at the flow boundary and surfaced as a single
//! user-facing message.

pub mod analyze;
pub mod reports;
pub mod upload;

pub use analyze::AnalyzeService;
pub use reports::ReportService;
pub use upload::{SagaStep, UploadFile, UploadSaga};
