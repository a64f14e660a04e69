pub mod report;
pub mod upload;

pub use report::{NewReport, Report, ReportFinalize, ReportResponse, ReportStatus};
pub use upload::{ConfirmedUpload, ReportSummaries, TempUpload};
