//! MedVault Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across all MedVault components.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use format::{format_date, format_file_size};
pub use models::{
    ConfirmedUpload, NewReport, Report, ReportFinalize, ReportResponse, ReportStatus,
    ReportSummaries, TempUpload,
};
