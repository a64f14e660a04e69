//! MedVault record store
//!
//! Report persistence behind the `ReportStore` trait: a Postgres-backed
//! implementation for deployments and an in-memory implementation for local
//! runs and tests.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryReportStore;
pub use postgres::PgReportStore;
pub use store::ReportStore;
