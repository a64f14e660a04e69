//! Configuration module
//!
//! Environment-driven configuration for the flows: backend base URL, record
//! store connection, and upload limits. Call `dotenvy::dotenv().ok()` at the
//! binary edge before `Config::from_env()`.

use std::env;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 25 * 1024 * 1024;

/// Content types the upload flow accepts before any network call is made.
/// Mirrors the file kinds the backend stores: PDF reports and scanned images.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: [&str; 7] = [
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
];

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the file-storage and analysis backend
    pub backend_url: String,
    /// Postgres connection string for the record store. Absent means the
    /// in-memory store (local/dev runs).
    pub database_url: Option<String>,
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            backend_url: env_or("MEDVAULT_API_URL", DEFAULT_BACKEND_URL),
            database_url: env::var("DATABASE_URL").ok(),
            max_file_size_bytes: env_parse("MEDVAULT_MAX_FILE_SIZE_BYTES")
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES),
            allowed_content_types: env_list("MEDVAULT_ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(default_allowed_content_types),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            database_url: None,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_content_types: default_allowed_content_types(),
        }
    }
}

fn default_allowed_content_types() -> Vec<String> {
    DEFAULT_ALLOWED_CONTENT_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Comma-separated list, entries trimmed, empties dropped.
fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = env::var(key).ok()?;
    let entries: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}
