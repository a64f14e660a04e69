//! MedVault CLI: manage medical report uploads against the file backend.
//!
//! Set MEDVAULT_API_URL and MEDVAULT_USER_ID (plus DATABASE_URL for a
//! persistent record store; without it records live only for one invocation).

use anyhow::Context;
use clap::{Parser, Subcommand};
use medvault_api_client::BackendClient;
use medvault_auth::SessionContext;
use medvault_cli::{content_type_for_path, init_tracing};
use medvault_core::{Config, ReportResponse};
use medvault_db::{MemoryReportStore, PgReportStore, ReportStore};
use medvault_services::{AnalyzeService, ReportService, UploadFile, UploadSaga};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "medvault", about = "MedVault medical report CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a report (PDF or scanned image)
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Override the content type guessed from the extension
        #[arg(long)]
        content_type: Option<String>,
    },
    /// List completed reports, newest first
    List,
    /// Delete a report by ID
    Delete {
        /// Report UUID
        id: Uuid,
    },
    /// Run AI analysis over every completed report
    Analyze,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn session_from_env() -> anyhow::Result<SessionContext> {
    let user_id = std::env::var("MEDVAULT_USER_ID")
        .context("Not signed in. Set MEDVAULT_USER_ID (and MEDVAULT_USER_EMAIL)")?;
    let email = std::env::var("MEDVAULT_USER_EMAIL").unwrap_or_default();
    Ok(SessionContext { user_id, email })
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ReportStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .context("Failed to connect to the record store")?;
            let store = PgReportStore::new(pool);
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(MemoryReportStore::new())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let session = session_from_env()?;
    let backend = Arc::new(BackendClient::new(&config.backend_url)?);
    let store = build_store(&config).await?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { file, content_type } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .context("Path has no file name")?;
            let content_type = content_type.unwrap_or_else(|| content_type_for_path(&file));

            let saga = UploadSaga::new(store, backend, config);
            let report = saga
                .run(&session, UploadFile { name, content_type, data })
                .await?;
            print_json(&ReportResponse::from(report))?;
        }
        Commands::List => {
            let service = ReportService::new(store, backend);
            let reports = service.list_report_responses(&session).await?;
            print_json(&reports)?;
        }
        Commands::Delete { id } => {
            let service = ReportService::new(store, backend);
            service.delete_report(&session, id).await?;
            print_json(
                &serde_json::json!({ "success": true, "message": format!("Report {} deleted", id) }),
            )?;
        }
        Commands::Analyze => {
            let reports = ReportService::new(store, backend.clone())
                .list_reports(&session)
                .await?;
            let summaries = AnalyzeService::new(backend).analyze(&session, &reports).await?;
            print_json(&summaries)?;
        }
    }

    Ok(())
}
