use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::composition::ContactAccess;
use folio::config::Config;
use folio::db::create_pool;
use folio::fetcher::{ContentFetcher, PgContentFetcher, ResumeSource};
use folio::session::ResumeSession;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Folio preview v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    let fetcher = PgContentFetcher::new(db, config.storage_public_url.clone())
        .with_project_limit(config.project_limit);

    let source = match config.source() {
        Some(source) => source,
        None => {
            let resumes = fetcher.list_resumes().await?;
            info!(count = resumes.len(), "No source configured, using newest résumé");
            match resumes.first() {
                Some(resume) => ResumeSource::Resume(resume.id),
                None => {
                    warn!("No résumés stored; previewing an empty view");
                    ResumeSource::Resume(uuid::Uuid::nil())
                }
            }
        }
    };

    let mut session = ResumeSession::new(ContactAccess::Public);
    session.load(&fetcher, source).await;

    let json = serde_json::to_string_pretty(&session.view()).context("Failed to serialize view")?;
    println!("{json}");

    Ok(())
}
