use anyhow::{Context, Result};
use uuid::Uuid;

use crate::fetcher::ResumeSource;

/// Preview configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage_public_url: Option<String>,
    pub resume_id: Option<Uuid>,
    pub preset_id: Option<Uuid>,
    pub project_limit: i64,
    pub db_max_connections: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            storage_public_url: optional_env("STORAGE_PUBLIC_URL"),
            resume_id: optional_env("RESUME_ID")
                .map(|v| v.parse::<Uuid>())
                .transpose()
                .context("RESUME_ID must be a UUID")?,
            preset_id: optional_env("PRESET_ID")
                .map(|v| v.parse::<Uuid>())
                .transpose()
                .context("PRESET_ID must be a UUID")?,
            project_limit: optional_env("PROJECT_LIMIT")
                .unwrap_or_else(|| "50".to_string())
                .parse::<i64>()
                .context("PROJECT_LIMIT must be an integer")?,
            db_max_connections: optional_env("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Explicitly configured source; a preset takes precedence over a résumé.
    pub fn source(&self) -> Option<ResumeSource> {
        self.preset_id
            .map(ResumeSource::Preset)
            .or(self.resume_id.map(ResumeSource::Resume))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
