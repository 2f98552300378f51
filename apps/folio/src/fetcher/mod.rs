//! Content fetching.
//!
//! A `ContentFetcher` turns a résumé or preset id into one `ResumeRecord`.
//! The composition engine only ever sees the record, so any store that can
//! produce one (the hosted Postgres database, an in-memory fixture) plugs in
//! behind the trait.

pub mod postgres;
pub mod record;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FetchError;
use crate::fetcher::record::{PresetSummary, ResumeRecord, ResumeSummary};

pub use postgres::PgContentFetcher;

/// What to load: a stored résumé, or a saved preset over the shared catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ResumeSource {
    Resume(Uuid),
    Preset(Uuid),
}

impl ResumeSource {
    pub fn id(&self) -> Uuid {
        match self {
            ResumeSource::Resume(id) | ResumeSource::Preset(id) => *id,
        }
    }
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn list_resumes(&self) -> Result<Vec<ResumeSummary>, FetchError>;

    async fn list_presets(&self) -> Result<Vec<PresetSummary>, FetchError>;

    /// `Ok(None)` when the id is unknown.
    async fn fetch(&self, source: ResumeSource) -> Result<Option<ResumeRecord>, FetchError>;
}
