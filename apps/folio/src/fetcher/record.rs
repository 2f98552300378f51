//! Raw fetch results, before composition.
//!
//! These are what the content store hands back for one résumé or preset: the
//! skills catalogue is still flat (group membership per skill), accounts still
//! carry their true links, and variant selections are unvalidated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::composition::state::{SummaryVariant, Variant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub title: String,
    pub include_photo: bool,
    /// Free-text layout key from the stored `style.ui` field.
    pub style_key: Option<String>,
    pub summary_variants: Vec<SummaryVariant>,
    /// Stored selection; may be negative or out of range.
    pub summary_variant: Option<i32>,
    pub jobs: Vec<JobRecord>,
    pub education: Vec<EducationRecord>,
    pub certificates: Vec<CertificateRecord>,
    pub projects: Vec<ProjectRecord>,
    pub skills: Vec<SkillRecord>,
    pub accounts: Vec<AccountRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub label: String,
    pub enabled: bool,
    pub selected_variant: Option<i32>,
    pub variants: Vec<Variant>,
    pub icon_light: Option<String>,
    pub icon_dark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub id: Uuid,
    pub school: String,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub period: String,
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: Uuid,
    pub name: String,
    pub issuer: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub icon_light: Option<String>,
    pub icon_dark: Option<String>,
    pub paragraphs: Vec<String>,
    /// Skill names in display order.
    pub tags: Vec<String>,
}

/// One catalogue skill with its (first) group membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: Uuid,
    pub label: String,
    pub group: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: Uuid,
    pub name: String,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub requires_auth: bool,
    pub position: i32,
}
