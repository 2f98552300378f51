use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job as placed on a résumé or preset, with its resolved icon paths.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub job_id: Uuid,
    pub enabled: bool,
    pub selected_variant: Option<i32>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub icon_light_path: Option<String>,
    pub icon_dark_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub job_id: Uuid,
    pub bullets: Option<Vec<String>>,
    pub paragraphs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobVariantRow {
    pub job_id: Uuid,
    pub variant_index: i32,
    pub title: Option<String>,
    pub bullets: Option<Vec<String>>,
}

/// A skill name attached to a job or project.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnedSkillRow {
    pub owner_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub name: String,
    pub group_name: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub school: Option<String>,
    pub degree: Option<String>,
    pub major: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificateRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub link: Option<String>,
    pub requires_auth: bool,
    pub label: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub github_url: Option<String>,
    pub paragraphs: Option<Vec<String>>,
    pub icon_light_path: Option<String>,
    pub icon_dark_path: Option<String>,
}
