//! Postgres-backed content fetcher.
//!
//! Reads the same tables the editor writes. Every query is issued at runtime
//! (no compile-time checked macros), rows land in `models::*` and are turned
//! into a `ResumeRecord` by the pure `assemble_*` helpers below.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::composition::state::{SummaryVariant, Variant};
use crate::errors::FetchError;
use crate::fetcher::record::{
    AccountRecord, CertificateRecord, EducationRecord, JobRecord, PresetSummary, ProjectRecord,
    ResumeRecord, ResumeSummary, SkillRecord,
};
use crate::fetcher::{ContentFetcher, ResumeSource};
use crate::models::content::{
    AccountRow, CertificateRow, EducationRow, JobDescriptionRow, JobRow, JobVariantRow,
    OwnedSkillRow, ProjectRow, SkillRow,
};
use crate::models::resume::{
    DescriptionRow, PresetHeaderRow, PresetListRow, ResumeHeaderRow, ResumeListRow,
};
use crate::normalize::{build_period, experience_label, non_blank, public_storage_url};

pub const DEFAULT_PROJECT_LIMIT: i64 = 50;

#[derive(Debug, Clone)]
pub struct PgContentFetcher {
    pool: PgPool,
    storage_base: Option<String>,
    project_limit: i64,
}

impl PgContentFetcher {
    pub fn new(pool: PgPool, storage_base: Option<String>) -> Self {
        Self {
            pool,
            storage_base,
            project_limit: DEFAULT_PROJECT_LIMIT,
        }
    }

    pub fn with_project_limit(mut self, limit: i64) -> Self {
        self.project_limit = limit.max(0);
        self
    }

    fn media_url(&self, path: Option<String>) -> Option<String> {
        path.and_then(|p| public_storage_url(self.storage_base.as_deref(), &p))
    }

    async fn fetch_resume(&self, id: Uuid) -> Result<Option<ResumeRecord>, FetchError> {
        let header: Option<ResumeHeaderRow> = sqlx::query_as(
            r#"
            SELECT id, title, (profile_photo_id IS NOT NULL) AS has_photo, style,
                   summary_description_id
            FROM resumes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            debug!(%id, "Résumé not found");
            return Ok(None);
        };

        let style_key = style_key(header.id, header.style);

        let description: Option<DescriptionRow> = match header.summary_description_id {
            Some(description_id) => {
                sqlx::query_as("SELECT bullets, paragraphs FROM descriptions WHERE id = $1")
                    .bind(description_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };
        let summary_variants = summary_variants(description);

        let job_rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT rj.job_id, TRUE AS enabled, NULL::int4 AS selected_variant,
                   j.company, j.role, j.type AS employment_type, j.location,
                   j.start_date, j.end_date,
                   il.file_path AS icon_light_path, idk.file_path AS icon_dark_path
            FROM resume_jobs rj
            JOIN jobs j ON j.id = rj.job_id
            LEFT JOIN media il ON il.id = j.icon_light_id
            LEFT JOIN media idk ON idk.id = j.icon_dark_id
            WHERE rj.resume_id = $1
            ORDER BY rj.position ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let job_ids: Vec<Uuid> = job_rows.iter().map(|j| j.job_id).collect();
        let mut descriptions = group_by_owner(self.job_descriptions(&job_ids).await?, |d| d.job_id);
        let mut job_skills = skills_by_owner(self.job_skills(&job_ids).await?);

        let jobs = job_rows
            .into_iter()
            .map(|row| {
                let job_id = row.job_id;
                let icons = (
                    self.media_url(row.icon_light_path.clone()),
                    self.media_url(row.icon_dark_path.clone()),
                );
                assemble_resume_job(
                    row,
                    descriptions.remove(&job_id).unwrap_or_default(),
                    job_skills.remove(&job_id).unwrap_or_default(),
                    icons,
                )
            })
            .collect();

        let skills: Vec<SkillRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.name, g.name AS group_name, (rs.skill_id IS NOT NULL) AS enabled
            FROM skills s
            LEFT JOIN LATERAL (
                SELECT sg.name, sg.position
                FROM skill_group_skills sgs
                JOIN skill_groups sg ON sg.id = sgs.group_id
                WHERE sgs.skill_id = s.id
                ORDER BY sgs.position ASC
                LIMIT 1
            ) g ON TRUE
            LEFT JOIN resume_skills rs ON rs.skill_id = s.id AND rs.resume_id = $1
            ORDER BY g.position ASC NULLS LAST, s.name ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let accounts: Vec<AccountRow> = sqlx::query_as(
            r#"
            SELECT a.id, a.name, a.icon, a.link,
                   COALESCE(a.requires_auth, FALSE) AS requires_auth,
                   ra.label, COALESCE(ra.position, 0) AS position
            FROM resume_accounts ra
            JOIN accounts a ON a.id = ra.account_id
            WHERE ra.resume_id = $1
            ORDER BY ra.position ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let record = ResumeRecord {
            id: header.id,
            title: header.title,
            include_photo: header.has_photo,
            style_key,
            summary_variants,
            summary_variant: None,
            jobs,
            education: self.education().await?,
            certificates: self.certificates().await?,
            projects: self.projects(None).await?,
            skills: skills.into_iter().map(skill_record).collect(),
            accounts: accounts.into_iter().map(account_record).collect(),
        };

        info!(
            %id,
            jobs = record.jobs.len(),
            projects = record.projects.len(),
            skills = record.skills.len(),
            "Résumé fetched"
        );
        Ok(Some(record))
    }

    async fn fetch_preset(&self, id: Uuid) -> Result<Option<ResumeRecord>, FetchError> {
        let header: Option<PresetHeaderRow> = sqlx::query_as(
            r#"
            SELECT id, name, COALESCE(include_photo, FALSE) AS include_photo, summary_variant
            FROM presets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            debug!(%id, "Preset not found");
            return Ok(None);
        };

        let job_rows: Vec<JobRow> = sqlx::query_as(
            r#"
            SELECT pj.job_id, COALESCE(pj.enabled, TRUE) AS enabled, pj.selected_variant,
                   j.company, j.role, j.type AS employment_type, j.location,
                   j.start_date, j.end_date,
                   il.file_path AS icon_light_path, idk.file_path AS icon_dark_path
            FROM preset_jobs pj
            JOIN jobs j ON j.id = pj.job_id
            LEFT JOIN media il ON il.id = j.icon_light_id
            LEFT JOIN media idk ON idk.id = j.icon_dark_id
            WHERE pj.preset_id = $1
            ORDER BY pj.position ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let job_ids: Vec<Uuid> = job_rows.iter().map(|j| j.job_id).collect();
        let variant_rows: Vec<JobVariantRow> = sqlx::query_as(
            r#"
            SELECT job_id, variant_index, title, bullets
            FROM job_variants
            WHERE job_id = ANY($1)
            ORDER BY job_id, variant_index ASC
            "#,
        )
        .bind(&job_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut variants = group_by_owner(variant_rows, |v| v.job_id);
        let mut job_skills = skills_by_owner(self.job_skills(&job_ids).await?);

        let jobs = job_rows
            .into_iter()
            .map(|row| {
                let job_id = row.job_id;
                let icons = (
                    self.media_url(row.icon_light_path.clone()),
                    self.media_url(row.icon_dark_path.clone()),
                );
                assemble_preset_job(
                    row,
                    variants.remove(&job_id).unwrap_or_default(),
                    job_skills.remove(&job_id).unwrap_or_default(),
                    icons,
                )
            })
            .collect();

        let skills: Vec<SkillRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.name, g.name AS group_name, COALESCE(ps.enabled, FALSE) AS enabled
            FROM skills s
            LEFT JOIN LATERAL (
                SELECT sg.name, sg.position
                FROM skill_group_skills sgs
                JOIN skill_groups sg ON sg.id = sgs.group_id
                WHERE sgs.skill_id = s.id
                ORDER BY sgs.position ASC
                LIMIT 1
            ) g ON TRUE
            LEFT JOIN preset_skills ps ON ps.skill_id = s.id AND ps.preset_id = $1
            ORDER BY g.position ASC NULLS LAST, s.name ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        // Presets carry no account placements; every account is listed.
        let accounts: Vec<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, name, icon, link,
                   COALESCE(requires_auth, FALSE) AS requires_auth,
                   NULL::text AS label,
                   (ROW_NUMBER() OVER (ORDER BY name ASC))::int4 AS position
            FROM accounts
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let record = ResumeRecord {
            id: header.id,
            title: header.name,
            include_photo: header.include_photo,
            style_key: None,
            summary_variants: summary_variants(None),
            summary_variant: header.summary_variant,
            jobs,
            education: self.education().await?,
            certificates: self.certificates().await?,
            projects: self.projects(Some(header.id)).await?,
            skills: skills.into_iter().map(skill_record).collect(),
            accounts: accounts.into_iter().map(account_record).collect(),
        };

        info!(%id, jobs = record.jobs.len(), "Preset fetched");
        Ok(Some(record))
    }

    async fn job_descriptions(&self, job_ids: &[Uuid]) -> Result<Vec<JobDescriptionRow>, FetchError> {
        Ok(sqlx::query_as::<_, JobDescriptionRow>(
            r#"
            SELECT jd.job_id, d.bullets, d.paragraphs
            FROM job_descriptions jd
            JOIN descriptions d ON d.id = jd.description_id
            WHERE jd.job_id = ANY($1)
            ORDER BY jd.job_id, jd.position ASC
            "#,
        )
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn job_skills(&self, job_ids: &[Uuid]) -> Result<Vec<OwnedSkillRow>, FetchError> {
        Ok(sqlx::query_as::<_, OwnedSkillRow>(
            r#"
            SELECT DISTINCT js.job_id AS owner_id, s.name
            FROM job_skills js
            JOIN skills s ON s.id = js.skill_id
            WHERE js.job_id = ANY($1)
            ORDER BY owner_id, s.name
            "#,
        )
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Newest first.
    async fn education(&self) -> Result<Vec<EducationRecord>, FetchError> {
        let rows = sqlx::query_as::<_, EducationRow>(
            r#"
            SELECT id, school, degree, major, start_date, end_date
            FROM education
            ORDER BY start_date DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(education_record).collect())
    }

    async fn certificates(&self) -> Result<Vec<CertificateRecord>, FetchError> {
        let rows = sqlx::query_as::<_, CertificateRow>(
            r#"
            SELECT id, name, issuer, issue_date, expiry_date, credential_id, credential_url
            FROM certificates
            ORDER BY issue_date DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(certificate_record).collect())
    }

    /// Newest first for résumés; a preset lists its enabled projects in
    /// their stored order.
    async fn projects(&self, preset: Option<Uuid>) -> Result<Vec<ProjectRecord>, FetchError> {
        let rows = match preset {
            None => {
                sqlx::query_as::<_, ProjectRow>(
                    r#"
                    SELECT p.id, p.title, p.github_url, d.paragraphs,
                           il.file_path AS icon_light_path, idk.file_path AS icon_dark_path
                    FROM projects p
                    LEFT JOIN descriptions d ON d.id = p.description_id
                    LEFT JOIN media il ON il.id = p.project_icon_light_id
                    LEFT JOIN media idk ON idk.id = p.project_icon_dark_id
                    ORDER BY p.created_at DESC
                    LIMIT $1
                    "#,
                )
                .bind(self.project_limit)
                .fetch_all(&self.pool)
                .await?
            }
            Some(preset_id) => {
                sqlx::query_as::<_, ProjectRow>(
                    r#"
                    SELECT p.id, p.title, p.github_url, d.paragraphs,
                           il.file_path AS icon_light_path, idk.file_path AS icon_dark_path
                    FROM preset_projects pp
                    JOIN projects p ON p.id = pp.project_id
                    LEFT JOIN descriptions d ON d.id = p.description_id
                    LEFT JOIN media il ON il.id = p.project_icon_light_id
                    LEFT JOIN media idk ON idk.id = p.project_icon_dark_id
                    WHERE pp.preset_id = $1 AND COALESCE(pp.enabled, TRUE)
                    ORDER BY pp.position ASC
                    LIMIT $2
                    "#,
                )
                .bind(preset_id)
                .bind(self.project_limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let project_ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();
        let tags = sqlx::query_as::<_, OwnedSkillRow>(
            r#"
            SELECT ps.project_id AS owner_id, s.name
            FROM project_skills ps
            JOIN skills s ON s.id = ps.skill_id
            WHERE ps.project_id = ANY($1)
            ORDER BY ps.project_id, COALESCE(ps.position, 0) ASC
            "#,
        )
        .bind(&project_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut tags = skills_by_owner(tags);

        Ok(rows
            .into_iter()
            .map(|row| {
                let tags = tags.remove(&row.id).unwrap_or_default();
                let icons = (
                    self.media_url(row.icon_light_path.clone()),
                    self.media_url(row.icon_dark_path.clone()),
                );
                project_record(row, tags, icons)
            })
            .collect())
    }
}

#[async_trait]
impl ContentFetcher for PgContentFetcher {
    async fn list_resumes(&self) -> Result<Vec<ResumeSummary>, FetchError> {
        let rows = sqlx::query_as::<_, ResumeListRow>(
            "SELECT id, title FROM resumes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| ResumeSummary { id: r.id, title: r.title })
            .collect())
    }

    async fn list_presets(&self) -> Result<Vec<PresetSummary>, FetchError> {
        let rows = sqlx::query_as::<_, PresetListRow>(
            "SELECT id, name FROM presets ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| PresetSummary { id: r.id, name: r.name })
            .collect())
    }

    async fn fetch(&self, source: ResumeSource) -> Result<Option<ResumeRecord>, FetchError> {
        match source {
            ResumeSource::Resume(id) => self.fetch_resume(id).await,
            ResumeSource::Preset(id) => self.fetch_preset(id).await,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row assembly
// ────────────────────────────────────────────────────────────────────────────

/// Groups rows by owner id, keeping the query order within each group.
fn group_by_owner<T>(rows: Vec<T>, owner: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(owner(&row)).or_default().push(row);
    }
    grouped
}

fn skills_by_owner(rows: Vec<OwnedSkillRow>) -> HashMap<Uuid, Vec<String>> {
    let mut grouped: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(row.name);
    }
    grouped
}

/// The `ui` key of the stored style object. A bare string is accepted as the
/// key itself; any other shape is ignored so the layout falls back.
fn style_key(id: Uuid, style: Option<Value>) -> Option<String> {
    match style {
        None | Some(Value::Null) => None,
        Some(Value::String(key)) => Some(key),
        Some(Value::Object(map)) => map.get("ui").and_then(Value::as_str).map(str::to_string),
        Some(other) => {
            warn!(%id, "Ignoring malformed style {other}; using the default layout");
            None
        }
    }
}

/// Always one variant: a résumé without a stored summary gets an empty one.
fn summary_variants(description: Option<DescriptionRow>) -> Vec<SummaryVariant> {
    let description = description.unwrap_or_default();
    vec![SummaryVariant {
        bullet_lines: non_blank(description.bullets),
        paragraphs: non_blank(description.paragraphs),
    }]
}

fn job_variant(job: &JobRow, title: String, bullets: Vec<String>, skills: &[String]) -> Variant {
    Variant {
        title,
        period: build_period(job.start_date, job.end_date),
        employment_type: job.employment_type.clone(),
        location: job.location.clone(),
        summary: None,
        bullets,
        skills: skills.to_vec(),
    }
}

/// One variant per stored description; a job with none still gets a single
/// empty variant so it can be shown and selected.
fn assemble_resume_job(
    job: JobRow,
    descriptions: Vec<JobDescriptionRow>,
    skills: Vec<String>,
    (icon_light, icon_dark): (Option<String>, Option<String>),
) -> JobRecord {
    let label = experience_label(job.role.as_deref(), job.company.as_deref());

    let variants = if descriptions.is_empty() {
        vec![job_variant(&job, label.clone(), Vec::new(), &skills)]
    } else {
        descriptions
            .into_iter()
            .map(|d| Variant {
                summary: non_blank(d.paragraphs).into_iter().next(),
                ..job_variant(&job, label.clone(), non_blank(d.bullets), &skills)
            })
            .collect()
    };

    JobRecord {
        id: job.job_id,
        label,
        enabled: job.enabled,
        selected_variant: job.selected_variant,
        variants,
        icon_light,
        icon_dark,
    }
}

/// Preset jobs use the curated `job_variants`; untitled variants fall back to
/// the job label.
fn assemble_preset_job(
    job: JobRow,
    mut variant_rows: Vec<JobVariantRow>,
    skills: Vec<String>,
    (icon_light, icon_dark): (Option<String>, Option<String>),
) -> JobRecord {
    let label = experience_label(job.role.as_deref(), job.company.as_deref());
    variant_rows.sort_by_key(|v| v.variant_index);

    let variants = if variant_rows.is_empty() {
        vec![job_variant(&job, label.clone(), Vec::new(), &skills)]
    } else {
        variant_rows
            .into_iter()
            .map(|v| {
                let title = v
                    .title
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| label.clone());
                job_variant(&job, title, non_blank(v.bullets), &skills)
            })
            .collect()
    };

    JobRecord {
        id: job.job_id,
        label,
        enabled: job.enabled,
        selected_variant: job.selected_variant,
        variants,
        icon_light,
        icon_dark,
    }
}

fn skill_record(row: SkillRow) -> SkillRecord {
    SkillRecord {
        id: row.id,
        label: row.name,
        group: row.group_name.filter(|g| !g.trim().is_empty()),
        enabled: row.enabled,
    }
}

fn account_record(row: AccountRow) -> AccountRecord {
    AccountRecord {
        id: row.id,
        name: row.name.unwrap_or_default(),
        link: row.link.filter(|l| !l.trim().is_empty()),
        icon: row.icon,
        label: row.label,
        requires_auth: row.requires_auth,
        position: row.position,
    }
}

fn education_record(row: EducationRow) -> EducationRecord {
    EducationRecord {
        id: row.id,
        school: row.school.unwrap_or_else(|| "School".to_string()),
        degree: row.degree,
        field: row.major,
        period: build_period(row.start_date, row.end_date),
        summary: None,
        bullets: Vec::new(),
        skills: Vec::new(),
    }
}

fn certificate_record(row: CertificateRow) -> CertificateRecord {
    CertificateRecord {
        id: row.id,
        name: row.name.unwrap_or_else(|| "Certificate".to_string()),
        issuer: row.issuer,
        credential_id: row.credential_id,
        credential_url: row.credential_url,
        period: build_period(row.issue_date, row.expiry_date),
    }
}

fn project_record(
    row: ProjectRow,
    tags: Vec<String>,
    (icon_light, icon_dark): (Option<String>, Option<String>),
) -> ProjectRecord {
    ProjectRecord {
        id: row.id,
        title: row
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Project".to_string()),
        url: row.github_url.filter(|u| !u.trim().is_empty()),
        icon_light,
        icon_dark,
        paragraphs: non_blank(row.paragraphs),
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn job_row() -> JobRow {
        JobRow {
            job_id: Uuid::new_v4(),
            enabled: true,
            selected_variant: None,
            company: Some("Acme".to_string()),
            role: Some("Engineer".to_string()),
            employment_type: Some("Full-time".to_string()),
            location: None,
            start_date: NaiveDate::from_ymd_opt(2019, 3, 1),
            end_date: None,
            icon_light_path: None,
            icon_dark_path: None,
        }
    }

    #[test]
    fn test_style_key_shapes() {
        let id = Uuid::nil();
        assert_eq!(style_key(id, None), None);
        assert_eq!(style_key(id, Some(Value::Null)), None);
        assert_eq!(style_key(id, Some(json!({"ui": "plain"}))), Some("plain".to_string()));
        assert_eq!(style_key(id, Some(json!({"theme": "dark"}))), None);
        assert_eq!(style_key(id, Some(json!("MUI"))), Some("MUI".to_string()));
    }

    #[test]
    fn test_malformed_style_falls_back_without_dropping_content() {
        let id = Uuid::nil();
        for style in [json!(42), json!([1, 2]), json!(true)] {
            assert_eq!(style_key(id, Some(style)), None);
        }

        let mut record = crate::composition::mapper::tests::sample_record();
        record.style_key = style_key(id, Some(json!(42)));
        let state = crate::composition::map_record(record, crate::composition::ContactAccess::Public);
        assert_eq!(state.style(), crate::composition::ResumeStyle::Standard);
        assert!(!state.experiences().is_empty());
    }

    #[test]
    fn test_missing_summary_yields_one_empty_variant() {
        let variants = summary_variants(None);
        assert_eq!(variants, vec![SummaryVariant::default()]);

        let stored = summary_variants(Some(DescriptionRow {
            bullets: Some(vec!["Builds things".to_string(), "".to_string()]),
            paragraphs: None,
        }));
        assert_eq!(stored[0].bullet_lines, vec!["Builds things".to_string()]);
        assert!(stored[0].paragraphs.is_empty());

        let mut record = crate::composition::mapper::tests::sample_record();
        record.summary_variants = summary_variants(None);
        let mut state = crate::composition::map_record(record, crate::composition::ContactAccess::Public);
        assert!(state.set_summary_variant(0));
    }

    #[test]
    fn test_resume_job_without_descriptions_has_one_variant() {
        let job = assemble_resume_job(job_row(), vec![], vec!["Go".to_string()], (None, None));
        assert_eq!(job.label, "Engineer · Acme");
        assert_eq!(job.variants.len(), 1);
        assert_eq!(job.variants[0].period, "2019 — Present");
        assert_eq!(job.variants[0].skills, vec!["Go".to_string()]);
        assert!(job.variants[0].bullets.is_empty());
    }

    #[test]
    fn test_resume_job_one_variant_per_description() {
        let row = job_row();
        let descriptions = vec![
            JobDescriptionRow {
                job_id: row.job_id,
                bullets: Some(vec!["Shipped".to_string(), " ".to_string()]),
                paragraphs: Some(vec!["Backend work.".to_string()]),
            },
            JobDescriptionRow {
                job_id: row.job_id,
                bullets: None,
                paragraphs: None,
            },
        ];
        let job = assemble_resume_job(row, descriptions, vec![], (None, None));
        assert_eq!(job.variants.len(), 2);
        assert_eq!(job.variants[0].bullets, vec!["Shipped".to_string()]);
        assert_eq!(job.variants[0].summary.as_deref(), Some("Backend work."));
        assert_eq!(job.variants[1].summary, None);
    }

    #[test]
    fn test_preset_job_variants_sorted_and_titled() {
        let row = job_row();
        let job_id = row.job_id;
        let variants = vec![
            JobVariantRow {
                job_id,
                variant_index: 1,
                title: None,
                bullets: Some(vec!["Led".to_string()]),
            },
            JobVariantRow {
                job_id,
                variant_index: 0,
                title: Some("Backend".to_string()),
                bullets: None,
            },
        ];
        let job = assemble_preset_job(row, variants, vec![], (Some("light.svg".to_string()), None));
        assert_eq!(job.variants[0].title, "Backend");
        assert_eq!(job.variants[1].title, "Engineer · Acme");
        assert_eq!(job.variants[1].bullets, vec!["Led".to_string()]);
        assert_eq!(job.icon_light.as_deref(), Some("light.svg"));
    }

    #[test]
    fn test_group_by_owner_keeps_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            OwnedSkillRow { owner_id: a, name: "Rust".to_string() },
            OwnedSkillRow { owner_id: b, name: "Go".to_string() },
            OwnedSkillRow { owner_id: a, name: "SQL".to_string() },
        ];
        let grouped = skills_by_owner(rows);
        assert_eq!(grouped[&a], vec!["Rust".to_string(), "SQL".to_string()]);
        assert_eq!(grouped[&b], vec!["Go".to_string()]);
    }

    #[test]
    fn test_blank_fields_fall_back() {
        let project = project_record(
            ProjectRow {
                id: Uuid::nil(),
                title: Some("  ".to_string()),
                github_url: Some(String::new()),
                paragraphs: Some(vec!["".to_string(), "Text".to_string()]),
                icon_light_path: None,
                icon_dark_path: None,
            },
            vec![],
            (None, None),
        );
        assert_eq!(project.title, "Project");
        assert_eq!(project.url, None);
        assert_eq!(project.paragraphs, vec!["Text".to_string()]);

        let skill = skill_record(SkillRow {
            id: Uuid::nil(),
            name: "Docker".to_string(),
            group_name: Some(" ".to_string()),
            enabled: false,
        });
        assert_eq!(skill.group, None);
    }
}
