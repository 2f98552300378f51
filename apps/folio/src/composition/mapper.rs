//! Row-to-presentation mapper — turns one fetched record into a fresh
//! `CompositionState`.
//!
//! Defaulting rules, all applied here and nowhere else:
//!
//! | Field                     | Rule                                                   |
//! |---------------------------|--------------------------------------------------------|
//! | skill group               | first stored group, else `"Other"`                     |
//! | skill `enabled`           | stored flag OR referenced by any job variant / project |
//! | `selected_variant`        | stored value clamped into `0..variants.len()`, else 0  |
//! | `summary_variant_index`   | stored value clamped into range, else 0                |
//! | `summary_format`          | both / bullet / paragraph per selected variant content |
//! | project flags             | enabled, show icon, show media                         |
//! | education / certificates  | enabled                                                |
//! | account `url`             | withheld when `requires_auth` and access not granted   |
//!
//! Fetch failures and missing records compose to the empty state.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::composition::state::{
    CertificateEntry, CompositionState, ContactAccount, EducationEntry, ExperienceEntry,
    ProjectEntry, ProjectTag, ResumeOptions, ResumeStyle, SkillGroup, SkillItem, SummaryFormat,
};
use crate::composition::visibility::label_mismatches;
use crate::errors::FetchError;
use crate::fetcher::record::{
    AccountRecord, CertificateRecord, EducationRecord, JobRecord, ProjectRecord, ResumeRecord,
    SkillRecord,
};
use crate::normalize::to_slug;

/// Group for catalogue skills that belong to no group.
pub const FALLBACK_SKILL_GROUP: &str = "Other";

/// Whether withheld contact links may be copied into the state.
///
/// Decided outside the engine (session/visibility rules); the mapper only
/// obeys it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactAccess {
    #[default]
    Public,
    Granted,
}

impl ContactAccess {
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            ContactAccess::Granted
        } else {
            ContactAccess::Public
        }
    }

    pub fn is_granted(self) -> bool {
        self == ContactAccess::Granted
    }
}

/// Composes the state for a fetch outcome. Never fails: errors and missing
/// records yield `CompositionState::empty()`.
pub fn compose_state(
    fetched: Result<Option<ResumeRecord>, FetchError>,
    access: ContactAccess,
) -> CompositionState {
    match fetched {
        Ok(Some(record)) => map_record(record, access),
        Ok(None) => {
            warn!("No résumé record returned; composing empty state");
            CompositionState::empty()
        }
        Err(e) => {
            warn!(code = e.code(), "Résumé fetch failed, composing empty state: {e}");
            CompositionState::empty()
        }
    }
}

/// Maps one fetched record into a fully populated state.
pub fn map_record(record: ResumeRecord, access: ContactAccess) -> CompositionState {
    let ResumeRecord {
        id,
        title,
        include_photo,
        style_key,
        summary_variants,
        summary_variant,
        jobs,
        education,
        certificates,
        projects,
        skills,
        accounts,
    } = record;

    let experiences: Vec<ExperienceEntry> = jobs.into_iter().map(map_job).collect();
    let projects: Vec<ProjectEntry> = projects.into_iter().map(map_project).collect();

    let mut skills = group_skills(skills);
    let referenced = referenced_labels(&experiences, &projects);
    let forced = apply_referenced_closure(&mut skills, &referenced);

    let summary_variant_index = clamp_index(summary_variant, summary_variants.len());
    let summary_format = SummaryFormat::preferred_for(summary_variants.get(summary_variant_index));

    let mut state = CompositionState {
        options: ResumeOptions { include_photo },
        style: ResumeStyle::from_key(style_key.as_deref()),
        summary_variants,
        summary_variant_index,
        summary_format,
        summary_lines: Vec::new(),
        summary_paragraphs: Vec::new(),
        experiences,
        education: education.into_iter().map(map_education).collect(),
        certificates: certificates.into_iter().map(map_certificate).collect(),
        projects,
        skills,
        accounts: map_accounts(accounts, access),
    };
    state.rederive_summary();

    for mismatch in label_mismatches(&state) {
        warn!(
            "Skill label '{}' has no exact catalogue match (catalogue has '{}'); it will not be shown",
            mismatch.referenced, mismatch.catalogue
        );
    }

    info!(
        "Composed résumé '{title}' ({id}): {} experiences, {} projects, {} skill groups, {} skills force-enabled",
        state.experiences.len(),
        state.projects.len(),
        state.skills.len(),
        forced
    );

    state
}

/// Clamps a stored index into `0..len`; 0 for empty lists.
fn clamp_index(stored: Option<i32>, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let idx = usize::try_from(stored.unwrap_or(0)).unwrap_or(0);
    idx.min(len - 1)
}

fn map_job(job: JobRecord) -> ExperienceEntry {
    let selected_variant = clamp_index(job.selected_variant, job.variants.len());
    if job.variants.is_empty() {
        debug!("Job {} has no variants and will not render", job.id);
    }
    ExperienceEntry {
        id: job.id,
        label: job.label,
        enabled: job.enabled,
        variants: job.variants,
        selected_variant,
        icon_light: job.icon_light,
        icon_dark: job.icon_dark,
    }
}

fn map_education(e: EducationRecord) -> EducationEntry {
    EducationEntry {
        id: e.id,
        label: e.school,
        enabled: true,
        degree: e.degree,
        field: e.field,
        period: e.period,
        summary: e.summary,
        bullets: e.bullets,
        skills: e.skills,
    }
}

fn map_certificate(c: CertificateRecord) -> CertificateEntry {
    CertificateEntry {
        id: c.id,
        label: c.name,
        enabled: true,
        issuer: c.issuer,
        credential_id: c.credential_id,
        credential_url: c.credential_url,
        period: c.period,
        summary: None,
        bullets: Vec::new(),
        skills: Vec::new(),
    }
}

fn map_project(p: ProjectRecord) -> ProjectEntry {
    let tags = p
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(|label| ProjectTag {
            id: to_slug(&label),
            label,
        })
        .collect();

    ProjectEntry {
        id: p.id,
        label: p.title,
        enabled: true,
        show_icon: true,
        show_media: true,
        url: p.url.filter(|u| !u.trim().is_empty()),
        icon_light: p.icon_light,
        icon_dark: p.icon_dark,
        description: p.paragraphs.first().cloned(),
        paragraphs: p.paragraphs,
        tags,
    }
}

/// Groups the flat catalogue, preserving first-appearance order of groups and
/// catalogue order within each group. Duplicate ids within a group are dropped.
pub(crate) fn group_skills(records: Vec<SkillRecord>) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();

    for record in records {
        let group_name = record
            .group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(FALLBACK_SKILL_GROUP)
            .to_string();

        let idx = match groups.iter().position(|g| g.name == group_name) {
            Some(idx) => idx,
            None => {
                groups.push(SkillGroup {
                    name: group_name,
                    items: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        if group.items.iter().any(|i| i.id == record.id) {
            debug!("Skipping duplicate skill {} in group '{}'", record.id, group.name);
            continue;
        }
        group.items.push(SkillItem {
            id: record.id,
            label: record.label,
            enabled: record.enabled,
        });
    }

    groups
}

/// Every label cited by any variant of any job, or by any project tag.
pub(crate) fn referenced_labels(
    experiences: &[ExperienceEntry],
    projects: &[ProjectEntry],
) -> HashSet<String> {
    let from_jobs = experiences
        .iter()
        .flat_map(|e| e.variants.iter())
        .flat_map(|v| v.skills.iter().cloned());
    let from_projects = projects
        .iter()
        .flat_map(|p| p.tags.iter())
        .map(|t| t.label.clone());

    from_jobs.chain(from_projects).collect()
}

/// Forces referenced skills on. Returns how many items were switched on.
fn apply_referenced_closure(groups: &mut [SkillGroup], referenced: &HashSet<String>) -> usize {
    let mut forced = 0;
    for item in groups.iter_mut().flat_map(|g| g.items.iter_mut()) {
        if !item.enabled && referenced.contains(&item.label) {
            item.enabled = true;
            forced += 1;
        }
    }
    forced
}

fn map_accounts(records: Vec<AccountRecord>, access: ContactAccess) -> Vec<ContactAccount> {
    let mut accounts: Vec<ContactAccount> = records
        .into_iter()
        .filter_map(|a| {
            let link = a.link.filter(|l| !l.trim().is_empty());
            if link.is_none() && !a.requires_auth {
                return None;
            }
            let url = if a.requires_auth && !access.is_granted() {
                None
            } else {
                link
            };
            Some(ContactAccount {
                id: a.id,
                name: a.name,
                url,
                icon: a.icon,
                label: a.label,
                requires_auth: a.requires_auth,
                position: a.position,
            })
        })
        .collect();

    accounts.sort_by_key(|a| a.position);
    accounts
}

/// Drops the links of auth-gated accounts already in `state`, as a public
/// load would have. Returns how many links were withheld.
pub(crate) fn withhold_gated_links(state: &mut CompositionState) -> usize {
    let mut withheld = 0;
    for account in state.accounts.iter_mut().filter(|a| a.requires_auth) {
        if account.url.take().is_some() {
            withheld += 1;
        }
    }
    withheld
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::composition::state::{SummaryVariant, Variant};
    use crate::composition::visibility::is_skill_visible;
    use uuid::Uuid;

    pub(crate) fn variant(title: &str, skills: &[&str]) -> Variant {
        Variant {
            title: title.to_string(),
            period: "2020 — Present".to_string(),
            employment_type: None,
            location: None,
            summary: None,
            bullets: vec!["Shipped things".to_string()],
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn job(enabled: bool, variants: Vec<Variant>) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            label: "Engineer · Acme".to_string(),
            enabled,
            selected_variant: None,
            variants,
            icon_light: None,
            icon_dark: None,
        }
    }

    pub(crate) fn skill(label: &str, group: Option<&str>, enabled: bool) -> SkillRecord {
        SkillRecord {
            id: Uuid::new_v4(),
            label: label.to_string(),
            group: group.map(str::to_string),
            enabled,
        }
    }

    pub(crate) fn project(title: &str, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            url: Some("https://github.com/someone/folio".to_string()),
            icon_light: None,
            icon_dark: None,
            paragraphs: vec!["A portfolio site.".to_string(), "More.".to_string()],
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn account(name: &str, link: Option<&str>, requires_auth: bool, position: i32) -> AccountRecord {
        AccountRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            link: link.map(str::to_string),
            icon: None,
            label: None,
            requires_auth,
            position,
        }
    }

    pub(crate) fn summary(bullets: &[&str], paragraphs: &[&str]) -> SummaryVariant {
        SummaryVariant {
            bullet_lines: bullets.iter().map(|s| s.to_string()).collect(),
            paragraphs: paragraphs.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn sample_record() -> ResumeRecord {
        ResumeRecord {
            id: Uuid::new_v4(),
            title: "Engineering".to_string(),
            include_photo: true,
            style_key: Some("MUI".to_string()),
            summary_variants: vec![
                summary(&["Builds systems"], &["I build systems."]),
                summary(&["Leads teams"], &[]),
            ],
            summary_variant: None,
            jobs: vec![job(true, vec![variant("Backend", &["Go"]), variant("Lead", &["Rust"])])],
            education: vec![],
            certificates: vec![],
            projects: vec![project("Folio", &["TypeScript"])],
            skills: vec![
                skill("Go", Some("Languages"), false),
                skill("Rust", Some("Languages"), false),
                skill("TypeScript", Some("Languages"), false),
                skill("Docker", None, false),
                skill("Kubernetes", Some("Infra"), true),
            ],
            accounts: vec![],
        }
    }

    #[test]
    fn test_failure_composes_empty_state() {
        let err = FetchError::Database(sqlx::Error::PoolTimedOut);
        let state = compose_state(Err(err), ContactAccess::Public);
        assert_eq!(state, CompositionState::empty());
        assert!(!state.options().include_photo);
    }

    #[test]
    fn test_missing_record_composes_empty_state() {
        let state = compose_state(Ok(None), ContactAccess::Granted);
        assert!(state.is_empty());
        assert!(state.experiences().is_empty());
        assert!(state.skills().is_empty());
        assert!(state.accounts().is_empty());
        assert!(!state.options().include_photo);
    }

    #[test]
    fn test_skills_grouped_with_other_fallback() {
        let state = map_record(sample_record(), ContactAccess::Public);
        let names: Vec<&str> = state.skills().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Languages", "Other", "Infra"]);
        let other = state.skill_group(FALLBACK_SKILL_GROUP).unwrap();
        assert_eq!(other.items[0].label, "Docker");
    }

    #[test]
    fn test_blank_group_name_goes_to_other() {
        let groups = group_skills(vec![skill("Bash", Some("  "), true)]);
        assert_eq!(groups[0].name, FALLBACK_SKILL_GROUP);
    }

    #[test]
    fn test_duplicate_skill_ids_in_group_are_dropped() {
        let s = skill("Go", Some("Languages"), true);
        let groups = group_skills(vec![s.clone(), s]);
        assert_eq!(groups[0].items.len(), 1);
    }

    #[test]
    fn test_referenced_closure_covers_every_variant_and_project() {
        let state = map_record(sample_record(), ContactAccess::Public);
        for label in ["Go", "Rust", "TypeScript"] {
            assert!(is_skill_visible(&state, label), "{label} should be force-enabled");
        }
        // Not referenced, stored disabled: stays off.
        assert!(!is_skill_visible(&state, "Docker"));
        // Not referenced, stored enabled: stays on.
        assert!(is_skill_visible(&state, "Kubernetes"));
    }

    #[test]
    fn test_closure_visible_for_all_enabled_experience_skills() {
        let state = map_record(sample_record(), ContactAccess::Public);
        for exp in state.experiences().iter().filter(|e| e.enabled) {
            for label in exp.variants.iter().flat_map(|v| v.skills.iter()) {
                assert!(is_skill_visible(&state, label));
            }
        }
        for p in state.projects().iter().filter(|p| p.enabled) {
            for tag in &p.tags {
                assert!(is_skill_visible(&state, &tag.label));
            }
        }
    }

    #[test]
    fn test_variant_index_clamped_on_load() {
        let mut record = sample_record();
        record.jobs[0].selected_variant = Some(7);
        let mut negative = job(true, vec![variant("Only", &[])]);
        negative.selected_variant = Some(-3);
        record.jobs.push(negative);

        let state = map_record(record, ContactAccess::Public);
        assert_eq!(state.experiences()[0].selected_variant, 1);
        assert_eq!(state.experiences()[1].selected_variant, 0);
    }

    #[test]
    fn test_summary_format_both_when_variant_has_both() {
        let state = map_record(sample_record(), ContactAccess::Public);
        assert_eq!(state.summary_format(), SummaryFormat::Both);
        assert_eq!(state.summary_lines(), ["Builds systems".to_string()]);
        assert_eq!(state.summary_paragraphs(), ["I build systems.".to_string()]);
    }

    #[test]
    fn test_summary_format_follows_stored_variant() {
        let mut record = sample_record();
        record.summary_variant = Some(1);
        let state = map_record(record, ContactAccess::Public);
        assert_eq!(state.summary_variant_index(), 1);
        assert_eq!(state.summary_format(), SummaryFormat::Bullet);
        assert_eq!(state.summary_lines(), ["Leads teams".to_string()]);
        assert!(state.summary_paragraphs().is_empty());
    }

    #[test]
    fn test_summary_paragraph_only() {
        let mut record = sample_record();
        record.summary_variants = vec![summary(&[], &["Prose only."])];
        let state = map_record(record, ContactAccess::Public);
        assert_eq!(state.summary_format(), SummaryFormat::Paragraph);
        assert!(state.summary_lines().is_empty());
    }

    #[test]
    fn test_project_defaults_and_tag_slugs() {
        let state = map_record(sample_record(), ContactAccess::Public);
        let p = &state.projects()[0];
        assert!(p.enabled && p.show_icon && p.show_media);
        assert_eq!(p.description.as_deref(), Some("A portfolio site."));
        assert_eq!(p.tags[0].id, "typescript");
    }

    #[test]
    fn test_requires_auth_url_withheld_without_access() {
        let mut record = sample_record();
        record.accounts = vec![
            account("email", Some("mailto:x@y.com"), true, 1),
            account("github", Some("https://github.com/someone"), false, 0),
        ];
        let state = map_record(record, ContactAccess::Public);

        assert_eq!(state.accounts()[0].name, "github");
        assert!(state.accounts()[0].url.is_some());
        assert_eq!(state.accounts()[1].name, "email");
        assert!(state.accounts()[1].url.is_none());
        assert!(!format!("{:?}", state).contains("x@y.com"));
    }

    #[test]
    fn test_requires_auth_url_kept_with_access() {
        let mut record = sample_record();
        record.accounts = vec![account("email", Some("mailto:x@y.com"), true, 0)];
        let state = map_record(record, ContactAccess::Granted);
        assert_eq!(state.accounts()[0].url.as_deref(), Some("mailto:x@y.com"));
    }

    #[test]
    fn test_accounts_without_link_dropped_unless_auth_gated() {
        let mut record = sample_record();
        record.accounts = vec![
            account("website", None, false, 0),
            account("phone", None, true, 1),
        ];
        let state = map_record(record, ContactAccess::Public);
        assert_eq!(state.accounts().len(), 1);
        assert_eq!(state.accounts()[0].name, "phone");
    }

    #[test]
    fn test_style_and_photo_options() {
        let mut record = sample_record();
        record.style_key = Some("plain".to_string());
        record.include_photo = false;
        let state = map_record(record, ContactAccess::Public);
        assert_eq!(state.style(), ResumeStyle::Plain);
        assert!(!state.options().include_photo);
    }
}
