//! Derived presentation model — what the rendering layer paints.
//!
//! `ResumeView::derive` is recomputed from the state on every render; it holds
//! no toggle data of its own, so it cannot drift from the store.

use serde::Serialize;
use uuid::Uuid;

use crate::composition::contact::{
    contact_display_text, contact_tooltip, is_redacted, ContactIcon, FULL_CONTACT_ON_REQUEST,
};
use crate::composition::palette::GroupScheme;
use crate::composition::state::{
    CompositionState, ProjectTag, ResumeStyle, SkillItem, SummaryFormat, Variant,
};
use crate::composition::visibility::SkillVisibility;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceView {
    pub id: Uuid,
    pub label: String,
    pub variant: Variant,
    /// Variant skills that are currently enabled in the catalogue.
    pub skills: Vec<String>,
    pub icon_light: Option<String>,
    pub icon_dark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationView {
    pub id: Uuid,
    pub label: String,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub period: String,
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateView {
    pub id: Uuid,
    pub label: String,
    pub issuer: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub period: String,
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub label: String,
    pub url: Option<String>,
    /// Link text shown under the title: scheme and `github.com/` dropped.
    pub url_caption: Option<String>,
    pub show_icon: bool,
    pub show_media: bool,
    pub icon_light: Option<String>,
    pub icon_dark: Option<String>,
    pub description: Option<String>,
    pub paragraphs: Vec<String>,
    pub tags: Vec<ProjectTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroupView {
    pub name: String,
    pub scheme: GroupScheme,
    pub items: Vec<SkillItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactLine {
    pub id: Uuid,
    pub icon: ContactIcon,
    pub text: String,
    pub tooltip: String,
    pub aria_label: String,
    /// `None` when redacted or when there is nothing to link to.
    pub href: Option<String>,
    pub redacted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeView {
    pub include_photo: bool,
    pub style: ResumeStyle,
    pub summary_format: SummaryFormat,
    pub summary_lines: Vec<String>,
    pub summary_paragraphs: Vec<String>,
    pub experiences: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub certificates: Vec<CertificateView>,
    pub projects: Vec<ProjectView>,
    pub skill_groups: Vec<SkillGroupView>,
    pub contacts: Vec<ContactLine>,
}

impl ResumeView {
    pub fn derive(state: &CompositionState, authenticated: bool) -> Self {
        let visibility = SkillVisibility::of(state);

        let experiences = state
            .experiences
            .iter()
            .filter(|e| e.is_visible())
            .filter_map(|e| {
                let variant = e.resolved_variant()?;
                Some(ExperienceView {
                    id: e.id,
                    label: e.label.clone(),
                    skills: visibility.filter(&variant.skills),
                    variant: variant.clone(),
                    icon_light: e.icon_light.clone(),
                    icon_dark: e.icon_dark.clone(),
                })
            })
            .collect();

        let education = state
            .education
            .iter()
            .filter(|e| e.enabled)
            .map(|e| EducationView {
                id: e.id,
                label: e.label.clone(),
                degree: e.degree.clone(),
                field: e.field.clone(),
                period: e.period.clone(),
                summary: e.summary.clone(),
                bullets: e.bullets.clone(),
                skills: visibility.filter(&e.skills),
            })
            .collect();

        let certificates = state
            .certificates
            .iter()
            .filter(|c| c.enabled)
            .map(|c| CertificateView {
                id: c.id,
                label: c.label.clone(),
                issuer: c.issuer.clone(),
                credential_id: c.credential_id.clone(),
                credential_url: c.credential_url.clone(),
                period: c.period.clone(),
                summary: c.summary.clone(),
                bullets: c.bullets.clone(),
                skills: visibility.filter(&c.skills),
            })
            .collect();

        let projects = state
            .projects
            .iter()
            .filter(|p| p.enabled)
            .map(|p| ProjectView {
                id: p.id,
                label: p.label.clone(),
                url: p.url.clone(),
                url_caption: p.url.as_deref().map(project_url_caption),
                show_icon: p.show_icon,
                show_media: p.show_media,
                icon_light: p.icon_light.clone().filter(|_| p.show_icon),
                icon_dark: p.icon_dark.clone().filter(|_| p.show_icon),
                description: p
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .or_else(|| p.paragraphs.first().cloned()),
                paragraphs: p.paragraphs.clone(),
                tags: p
                    .tags
                    .iter()
                    .filter(|t| visibility.is_visible(&t.label))
                    .cloned()
                    .collect(),
            })
            .collect();

        let skill_groups = state
            .skills
            .iter()
            .filter_map(|g| {
                let items: Vec<SkillItem> = g.items.iter().filter(|i| i.enabled).cloned().collect();
                (!items.is_empty()).then(|| SkillGroupView {
                    name: g.name.clone(),
                    scheme: GroupScheme::for_group(&g.name),
                    items,
                })
            })
            .collect();

        ResumeView {
            include_photo: state.options.include_photo,
            style: state.style,
            summary_format: state.summary_format,
            summary_lines: state.summary_lines.clone(),
            summary_paragraphs: state.summary_paragraphs.clone(),
            experiences,
            education,
            certificates,
            projects,
            skill_groups,
            contacts: contact_lines(state, authenticated),
        }
    }
}

/// Contact lines for any surface that lists accounts (résumé header, footer).
pub fn contact_lines(state: &CompositionState, authenticated: bool) -> Vec<ContactLine> {
    state
        .accounts
        .iter()
        .filter(|a| a.url.is_some() || a.requires_auth)
        .map(|a| {
            let redacted = is_redacted(a, authenticated);
            let tooltip = contact_tooltip(a);
            ContactLine {
                id: a.id,
                icon: ContactIcon::resolve(&a.name, a.icon.as_deref()),
                text: contact_display_text(a, authenticated),
                aria_label: format!("Open {tooltip}"),
                tooltip: if redacted {
                    FULL_CONTACT_ON_REQUEST.to_string()
                } else {
                    tooltip
                },
                href: if redacted { None } else { a.url.clone() },
                redacted,
            }
        })
        .collect()
}

fn project_url_caption(url: &str) -> String {
    let caption = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    caption.replacen("github.com/", "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::mapper::tests::{account, job, sample_record, skill, variant};
    use crate::composition::mapper::{map_record, ContactAccess};
    use crate::composition::toggles::{EntryKind, ProjectFlag};
    use crate::fetcher::record::ResumeRecord;
    use uuid::Uuid;

    fn skill_id(state: &CompositionState, group: &str, label: &str) -> Uuid {
        state
            .skill_group(group)
            .and_then(|g| g.items.iter().find(|i| i.label == label))
            .map(|i| i.id)
            .unwrap()
    }

    #[test]
    fn test_go_scenario() {
        let record = ResumeRecord {
            jobs: vec![job(true, vec![variant("Backend", &["Go"])])],
            skills: vec![skill("Go", Some("Languages"), false)],
            ..Default::default()
        };
        let mut state = map_record(record, ContactAccess::Public);

        let languages = state.skill_group("Languages").unwrap();
        assert_eq!(languages.items[0].label, "Go");
        assert!(languages.items[0].enabled);
        let view = ResumeView::derive(&state, false);
        assert_eq!(view.experiences[0].skills, vec!["Go".to_string()]);

        let go = skill_id(&state, "Languages", "Go");
        assert!(state.toggle_skill("Languages", go));
        assert!(!state.skill_group("Languages").unwrap().items[0].enabled);

        let view = ResumeView::derive(&state, false);
        assert_eq!(view.experiences.len(), 1, "experience stays enabled");
        assert!(view.experiences[0].skills.is_empty(), "Go chip is hidden");
        assert!(view.skill_groups.is_empty());
    }

    #[test]
    fn test_disabled_and_variantless_experiences_hidden() {
        let mut record = sample_record();
        record.jobs.push(job(true, vec![]));
        record.jobs.push(job(false, vec![variant("Hidden", &[])]));
        let state = map_record(record, ContactAccess::Public);

        let view = ResumeView::derive(&state, false);
        assert_eq!(view.experiences.len(), 1);
        assert_eq!(view.experiences[0].variant.title, "Backend");
    }

    #[test]
    fn test_view_follows_variant_selection() {
        let mut state = map_record(sample_record(), ContactAccess::Public);
        let id = state.experiences()[0].id;
        state.select_experience_variant(id, 1);
        let view = ResumeView::derive(&state, false);
        assert_eq!(view.experiences[0].variant.title, "Lead");
        assert_eq!(view.experiences[0].skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_view_is_pure_function_of_state() {
        let mut state = map_record(sample_record(), ContactAccess::Public);
        let before = ResumeView::derive(&state, false);
        let pid = state.projects()[0].id;
        state.toggle_entry_enabled(EntryKind::Project, pid);
        let hidden = ResumeView::derive(&state, false);
        assert!(hidden.projects.is_empty());
        state.toggle_entry_enabled(EntryKind::Project, pid);
        assert_eq!(ResumeView::derive(&state, false), before);
    }

    #[test]
    fn test_project_flags_and_tags() {
        let mut state = map_record(sample_record(), ContactAccess::Public);
        let pid = state.projects()[0].id;
        state.toggle_project_flag(pid, ProjectFlag::ShowMedia);
        let ts = skill_id(&state, "Languages", "TypeScript");
        state.toggle_skill("Languages", ts);

        let view = ResumeView::derive(&state, false);
        let p = &view.projects[0];
        assert!(p.show_icon);
        assert!(!p.show_media);
        assert!(p.tags.is_empty());
        assert_eq!(p.url_caption.as_deref(), Some("someone/folio"));
        assert_eq!(p.description.as_deref(), Some("A portfolio site."));
    }

    #[test]
    fn test_hidden_icon_is_dropped() {
        let mut state = map_record(sample_record(), ContactAccess::Public);
        state.projects[0].icon_light = Some("light.svg".to_string());
        let pid = state.projects()[0].id;
        assert_eq!(
            ResumeView::derive(&state, false).projects[0].icon_light.as_deref(),
            Some("light.svg")
        );

        state.toggle_project_flag(pid, ProjectFlag::ShowIcon);
        assert_eq!(ResumeView::derive(&state, false).projects[0].icon_light, None);
    }

    #[test]
    fn test_skill_groups_only_enabled_items() {
        let state = map_record(sample_record(), ContactAccess::Public);
        let view = ResumeView::derive(&state, false);
        let names: Vec<&str> = view.skill_groups.iter().map(|g| g.name.as_str()).collect();
        // "Other" only holds Docker, which is off.
        assert_eq!(names, vec!["Languages", "Infra"]);
        assert_eq!(view.skill_groups[0].items.len(), 3);
        assert_eq!(view.skill_groups[0].scheme, GroupScheme::for_group("Languages"));
    }

    #[test]
    fn test_contact_lines_redacted_for_public() {
        let mut record = sample_record();
        record.accounts = vec![
            account("github", Some("https://github.com/someone"), false, 0),
            account("email", Some("mailto:x@y.com"), true, 1),
            account("website", None, false, 2),
        ];
        let state = map_record(record, ContactAccess::Public);
        let lines = contact_lines(&state, false);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "github.com/someone");
        assert_eq!(lines[0].href.as_deref(), Some("https://github.com/someone"));
        assert_eq!(lines[0].icon, ContactIcon::GitHub);
        assert_eq!(lines[0].aria_label, "Open Github");

        assert!(lines[1].redacted);
        assert_eq!(lines[1].text, "Email available on request");
        assert_eq!(lines[1].tooltip, FULL_CONTACT_ON_REQUEST);
        assert!(lines[1].href.is_none());
    }

    #[test]
    fn test_contact_lines_for_authenticated_viewer() {
        let mut record = sample_record();
        record.accounts = vec![account("email", Some("mailto:x@y.com"), true, 0)];
        let state = map_record(record, ContactAccess::Granted);
        let lines = contact_lines(&state, true);
        assert_eq!(lines[0].text, "x@y.com");
        assert_eq!(lines[0].href.as_deref(), Some("mailto:x@y.com"));
        assert_eq!(lines[0].icon, ContactIcon::Email);
        assert!(!lines[0].redacted);
    }

    #[test]
    fn test_empty_state_view() {
        let view = ResumeView::derive(&CompositionState::empty(), false);
        assert!(!view.include_photo);
        assert!(view.experiences.is_empty());
        assert!(view.skill_groups.is_empty());
        assert!(view.contacts.is_empty());
    }
}
