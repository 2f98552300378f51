//! Toggle state store — the mutable "what is shown" aggregate for one résumé view.
//!
//! Fields are crate-private: the rendering layer reads through accessors and
//! mutates only through the toggle operations in `composition::toggles`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

/// One alternate phrasing of a single job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub title: String,
    pub period: String,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    /// Skill labels, joined against the catalogue by exact label text.
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub label: String,
    pub enabled: bool,
    pub variants: Vec<Variant>,
    /// Always `< variants.len()` when `variants` is non-empty.
    pub selected_variant: usize,
    pub icon_light: Option<String>,
    pub icon_dark: Option<String>,
}

impl ExperienceEntry {
    pub fn resolved_variant(&self) -> Option<&Variant> {
        self.variants.get(self.selected_variant)
    }

    /// An entry without variants has nothing to paint.
    pub fn is_renderable(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.enabled && self.is_renderable()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: Uuid,
    pub label: String,
    pub enabled: bool,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub period: String,
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateEntry {
    pub id: Uuid,
    pub label: String,
    pub enabled: bool,
    pub issuer: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub period: String,
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTag {
    /// Slug of the label; stable across loads.
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: Uuid,
    pub label: String,
    pub enabled: bool,
    pub show_icon: bool,
    pub show_media: bool,
    pub url: Option<String>,
    pub icon_light: Option<String>,
    pub icon_dark: Option<String>,
    pub description: Option<String>,
    pub paragraphs: Vec<String>,
    pub tags: Vec<ProjectTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillItem {
    pub id: Uuid,
    pub label: String,
    pub enabled: bool,
}

/// A named, ordered bucket of skills. Group names are unique within a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<SkillItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAccount {
    pub id: Uuid,
    pub name: String,
    /// `None` when the account requires auth and access was not granted at load.
    pub url: Option<String>,
    pub icon: Option<String>,
    pub label: Option<String>,
    pub requires_auth: bool,
    pub position: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Summary and options
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryVariant {
    pub bullet_lines: Vec<String>,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFormat {
    #[default]
    Bullet,
    Paragraph,
    Both,
}

impl SummaryFormat {
    /// Initial format for a variant: both when both are present, otherwise
    /// whichever is present, otherwise bullet.
    pub fn preferred_for(variant: Option<&SummaryVariant>) -> Self {
        let (has_bullets, has_paragraphs) = variant
            .map(|v| (!v.bullet_lines.is_empty(), !v.paragraphs.is_empty()))
            .unwrap_or((false, false));

        match (has_bullets, has_paragraphs) {
            (true, true) => SummaryFormat::Both,
            (false, true) => SummaryFormat::Paragraph,
            _ => SummaryFormat::Bullet,
        }
    }

    pub fn shows_bullets(self) -> bool {
        matches!(self, SummaryFormat::Bullet | SummaryFormat::Both)
    }

    pub fn shows_paragraphs(self) -> bool {
        matches!(self, SummaryFormat::Paragraph | SummaryFormat::Both)
    }
}

/// Layout selected by the résumé's `style.ui` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStyle {
    #[default]
    Standard,
    Plain,
}

impl ResumeStyle {
    /// Unknown or missing keys fall back to `Standard`.
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(|k| k.trim().to_ascii_lowercase()).as_deref() {
            Some("plain") => ResumeStyle::Plain,
            _ => ResumeStyle::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeOptions {
    pub include_photo: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The toggle state store. `Default` is the empty-but-valid state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositionState {
    pub(crate) options: ResumeOptions,
    pub(crate) style: ResumeStyle,
    pub(crate) summary_variants: Vec<SummaryVariant>,
    pub(crate) summary_variant_index: usize,
    pub(crate) summary_format: SummaryFormat,
    pub(crate) summary_lines: Vec<String>,
    pub(crate) summary_paragraphs: Vec<String>,
    pub(crate) experiences: Vec<ExperienceEntry>,
    pub(crate) education: Vec<EducationEntry>,
    pub(crate) certificates: Vec<CertificateEntry>,
    pub(crate) projects: Vec<ProjectEntry>,
    pub(crate) skills: Vec<SkillGroup>,
    pub(crate) accounts: Vec<ContactAccount>,
}

impl CompositionState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn options(&self) -> ResumeOptions {
        self.options
    }

    pub fn style(&self) -> ResumeStyle {
        self.style
    }

    pub fn summary_variants(&self) -> &[SummaryVariant] {
        &self.summary_variants
    }

    pub fn summary_variant_index(&self) -> usize {
        self.summary_variant_index
    }

    pub fn summary_format(&self) -> SummaryFormat {
        self.summary_format
    }

    pub fn summary_lines(&self) -> &[String] {
        &self.summary_lines
    }

    pub fn summary_paragraphs(&self) -> &[String] {
        &self.summary_paragraphs
    }

    pub fn experiences(&self) -> &[ExperienceEntry] {
        &self.experiences
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn certificates(&self) -> &[CertificateEntry] {
        &self.certificates
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn skills(&self) -> &[SkillGroup] {
        &self.skills
    }

    pub fn skill_group(&self, name: &str) -> Option<&SkillGroup> {
        self.skills.iter().find(|g| g.name == name)
    }

    pub fn accounts(&self) -> &[ContactAccount] {
        &self.accounts
    }

    /// True when nothing was loaded (fetch failure or no record).
    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
            && self.education.is_empty()
            && self.certificates.is_empty()
            && self.projects.is_empty()
            && self.skills.is_empty()
            && self.accounts.is_empty()
            && self.summary_variants.is_empty()
    }

    /// Re-derives summary lines/paragraphs from the selected variant through
    /// the current format. Formats that exclude a form clear it.
    pub(crate) fn rederive_summary(&mut self) {
        let variant = self
            .summary_variants
            .get(self.summary_variant_index)
            .cloned()
            .unwrap_or_default();

        self.summary_lines = if self.summary_format.shows_bullets() {
            variant.bullet_lines
        } else {
            Vec::new()
        };
        self.summary_paragraphs = if self.summary_format.shows_paragraphs() {
            variant.paragraphs
        } else {
            Vec::new()
        };
    }
}
