//! Toggle operations — the only mutation entry points of `CompositionState`.
//!
//! Each operation touches at most one entry. Unknown ids and out-of-range
//! indices are ignored; every method returns whether anything changed.
//!
//! `toggle_skill` does not re-apply the referenced-skill closure: a referenced
//! skill can be switched off by hand. The closure is a load-time default only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::composition::state::{CompositionState, SummaryFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
    Certificate,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectFlag {
    ShowIcon,
    ShowMedia,
}

/// A single user interaction, as dispatched by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Toggle {
    EntryEnabled { kind: EntryKind, id: Uuid },
    ExperienceVariant { id: Uuid, index: usize },
    Skill { group: String, skill_id: Uuid },
    ProjectFlag { id: Uuid, flag: ProjectFlag },
    SummaryVariant { index: usize },
    SummaryFormat { format: SummaryFormat },
    IncludePhoto,
}

impl CompositionState {
    pub fn apply(&mut self, toggle: &Toggle) -> bool {
        match toggle {
            Toggle::EntryEnabled { kind, id } => self.toggle_entry_enabled(*kind, *id),
            Toggle::ExperienceVariant { id, index } => self.select_experience_variant(*id, *index),
            Toggle::Skill { group, skill_id } => self.toggle_skill(group, *skill_id),
            Toggle::ProjectFlag { id, flag } => self.toggle_project_flag(*id, *flag),
            Toggle::SummaryVariant { index } => self.set_summary_variant(*index),
            Toggle::SummaryFormat { format } => self.set_summary_format(*format),
            Toggle::IncludePhoto => self.toggle_include_photo(),
        }
    }

    pub fn toggle_entry_enabled(&mut self, kind: EntryKind, id: Uuid) -> bool {
        let enabled = match kind {
            EntryKind::Experience => self
                .experiences
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.enabled),
            EntryKind::Education => self
                .education
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.enabled),
            EntryKind::Certificate => self
                .certificates
                .iter_mut()
                .find(|c| c.id == id)
                .map(|c| &mut c.enabled),
            EntryKind::Project => self
                .projects
                .iter_mut()
                .find(|p| p.id == id)
                .map(|p| &mut p.enabled),
        };

        match enabled {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    /// Rejects indices outside `0..variants.len()`; the selection is left as is.
    pub fn select_experience_variant(&mut self, id: Uuid, index: usize) -> bool {
        match self.experiences.iter_mut().find(|e| e.id == id) {
            Some(entry) if index < entry.variants.len() => {
                entry.selected_variant = index;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_skill(&mut self, group: &str, skill_id: Uuid) -> bool {
        let item = self
            .skills
            .iter_mut()
            .find(|g| g.name == group)
            .and_then(|g| g.items.iter_mut().find(|i| i.id == skill_id));

        match item {
            Some(item) => {
                item.enabled = !item.enabled;
                true
            }
            None => false,
        }
    }

    pub fn toggle_project_flag(&mut self, id: Uuid, flag: ProjectFlag) -> bool {
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                let target = match flag {
                    ProjectFlag::ShowIcon => &mut project.show_icon,
                    ProjectFlag::ShowMedia => &mut project.show_media,
                };
                *target = !*target;
                true
            }
            None => false,
        }
    }

    /// Selects a summary variant and re-derives lines/paragraphs through the
    /// current format. Out-of-range indices are ignored.
    pub fn set_summary_variant(&mut self, index: usize) -> bool {
        if index >= self.summary_variants.len() {
            return false;
        }
        self.summary_variant_index = index;
        self.rederive_summary();
        true
    }

    pub fn set_summary_format(&mut self, format: SummaryFormat) -> bool {
        self.summary_format = format;
        self.rederive_summary();
        true
    }

    pub fn toggle_include_photo(&mut self) -> bool {
        self.options.include_photo = !self.options.include_photo;
        true
    }
}
