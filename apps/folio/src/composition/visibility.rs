//! Skill-visibility resolution.
//!
//! A label is visible iff some group holds an enabled item with exactly that
//! label. Matching is case-sensitive; `label_mismatches` reports labels that
//! only differ by case so they can be fixed at the source.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::composition::mapper::referenced_labels;
use crate::composition::state::CompositionState;

/// Snapshot of enabled labels, for resolving many chips against one state.
#[derive(Debug, Clone)]
pub struct SkillVisibility<'a> {
    enabled: HashSet<&'a str>,
}

impl<'a> SkillVisibility<'a> {
    pub fn of(state: &'a CompositionState) -> Self {
        let enabled = state
            .skills
            .iter()
            .flat_map(|g| g.items.iter())
            .filter(|i| i.enabled)
            .map(|i| i.label.as_str())
            .collect();
        Self { enabled }
    }

    pub fn is_visible(&self, label: &str) -> bool {
        self.enabled.contains(label)
    }

    /// Keeps the visible labels, in their original order.
    pub fn filter<'b, I>(&self, labels: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'b String>,
    {
        labels
            .into_iter()
            .filter(|l| self.is_visible(l))
            .cloned()
            .collect()
    }
}

pub fn is_skill_visible(state: &CompositionState, label: &str) -> bool {
    state
        .skills
        .iter()
        .flat_map(|g| g.items.iter())
        .any(|i| i.enabled && i.label == label)
}

/// A referenced label that misses the catalogue only because of case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMismatch {
    pub referenced: String,
    pub catalogue: String,
}

/// Labels cited by jobs or projects that have no exact catalogue entry but
/// do have a case-insensitive one. Sorted by referenced label.
pub fn label_mismatches(state: &CompositionState) -> Vec<LabelMismatch> {
    let catalogue: HashSet<&str> = state
        .skills
        .iter()
        .flat_map(|g| g.items.iter())
        .map(|i| i.label.as_str())
        .collect();
    let folded: HashMap<String, &str> = catalogue
        .iter()
        .map(|label| (label.to_lowercase(), *label))
        .collect();

    let mut mismatches: Vec<LabelMismatch> = referenced_labels(&state.experiences, &state.projects)
        .into_iter()
        .filter(|label| !catalogue.contains(label.as_str()))
        .filter_map(|label| {
            folded.get(&label.to_lowercase()).map(|catalogue| LabelMismatch {
                referenced: label.clone(),
                catalogue: catalogue.to_string(),
            })
        })
        .collect();

    mismatches.sort_by(|a, b| a.referenced.cmp(&b.referenced));
    mismatches
}
