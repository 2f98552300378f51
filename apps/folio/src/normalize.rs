//! Small text normalizers shared by the fetcher and the composition engine.

use chrono::{Datelike, NaiveDate};

const PRESENT: &str = "Present";
const STORAGE_PUBLIC_PREFIX: &str = "storage/v1/object/public";

/// Formats an employment/education period as `"2019 — Present"`.
/// Returns an empty string when both ends are unknown.
pub fn build_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    if start.is_none() && end.is_none() {
        return String::new();
    }
    let fmt = |d: Option<NaiveDate>| match d {
        Some(d) => d.year().to_string(),
        None => PRESENT.to_string(),
    };
    format!("{} — {}", fmt(start), fmt(end))
}

/// `"Role · Company"`, with placeholders for missing parts.
pub fn experience_label(role: Option<&str>, company: Option<&str>) -> String {
    let role = role.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("Role");
    let company = company
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Company");
    format!("{role} · {company}")
}

/// Lowercases and collapses every run of non-alphanumeric characters into a
/// single dash, trimming dashes at both ends.
pub fn to_slug(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Public URL of a storage object. Without a base the path is returned as-is.
pub fn public_storage_url(base: Option<&str>, file_path: &str) -> Option<String> {
    let path = file_path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    match base.map(|b| b.trim_end_matches('/')).filter(|b| !b.is_empty()) {
        Some(base) => Some(format!("{base}/{STORAGE_PUBLIC_PREFIX}/{path}")),
        None => Some(file_path.to_string()),
    }
}

/// Trims and drops blank strings, e.g. empty bullets stored by the editor.
pub fn non_blank(lines: Option<Vec<String>>) -> Vec<String> {
    lines
        .unwrap_or_default()
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
