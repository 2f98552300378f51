use serde::Serialize;

/// Colour scheme assigned to a skill group. Stable for a given group name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupScheme {
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Error,
}

const SCHEMES: [GroupScheme; 6] = [
    GroupScheme::Primary,
    GroupScheme::Secondary,
    GroupScheme::Success,
    GroupScheme::Info,
    GroupScheme::Warning,
    GroupScheme::Error,
];

impl GroupScheme {
    pub fn for_group(name: &str) -> Self {
        let idx = (group_hash(name).unsigned_abs() % SCHEMES.len() as u32) as usize;
        SCHEMES[idx]
    }
}

/// djb2 variant (`h * 33 ^ c`) over UTF-16 code units with 32-bit wrapping,
/// so schemes match what the web front end computes for the same name.
fn group_hash(name: &str) -> i32 {
    name.encode_utf16().fold(5381i32, |h, c| {
        h.wrapping_shl(5).wrapping_add(h) ^ i32::from(c)
    })
}
