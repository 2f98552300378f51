// Résumé composition engine.
// Pure functions over a `CompositionState`; no I/O and no state of its own.
// Fetching lives in `fetcher`, load sequencing in `session`.

pub mod contact;
pub mod mapper;
pub mod palette;
pub mod state;
pub mod toggles;
pub mod view;
pub mod visibility;

pub use contact::{contact_display_text, ContactIcon};
pub use mapper::{compose_state, map_record, ContactAccess};
pub use state::{CompositionState, ResumeStyle, SummaryFormat};
pub use toggles::{EntryKind, ProjectFlag, Toggle};
pub use view::{contact_lines, ResumeView};
pub use visibility::{is_skill_visible, label_mismatches, SkillVisibility};
