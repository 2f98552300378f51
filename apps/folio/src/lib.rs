//! Folio: résumé composition for a personal portfolio site.
//!
//! Content is fetched into a `ResumeRecord`, mapped into a
//! `CompositionState`, edited through toggles and rendered as a `ResumeView`.

pub mod composition;
pub mod config;
pub mod db;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod normalize;
pub mod session;
