use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeListRow {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeHeaderRow {
    pub id: Uuid,
    pub title: String,
    pub has_photo: bool,
    /// Layout payload, e.g. `{"ui": "plain"}`.
    pub style: Option<Value>,
    pub summary_description_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PresetListRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PresetHeaderRow {
    pub id: Uuid,
    pub name: String,
    pub include_photo: bool,
    pub summary_variant: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct DescriptionRow {
    pub bullets: Option<Vec<String>>,
    pub paragraphs: Option<Vec<String>>,
}
