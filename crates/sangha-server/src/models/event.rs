use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum EventCategory {
    Sports,
    Cultural,
    Social,
    Meeting,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    /// Kept as a display string ("Jan 26, 2025"), matching the stored form.
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: EventCategory,
    pub short_desc: String,
    pub full_desc: String,
    pub image: String,
    pub coordinator: String,
    /// Contact line for attendee enquiries (phone or email), if published.
    pub contact: Option<String>,
    pub entry_fee: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: EventCategory,
    pub short_desc: String,
    pub full_desc: String,
    pub image: String,
    pub coordinator: String,
    pub contact: Option<String>,
    #[serde(default = "default_entry_fee")]
    pub entry_fee: String,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: CreateEvent,
}

fn default_entry_fee() -> String {
    "Free".to_string()
}
