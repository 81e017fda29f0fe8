use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
pub enum GalleryCategory {
    Sports,
    Cultural,
    #[serde(rename = "Social Welfare")]
    #[sqlx(rename = "Social Welfare")]
    SocialWelfare,
    Meeting,
    Awards,
    #[default]
    Others,
}

impl FromStr for GalleryCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sports" => Ok(GalleryCategory::Sports),
            "Cultural" => Ok(GalleryCategory::Cultural),
            "Social Welfare" => Ok(GalleryCategory::SocialWelfare),
            "Meeting" => Ok(GalleryCategory::Meeting),
            "Awards" => Ok(GalleryCategory::Awards),
            "Others" => Ok(GalleryCategory::Others),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    pub url: String,
    /// Object key in external storage, kept for later cleanup.
    pub public_id: String,
    pub caption: String,
    pub category: GalleryCategory,
    pub uploaded_by: Option<Uuid>,
    pub uploader_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
