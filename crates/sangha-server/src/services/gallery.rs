use crate::error::Result;
use crate::models::{GalleryCategory, GalleryImage};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct GalleryService {
    db: SqlitePool,
}

impl GalleryService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Records uploaded-image metadata after the bytes have landed in
    /// object storage. The uploader name is a display snapshot, not a live
    /// reference.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        url: &str,
        public_id: &str,
        caption: &str,
        category: GalleryCategory,
        uploaded_by: Uuid,
        uploader_name: &str,
    ) -> Result<GalleryImage> {
        let image = sqlx::query_as::<_, GalleryImage>(
            r#"
            INSERT INTO gallery_images (id, url, public_id, caption, category, uploaded_by,
                                        uploader_name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(url)
        .bind(public_id)
        .bind(caption)
        .bind(category)
        .bind(uploaded_by)
        .bind(uploader_name)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(image)
    }

    pub async fn list_all(&self) -> Result<Vec<GalleryImage>> {
        let images = sqlx::query_as::<_, GalleryImage>(
            "SELECT * FROM gallery_images ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(images)
    }
}
