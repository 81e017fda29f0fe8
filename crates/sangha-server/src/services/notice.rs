use crate::error::{AppError, Result};
use crate::models::{CreateNotice, Notice, UpdateNotice};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct NoticeService {
    db: SqlitePool,
}

impl NoticeService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a notice stamped with the posting actor's display name and
    /// designation at post time.
    pub async fn create(
        &self,
        input: CreateNotice,
        posted_by: &str,
        designation: &str,
    ) -> Result<Notice> {
        let now = Utc::now();
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notices (id, title, content, posted_by, designation, is_important,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.content)
        .bind(posted_by)
        .bind(designation)
        .bind(input.is_important)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(notice)
    }

    pub async fn list_all(&self) -> Result<Vec<Notice>> {
        let notices =
            sqlx::query_as::<_, Notice>("SELECT * FROM notices ORDER BY created_at DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(notices)
    }

    pub async fn update(&self, input: UpdateNotice) -> Result<Notice> {
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            UPDATE notices
            SET title = $2, content = $3, is_important = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(input.id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.is_important)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notice not found".to_string()))?;

        Ok(notice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notice not found".to_string()));
        }

        Ok(())
    }
}
