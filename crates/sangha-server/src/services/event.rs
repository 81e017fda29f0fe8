use crate::error::{AppError, Result};
use crate::models::{CreateEvent, Event, UpdateEvent};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct EventService {
    db: SqlitePool,
}

impl EventService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateEvent) -> Result<Event> {
        let now = Utc::now();
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, date, time, location, category, short_desc, full_desc,
                                image, coordinator, contact, entry_fee, is_featured,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.date)
        .bind(&input.time)
        .bind(&input.location)
        .bind(input.category)
        .bind(&input.short_desc)
        .bind(&input.full_desc)
        .bind(&input.image)
        .bind(&input.coordinator)
        .bind(&input.contact)
        .bind(&input.entry_fee)
        .bind(input.is_featured)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(event)
    }

    pub async fn list_all(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date ASC")
            .fetch_all(&self.db)
            .await?;

        Ok(events)
    }

    pub async fn update(&self, input: UpdateEvent) -> Result<Event> {
        let f = input.fields;
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2, date = $3, time = $4, location = $5, category = $6, short_desc = $7,
                full_desc = $8, image = $9, coordinator = $10, contact = $11, entry_fee = $12,
                is_featured = $13, updated_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(input.id)
        .bind(&f.title)
        .bind(&f.date)
        .bind(&f.time)
        .bind(&f.location)
        .bind(f.category)
        .bind(&f.short_desc)
        .bind(&f.full_desc)
        .bind(&f.image)
        .bind(&f.coordinator)
        .bind(&f.contact)
        .bind(&f.entry_fee)
        .bind(f.is_featured)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".to_string()));
        }

        Ok(())
    }
}
