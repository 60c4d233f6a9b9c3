use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::dto::user::ScoreCounts;
use crate::error::{Result, StorageError};
use crate::models::{Event, EventStatus};

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, description, location, status, start_date, end_date,
                   image_url, created_by, judge_id, created_at
            FROM events
            ORDER BY start_date DESC NULLS LAST, created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn list_by_status(&self, status: EventStatus) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, description, location, status, start_date, end_date,
                   image_url, created_by, judge_id, created_at
            FROM events
            WHERE status = $1
            ORDER BY start_date ASC NULLS LAST, created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, description, location, status, start_date, end_date,
                   image_url, created_by, judge_id, created_at
            FROM events
            WHERE event_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn create(&self, created_by: Uuid, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, status, start_date, end_date,
                                image_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING event_id, title, description, location, status, start_date, end_date,
                      image_url, created_by, judge_id, created_at
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.location)
        .bind(req.status)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(&req.image_url)
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                status = COALESCE($5, status),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                image_url = COALESCE($8, image_url)
            WHERE event_id = $1
            RETURNING event_id, title, description, location, status, start_date, end_date,
                      image_url, created_by, judge_id, created_at
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.location)
        .bind(req.status)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(&req.image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn assign_judge(&self, event_id: Uuid, judge_id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET judge_id = $2
            WHERE event_id = $1
            RETURNING event_id, title, description, location, status, start_date, end_date,
                      image_url, created_by, judge_id, created_at
            "#,
        )
        .bind(event_id)
        .bind(judge_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Riders registered for the event with the number of scores recorded
    /// against their registrations in it
    pub async fn participants(&self, event_id: Uuid) -> Result<Vec<ScoreCounts>> {
        let participants = sqlx::query_as::<_, ScoreCounts>(
            r#"
            SELECT u.user_id, u.name, u.email,
                   (SELECT COUNT(*) FROM jumping_scores j
                      INNER JOIN registrations r ON r.registration_id = j.registration_id
                     WHERE r.user_id = u.user_id AND r.event_id = $1) AS jumping_scores_count,
                   (SELECT COUNT(*) FROM dressage_scores d
                      INNER JOIN registrations r ON r.registration_id = d.registration_id
                     WHERE r.user_id = u.user_id AND r.event_id = $1) AS dressage_scores_count,
                   (SELECT COUNT(*) FROM endurance_scores e
                      INNER JOIN registrations r ON r.registration_id = e.registration_id
                     WHERE r.user_id = u.user_id AND r.event_id = $1) AS endurance_scores_count
            FROM users u
            WHERE EXISTS (
                SELECT 1 FROM registrations r WHERE r.user_id = u.user_id AND r.event_id = $1
            )
            ORDER BY u.name
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }
}
