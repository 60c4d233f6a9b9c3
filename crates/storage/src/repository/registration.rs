use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::registration::{
    CreateRegistrationRequest, UpdateRegistrationRequest, UserRegistrationSummary,
};
use crate::error::{Result, StorageError};
use crate::models::Registration;

const DUPLICATE_REGISTRATION: &str = "Already registered for this class of the event";

pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        req: &CreateRegistrationRequest,
    ) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (user_id, horse_id, event_id, class_id, stabling,
                                       payment_status, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING registration_id, user_id, horse_id, event_id, class_id, stabling,
                      payment_status, start_date, end_date, created_at
            "#,
        )
        .bind(user_id)
        .bind(req.horse_id)
        .bind(req.event_id)
        .bind(req.class_id)
        .bind(req.stabling)
        .bind(&req.payment_status)
        .bind(req.start_date)
        .bind(req.end_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint(DUPLICATE_REGISTRATION))?;

        Ok(registration)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, user_id, horse_id, event_id, class_id, stabling,
                   payment_status, start_date, end_date, created_at
            FROM registrations
            WHERE registration_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    /// The registration of `user_id` in one class of one event
    pub async fn find_for_participant(
        &self,
        event_id: Uuid,
        class_id: Uuid,
        user_id: Uuid,
    ) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, user_id, horse_id, event_id, class_id, stabling,
                   payment_status, start_date, end_date, created_at
            FROM registrations
            WHERE event_id = $1 AND class_id = $2 AND user_id = $3
            "#,
        )
        .bind(event_id)
        .bind(class_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    pub async fn list(&self) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, user_id, horse_id, event_id, class_id, stabling,
                   payment_status, start_date, end_date, created_at
            FROM registrations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, user_id, horse_id, event_id, class_id, stabling,
                   payment_status, start_date, end_date, created_at
            FROM registrations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    /// The user's registrations with event and class details
    pub async fn summaries_for_user(&self, user_id: Uuid) -> Result<Vec<UserRegistrationSummary>> {
        let summaries = sqlx::query_as::<_, UserRegistrationSummary>(
            r#"
            SELECT r.registration_id,
                   e.event_id, e.title AS event_title, e.location AS event_location,
                   e.start_date AS event_start_date, e.end_date AS event_end_date,
                   c.class_id, c.class_name, c.class_start_time
            FROM registrations r
            INNER JOIN events e ON e.event_id = r.event_id
            INNER JOIN competition_classes c ON c.class_id = r.class_id
            WHERE r.user_id = $1
            ORDER BY e.start_date ASC NULLS LAST, c.class_start_time ASC NULLS LAST
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateRegistrationRequest) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET
                horse_id = COALESCE($2, horse_id),
                class_id = COALESCE($3, class_id),
                event_id = COALESCE($4, event_id),
                stabling = COALESCE($5, stabling),
                payment_status = COALESCE($6, payment_status),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date)
            WHERE registration_id = $1
            RETURNING registration_id, user_id, horse_id, event_id, class_id, stabling,
                      payment_status, start_date, end_date, created_at
            "#,
        )
        .bind(id)
        .bind(req.horse_id)
        .bind(req.class_id)
        .bind(req.event_id)
        .bind(req.stabling)
        .bind(&req.payment_status)
        .bind(req.start_date)
        .bind(req.end_date)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint(DUPLICATE_REGISTRATION))?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM registrations WHERE registration_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
