use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::competition_class::{ClassParticipant, CreateClassRequest, UpdateClassRequest};
use crate::error::{Result, StorageError};
use crate::models::CompetitionClass;

pub struct CompetitionClassRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionClassRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        created_by: Uuid,
        req: &CreateClassRequest,
    ) -> Result<CompetitionClass> {
        let class = sqlx::query_as::<_, CompetitionClass>(
            r#"
            INSERT INTO competition_classes (event_id, created_by, class_name, class_status,
                                             class_type, class_start_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING class_id, event_id, created_by, class_name, class_status, class_type,
                      class_start_time, created_at
            "#,
        )
        .bind(req.event_id)
        .bind(created_by)
        .bind(&req.class_name)
        .bind(&req.class_status)
        .bind(req.class_type)
        .bind(req.class_start_time)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Event does not exist"))?;

        Ok(class)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<CompetitionClass> {
        let class = sqlx::query_as::<_, CompetitionClass>(
            r#"
            SELECT class_id, event_id, created_by, class_name, class_status, class_type,
                   class_start_time, created_at
            FROM competition_classes
            WHERE class_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(class)
    }

    pub async fn list(&self) -> Result<Vec<CompetitionClass>> {
        let classes = sqlx::query_as::<_, CompetitionClass>(
            r#"
            SELECT class_id, event_id, created_by, class_name, class_status, class_type,
                   class_start_time, created_at
            FROM competition_classes
            ORDER BY class_start_time ASC NULLS LAST, class_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(classes)
    }

    /// Classes of all given events, in start order
    pub async fn list_by_events(&self, event_ids: &[Uuid]) -> Result<Vec<CompetitionClass>> {
        let classes = sqlx::query_as::<_, CompetitionClass>(
            r#"
            SELECT class_id, event_id, created_by, class_name, class_status, class_type,
                   class_start_time, created_at
            FROM competition_classes
            WHERE event_id = ANY($1)
            ORDER BY class_start_time ASC NULLS LAST, class_name
            "#,
        )
        .bind(event_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(classes)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateClassRequest) -> Result<CompetitionClass> {
        let class = sqlx::query_as::<_, CompetitionClass>(
            r#"
            UPDATE competition_classes
            SET
                class_name = COALESCE($2, class_name),
                class_status = COALESCE($3, class_status),
                class_type = COALESCE($4, class_type),
                class_start_time = COALESCE($5, class_start_time)
            WHERE class_id = $1
            RETURNING class_id, event_id, created_by, class_name, class_status, class_type,
                      class_start_time, created_at
            "#,
        )
        .bind(id)
        .bind(&req.class_name)
        .bind(&req.class_status)
        .bind(req.class_type)
        .bind(req.class_start_time)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(class)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competition_classes WHERE class_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn participants(&self, class_id: Uuid) -> Result<Vec<ClassParticipant>> {
        let participants = sqlx::query_as::<_, ClassParticipant>(
            r#"
            SELECT r.registration_id, u.user_id, u.name AS user_name, u.email AS user_email,
                   h.horse_id, h.name AS horse_name,
                   r.start_date AS estimated_start_time, r.end_date AS end_time
            FROM registrations r
            INNER JOIN users u ON u.user_id = r.user_id
            INNER JOIN horses h ON h.horse_id = r.horse_id
            WHERE r.class_id = $1
            ORDER BY r.start_date ASC NULLS LAST, r.created_at
            "#,
        )
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }
}
