use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::horse::{CreateHorseRequest, UpdateHorseRequest};
use crate::error::{Result, StorageError};
use crate::models::Horse;

pub struct HorseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HorseRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: Uuid, req: &CreateHorseRequest) -> Result<Horse> {
        let horse = sqlx::query_as::<_, Horse>(
            r#"
            INSERT INTO horses (owner_id, stable_id, name, breed, color, gender, date_of_birth, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING horse_id, owner_id, stable_id, name, breed, color, gender,
                      date_of_birth, image_url, created_at
            "#,
        )
        .bind(owner_id)
        .bind(req.stable_id)
        .bind(&req.name)
        .bind(&req.breed)
        .bind(&req.color)
        .bind(&req.gender)
        .bind(req.date_of_birth)
        .bind(&req.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Stable does not exist"))?;

        Ok(horse)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Horse> {
        let horse = sqlx::query_as::<_, Horse>(
            r#"
            SELECT horse_id, owner_id, stable_id, name, breed, color, gender,
                   date_of_birth, image_url, created_at
            FROM horses
            WHERE horse_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(horse)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Horse>> {
        let horses = sqlx::query_as::<_, Horse>(
            r#"
            SELECT horse_id, owner_id, stable_id, name, breed, color, gender,
                   date_of_birth, image_url, created_at
            FROM horses
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(horses)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateHorseRequest) -> Result<Horse> {
        let horse = sqlx::query_as::<_, Horse>(
            r#"
            UPDATE horses
            SET
                name = COALESCE($2, name),
                stable_id = COALESCE($3, stable_id),
                breed = COALESCE($4, breed),
                color = COALESCE($5, color),
                gender = COALESCE($6, gender),
                date_of_birth = COALESCE($7, date_of_birth),
                image_url = COALESCE($8, image_url)
            WHERE horse_id = $1
            RETURNING horse_id, owner_id, stable_id, name, breed, color, gender,
                      date_of_birth, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(req.stable_id)
        .bind(&req.breed)
        .bind(&req.color)
        .bind(&req.gender)
        .bind(req.date_of_birth)
        .bind(&req.image_url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Stable does not exist"))?
        .ok_or(StorageError::NotFound)?;

        Ok(horse)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM horses WHERE horse_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
