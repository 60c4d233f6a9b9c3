use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::stable::{CreateStableRequest, UpdateStableRequest};
use crate::error::{Result, StorageError};
use crate::models::Stable;

pub struct StableRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StableRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: Uuid, req: &CreateStableRequest) -> Result<Stable> {
        let stable = sqlx::query_as::<_, Stable>(
            r#"
            INSERT INTO stables (owner_id, name, location, description, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING stable_id, owner_id, name, location, description, image_url, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&req.name)
        .bind(&req.location)
        .bind(&req.description)
        .bind(&req.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(stable)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Stable> {
        let stable = sqlx::query_as::<_, Stable>(
            r#"
            SELECT stable_id, owner_id, name, location, description, image_url, created_at
            FROM stables
            WHERE stable_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(stable)
    }

    pub async fn list(&self) -> Result<Vec<Stable>> {
        let stables = sqlx::query_as::<_, Stable>(
            r#"
            SELECT stable_id, owner_id, name, location, description, image_url, created_at
            FROM stables
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(stables)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Stable>> {
        let stables = sqlx::query_as::<_, Stable>(
            r#"
            SELECT stable_id, owner_id, name, location, description, image_url, created_at
            FROM stables
            WHERE owner_id = $1
            ORDER BY name
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(stables)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateStableRequest) -> Result<Stable> {
        let stable = sqlx::query_as::<_, Stable>(
            r#"
            UPDATE stables
            SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url)
            WHERE stable_id = $1
            RETURNING stable_id, owner_id, name, location, description, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.location)
        .bind(&req.description)
        .bind(&req.image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(stable)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM stables WHERE stable_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
