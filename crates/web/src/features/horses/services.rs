use sqlx::PgPool;
use storage::{
    dto::horse::{CreateHorseRequest, UpdateHorseRequest},
    error::Result,
    models::Horse,
    repository::{HorseRepository, StableRepository},
};
use uuid::Uuid;

/// Horses owned by one user
pub async fn list_own_horses(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Horse>> {
    HorseRepository::new(pool).list_by_owner(owner_id).await
}

pub async fn get_horse(pool: &PgPool, id: Uuid) -> Result<Horse> {
    HorseRepository::new(pool).find_by_id(id).await
}

/// Register a horse; a referenced stable must exist
pub async fn create_horse(
    pool: &PgPool,
    owner_id: Uuid,
    request: &CreateHorseRequest,
) -> Result<Horse> {
    if let Some(stable_id) = request.stable_id {
        StableRepository::new(pool).find_by_id(stable_id).await?;
    }

    HorseRepository::new(pool).create(owner_id, request).await
}

pub async fn update_horse(pool: &PgPool, id: Uuid, request: &UpdateHorseRequest) -> Result<Horse> {
    if let Some(stable_id) = request.stable_id {
        StableRepository::new(pool).find_by_id(stable_id).await?;
    }

    HorseRepository::new(pool).update(id, request).await
}

pub async fn delete_horse(pool: &PgPool, id: Uuid) -> Result<()> {
    HorseRepository::new(pool).delete(id).await
}
