use sqlx::PgPool;
use storage::{
    dto::stable::{CreateStableRequest, UpdateStableRequest},
    error::Result,
    models::Stable,
    repository::StableRepository,
};
use uuid::Uuid;

pub async fn list_stables(pool: &PgPool) -> Result<Vec<Stable>> {
    StableRepository::new(pool).list().await
}

pub async fn get_stable(pool: &PgPool, id: Uuid) -> Result<Stable> {
    StableRepository::new(pool).find_by_id(id).await
}

pub async fn create_stable(
    pool: &PgPool,
    owner_id: Uuid,
    request: &CreateStableRequest,
) -> Result<Stable> {
    StableRepository::new(pool).create(owner_id, request).await
}

pub async fn update_stable(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateStableRequest,
) -> Result<Stable> {
    StableRepository::new(pool).update(id, request).await
}

pub async fn delete_stable(pool: &PgPool, id: Uuid) -> Result<()> {
    StableRepository::new(pool).delete(id).await
}
