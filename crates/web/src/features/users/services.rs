use sqlx::PgPool;
use storage::{
    dto::user::{UpdateUserRequest, UserDetailResponse, UserResponse},
    error::Result,
    models::{Role, User},
    repository::UserRepository,
};
use uuid::Uuid;

/// List every account
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>> {
    UserRepository::new(pool).list().await
}

/// List accounts holding one role
pub async fn list_users_by_role(pool: &PgPool, role: Role) -> Result<Vec<User>> {
    UserRepository::new(pool).list_by_role(role).await
}

/// User with the number of scores they hold per discipline
pub async fn get_user_detail(pool: &PgPool, id: Uuid) -> Result<UserDetailResponse> {
    let repo = UserRepository::new(pool);

    let user = repo.find_by_id(id).await?;
    let score_counts = repo.score_counts(id).await?;

    Ok(UserDetailResponse {
        user: UserResponse::from(user),
        score_counts,
    })
}

pub async fn update_user(pool: &PgPool, id: Uuid, request: &UpdateUserRequest) -> Result<User> {
    UserRepository::new(pool).update(id, request).await
}

pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<()> {
    UserRepository::new(pool).delete(id).await
}
