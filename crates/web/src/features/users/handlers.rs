use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{UpdateUserRequest, UserDetailResponse, UserResponse},
    models::{Role, User},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

fn to_responses(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Supervisors only")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    let users = services::list_users(db.pool()).await?;

    Ok(Json(to_responses(users)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/judges",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All judges", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Supervisors only")
    ),
    tag = "users"
)]
pub async fn list_judges(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    let judges = services::list_users_by_role(db.pool(), Role::Judge).await?;

    Ok(Json(to_responses(judges)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/riders",
    responses(
        (status = 200, description = "All riders", body = Vec<UserResponse>)
    ),
    tag = "users"
)]
pub async fn list_riders(State(db): State<Database>) -> Result<Response, WebError> {
    let riders = services::list_users_by_role(db.pool(), Role::Rider).await?;

    Ok(Json(to_responses(riders)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User with score counts", body = UserDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_user_detail(db.pool(), id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not your account"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    user.require_owner_or_supervisor(id)?;

    let updated = services::update_user(db.pool(), id, &req).await?;

    Ok(Json(UserResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    services::delete_user(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
