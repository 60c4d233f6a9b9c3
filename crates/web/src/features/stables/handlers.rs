use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::stable::{CreateStableRequest, UpdateStableRequest},
    models::Stable,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stables",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All stables", body = Vec<Stable>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stables"
)]
pub async fn list_stables(State(db): State<Database>) -> Result<Response, WebError> {
    let stables = services::list_stables(db.pool()).await?;

    Ok(Json(stables).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stables/{id}",
    params(
        ("id" = Uuid, Path, description = "Stable ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stable found", body = Stable),
        (status = 404, description = "Stable not found")
    ),
    tag = "stables"
)]
pub async fn get_stable(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stable = services::get_stable(db.pool(), id).await?;

    Ok(Json(stable).into_response())
}

#[utoipa::path(
    post,
    path = "/api/stables",
    request_body = CreateStableRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Stable created", body = Stable),
        (status = 400, description = "Validation error")
    ),
    tag = "stables"
)]
pub async fn create_stable(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateStableRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let stable = services::create_stable(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(stable)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/stables/{id}",
    params(
        ("id" = Uuid, Path, description = "Stable ID")
    ),
    request_body = UpdateStableRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stable updated", body = Stable),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Stable not found")
    ),
    tag = "stables"
)]
pub async fn update_stable(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStableRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let existing = services::get_stable(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.owner_id)?;

    let stable = services::update_stable(db.pool(), id, &req).await?;

    Ok(Json(stable).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/stables/{id}",
    params(
        ("id" = Uuid, Path, description = "Stable ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Stable deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Stable not found")
    ),
    tag = "stables"
)]
pub async fn delete_stable(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let existing = services::get_stable(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.owner_id)?;

    services::delete_stable(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
