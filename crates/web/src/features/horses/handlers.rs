use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::horse::{CreateHorseRequest, UpdateHorseRequest},
    models::Horse,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/horses",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Horses owned by the caller", body = Vec<Horse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "horses"
)]
pub async fn list_horses(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let horses = services::list_own_horses(db.pool(), user.user_id).await?;

    Ok(Json(horses).into_response())
}

#[utoipa::path(
    get,
    path = "/api/horses/{id}",
    params(
        ("id" = Uuid, Path, description = "Horse ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Horse found", body = Horse),
        (status = 404, description = "Horse not found")
    ),
    tag = "horses"
)]
pub async fn get_horse(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let horse = services::get_horse(db.pool(), id).await?;

    Ok(Json(horse).into_response())
}

#[utoipa::path(
    post,
    path = "/api/horses",
    request_body = CreateHorseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Horse registered", body = Horse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Stable not found")
    ),
    tag = "horses"
)]
pub async fn create_horse(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateHorseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let horse = services::create_horse(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(horse)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/horses/{id}",
    params(
        ("id" = Uuid, Path, description = "Horse ID")
    ),
    request_body = UpdateHorseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Horse updated", body = Horse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Horse not found")
    ),
    tag = "horses"
)]
pub async fn update_horse(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateHorseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let existing = services::get_horse(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.owner_id)?;

    let horse = services::update_horse(db.pool(), id, &req).await?;

    Ok(Json(horse).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/horses/{id}",
    params(
        ("id" = Uuid, Path, description = "Horse ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Horse deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Horse not found")
    ),
    tag = "horses"
)]
pub async fn delete_horse(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let existing = services::get_horse(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.owner_id)?;

    services::delete_horse(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
