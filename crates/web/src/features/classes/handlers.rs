use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        competition_class::{ClassDetailResponse, CreateClassRequest, UpdateClassRequest},
        registration::RegistrationDetailResponse,
    },
    models::CompetitionClass,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "All competition classes", body = Vec<CompetitionClass>)
    ),
    tag = "classes"
)]
pub async fn list_classes(State(db): State<Database>) -> Result<Response, WebError> {
    let classes = services::list_classes(db.pool()).await?;

    Ok(Json(classes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(
        ("id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class found", body = CompetitionClass),
        (status = 404, description = "Class not found")
    ),
    tag = "classes"
)]
pub async fn get_class(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let class = services::get_class(db.pool(), id).await?;

    Ok(Json(class).into_response())
}

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Class created", body = CompetitionClass),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "classes"
)]
pub async fn create_class(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateClassRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let class = services::create_class(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(class)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(
        ("id" = Uuid, Path, description = "Class ID")
    ),
    request_body = UpdateClassRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Class updated", body = CompetitionClass),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Class not found")
    ),
    tag = "classes"
)]
pub async fn update_class(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClassRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let existing = services::get_class(db.pool(), id).await?;
    services::check_class_editor(&user, &existing)?;

    let class = services::update_class(db.pool(), id, &req).await?;

    Ok(Json(class).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(
        ("id" = Uuid, Path, description = "Class ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "Class not found")
    ),
    tag = "classes"
)]
pub async fn delete_class(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let existing = services::get_class(db.pool(), id).await?;
    services::check_class_editor(&user, &existing)?;

    services::delete_class(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/classes/{class_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("class_id" = Uuid, Path, description = "Class ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Class with its participants", body = ClassDetailResponse),
        (status = 404, description = "Class not found in this event")
    ),
    tag = "classes"
)]
pub async fn get_class_detail(
    State(db): State<Database>,
    Path((event_id, class_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let detail = services::get_class_detail(db.pool(), event_id, class_id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/classes/{class_id}/users/{user_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("class_id" = Uuid, Path, description = "Class ID"),
        ("user_id" = Uuid, Path, description = "Rider ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The rider's registration with all scores", body = RegistrationDetailResponse),
        (status = 404, description = "Rider is not registered in this class")
    ),
    tag = "classes"
)]
pub async fn get_participant_detail(
    State(db): State<Database>,
    Path((event_id, class_id, user_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let detail =
        services::get_participant_detail(db.pool(), event_id, class_id, user_id).await?;

    Ok(Json(detail).into_response())
}
