use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::registration::{
        CreateRegistrationRequest, RegistrationDetailResponse, UpdateRegistrationRequest,
        UserRegistrationSummary,
    },
    models::Registration,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/registrations",
    responses(
        (status = 200, description = "All registrations", body = Vec<Registration>)
    ),
    tag = "registrations"
)]
pub async fn list_registrations(State(db): State<Database>) -> Result<Response, WebError> {
    let registrations = services::list_registrations(db.pool()).await?;

    Ok(Json(registrations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/mine",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's registrations", body = Vec<UserRegistrationSummary>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "registrations"
)]
pub async fn list_own_registrations(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let registrations = services::list_own_registrations(db.pool(), user.user_id).await?;

    Ok(Json(registrations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    responses(
        (status = 200, description = "Registration with rider and scores", body = RegistrationDetailResponse),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations"
)]
pub async fn get_registration(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_registration_detail(db.pool(), id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Registered", body = Registration),
        (status = 400, description = "Class does not belong to the event"),
        (status = 404, description = "Horse, class or event not found"),
        (status = 409, description = "Already registered for this class")
    ),
    tag = "registrations"
)]
pub async fn create_registration(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = services::create_registration(db.pool(), &user, &req).await?;

    Ok((StatusCode::CREATED, Json(registration)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    request_body = UpdateRegistrationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registration updated", body = Registration),
        (status = 403, description = "Not your registration"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Already registered for this class")
    ),
    tag = "registrations"
)]
pub async fn update_registration(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRegistrationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = services::update_registration(db.pool(), &user, id, &req).await?;

    Ok(Json(registration).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Registration cancelled"),
        (status = 403, description = "Not your registration"),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations"
)]
pub async fn cancel_registration(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::cancel_registration(db.pool(), &user, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
