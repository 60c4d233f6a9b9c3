use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        event::{AssignJudgeRequest, CreateEventRequest, EventWithClasses, UpdateEventRequest},
        user::ScoreCounts,
    },
    models::{Event, EventStatus, Role},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All events", body = Vec<Event>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "events"
)]
pub async fn list_events(State(db): State<Database>) -> Result<Response, WebError> {
    let events = services::list_events(db.pool()).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/status/{status}",
    params(
        ("status" = EventStatus, Path, description = "UPCOMING, LIVE or ENDED")
    ),
    responses(
        (status = 200, description = "Events in this state with their classes", body = Vec<EventWithClasses>),
        (status = 400, description = "Unknown status")
    ),
    tag = "events"
)]
pub async fn list_events_by_status(
    State(db): State<Database>,
    Path(status): Path<EventStatus>,
) -> Result<Response, WebError> {
    let events = services::list_events_by_status(db.pool(), status).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event with its classes", body = EventWithClasses),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let event = services::get_event_with_classes(db.pool(), id).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Supervisors only")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;
    req.validate_dates()
        .map_err(|msg| WebError::BadRequest(msg.to_string()))?;

    let event = services::create_event(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;

    let existing = services::get_event(db.pool(), id).await?;
    req.validate_dates(&existing)
        .map_err(|msg| WebError::BadRequest(msg.to_string()))?;

    let event = services::update_event(db.pool(), id, &req).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    services::delete_event(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/judge",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = AssignJudgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Judge assigned", body = Event),
        (status = 400, description = "Not a judge, or already assigned"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Event or user not found")
    ),
    tag = "events"
)]
pub async fn assign_judge(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignJudgeRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    let event = services::assign_judge(db.pool(), id, req.user_id).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/participants",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registered riders with score counts", body = Vec<ScoreCounts>),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn list_participants(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let participants = services::list_participants(db.pool(), id).await?;

    Ok(Json(participants).into_response())
}
