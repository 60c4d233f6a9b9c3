use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::score::{
        ConsistencyResponse, CreateDressageScoreRequest, CreateEnduranceScoreRequest,
        CreateJumpingScoreRequest, DressageScoreResponse, RegistrationJudgeScoresResponse,
        RegistrationScores, UpdateDressageScoreRequest, UpdateEnduranceScoreRequest,
        UpdateJumpingScoreRequest, UserScoresResponse, WinnerQuery, WinnerResponse,
    },
    models::{ClassType, DressageScore, EnduranceScore, JumpingScore, Role, ScoreDifferenceRecord},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

/// Roles allowed to record and edit scores
const SCORERS: [Role; 2] = [Role::Judge, Role::Supervisor];

// Dressage

#[utoipa::path(
    get,
    path = "/api/scores/dressage",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All dressage scores", body = Vec<DressageScore>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn list_dressage_scores(State(db): State<Database>) -> Result<Response, WebError> {
    let scores = services::list_dressage_scores(db.pool()).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    get,
    path = "/api/scores/dressage/mine",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Dressage scores given by the caller", body = Vec<DressageScore>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn list_own_dressage_scores(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let scores = services::list_own_dressage_scores(db.pool(), user.user_id).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scores/dressage",
    request_body = CreateDressageScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Mark recorded under the next move", body = DressageScoreResponse),
        (status = 400, description = "Registration is not in a dressage class"),
        (status = 403, description = "Judges and supervisors only"),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn create_dressage_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateDressageScoreRequest>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;
    req.validate()?;

    let response = services::create_dressage_score(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/scores/dressage/{id}",
    params(
        ("id" = Uuid, Path, description = "Dressage score ID")
    ),
    request_body = UpdateDressageScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Mark recomputed", body = DressageScoreResponse),
        (status = 403, description = "Not the judge who gave this score"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn update_dressage_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDressageScoreRequest>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;
    req.validate()?;

    let existing = services::find_dressage_score(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.judge_id)?;

    let response = services::update_dressage_score(db.pool(), id, &req).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/scores/dressage/{id}",
    params(
        ("id" = Uuid, Path, description = "Dressage score ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 403, description = "Not the judge who gave this score"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn delete_dressage_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;

    let existing = services::find_dressage_score(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.judge_id)?;

    services::delete_dressage_score(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

// Show jumping

#[utoipa::path(
    get,
    path = "/api/scores/jumping",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All jumping scores, fewest faults first", body = Vec<JumpingScore>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn list_jumping_scores(State(db): State<Database>) -> Result<Response, WebError> {
    let scores = services::list_jumping_scores(db.pool()).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    get,
    path = "/api/scores/jumping/winner",
    params(WinnerQuery),
    responses(
        (status = 200, description = "Fewest faults, then fastest time", body = WinnerResponse),
        (status = 404, description = "No jumping scores recorded")
    ),
    tag = "scores"
)]
pub async fn get_jumping_winner(
    State(db): State<Database>,
    Query(query): Query<WinnerQuery>,
) -> Result<Response, WebError> {
    let winner = services::jumping_winner(db.pool(), query.class_id).await?;

    Ok(Json(WinnerResponse { winner }).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scores/jumping",
    request_body = CreateJumpingScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Round recorded", body = JumpingScore),
        (status = 400, description = "Registration is not in a show jumping class"),
        (status = 403, description = "Judges and supervisors only"),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn create_jumping_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateJumpingScoreRequest>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;
    req.validate()?;

    let score = services::create_jumping_score(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(score)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/scores/jumping/{id}",
    params(
        ("id" = Uuid, Path, description = "Jumping score ID")
    ),
    request_body = UpdateJumpingScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Round recomputed", body = JumpingScore),
        (status = 403, description = "Not the judge who gave this score"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn update_jumping_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJumpingScoreRequest>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;
    req.validate()?;

    let existing = services::find_jumping_score(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.judge_id)?;

    let score = services::update_jumping_score(db.pool(), id, &req).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/scores/jumping/{id}",
    params(
        ("id" = Uuid, Path, description = "Jumping score ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 403, description = "Not the judge who gave this score"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn delete_jumping_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;

    let existing = services::find_jumping_score(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.judge_id)?;

    services::delete_jumping_score(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

// Endurance

#[utoipa::path(
    get,
    path = "/api/scores/endurance",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All endurance cards", body = Vec<EnduranceScore>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn list_endurance_scores(State(db): State<Database>) -> Result<Response, WebError> {
    let scores = services::list_endurance_scores(db.pool()).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scores/endurance",
    request_body = CreateEnduranceScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Card opened with every clock at now", body = EnduranceScore),
        (status = 400, description = "Registration is not in an endurance class"),
        (status = 403, description = "Judges and supervisors only"),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn create_endurance_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateEnduranceScoreRequest>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;
    req.validate()?;

    let score = services::create_endurance_score(db.pool(), user.user_id, req.registration_id).await?;

    Ok((StatusCode::CREATED, Json(score)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/scores/endurance/{id}",
    params(
        ("id" = Uuid, Path, description = "Endurance score ID")
    ),
    request_body = UpdateEnduranceScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Clocks updated", body = EnduranceScore),
        (status = 400, description = "Malformed clock reading"),
        (status = 403, description = "Not the judge who opened this card"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn update_endurance_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEnduranceScoreRequest>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;
    req.validate()?;

    let existing = services::find_endurance_score(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.judge_id)?;

    let score = services::update_endurance_score(db.pool(), id, &req).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/scores/endurance/{id}",
    params(
        ("id" = Uuid, Path, description = "Endurance score ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 403, description = "Not the judge who opened this card"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn delete_endurance_score(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&SCORERS)?;

    let existing = services::find_endurance_score(db.pool(), id).await?;
    user.require_owner_or_supervisor(existing.judge_id)?;

    services::delete_endurance_score(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

// Per registration

#[utoipa::path(
    get,
    path = "/api/registrations/{id}/scores/{class_type}",
    params(
        ("id" = Uuid, Path, description = "Registration ID"),
        ("class_type" = ClassType, Path, description = "DRESSAGE, SHOW_JUMPING or ENDURANCE")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Ordered scores of one discipline", body = RegistrationScores),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn get_registration_scores(
    State(db): State<Database>,
    Path((id, class_type)): Path<(Uuid, ClassType)>,
) -> Result<Response, WebError> {
    let scores = services::registration_scores(db.pool(), id, class_type).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    post,
    path = "/api/registrations/{id}/consistency",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Judge consistency computed and recorded", body = ConsistencyResponse),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn record_consistency(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    let response = services::record_consistency(db.pool(), id, user.user_id).await?;

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/{id}/consistency",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Recorded consistency checks, newest first", body = Vec<ScoreDifferenceRecord>),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn list_consistency_history(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let history = services::consistency_history(db.pool(), id).await?;

    Ok(Json(history).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/{id}/users/{user_id}/scores",
    params(
        ("id" = Uuid, Path, description = "Registration ID"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every score the user gave on this registration", body = UserScoresResponse),
        (status = 404, description = "Registration or user not found")
    ),
    tag = "scores"
)]
pub async fn get_user_scores(
    State(db): State<Database>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let scores = services::user_scores(db.pool(), id, user_id).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/{id}/judges/scores",
    params(
        ("id" = Uuid, Path, description = "Registration ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Jumping and endurance scores grouped by judge", body = RegistrationJudgeScoresResponse),
        (status = 404, description = "Registration not found")
    ),
    tag = "scores"
)]
pub async fn get_judge_scores(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let scores = services::judge_scores(db.pool(), id).await?;

    Ok(Json(scores).into_response())
}
