use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        auth::{LoginRequest, LoginResponse, SignUpRequest},
        user::{ProfileResponse, UserResponse},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services::{self, SessionTtl};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Rider account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn sign_up(
    State(db): State<Database>,
    Json(req): Json<SignUpRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::sign_up(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No account with this email")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    Extension(ttl): Extension<SessionTtl>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::login(db.pool(), &req, ttl).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Caller profile with horses, stables and registrations", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn me(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let profile = services::profile(db.pool(), user.user_id).await?;

    Ok(Json(profile).into_response())
}
