use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::article::{
        ArticleDetail, CreateArticleRequest, CreateDressageArticleRequest,
        CreateEnduranceArticleRequest, CreateJumpingArticleRequest, UpdateArticleRequest,
    },
    models::{Article, DressageArticle, EnduranceArticle, JumpingArticle, Role},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/articles",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All test sheets with their lines", body = Vec<ArticleDetail>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "articles"
)]
pub async fn list_articles(State(db): State<Database>) -> Result<Response, WebError> {
    let articles = services::list_articles(db.pool()).await?;

    Ok(Json(articles).into_response())
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Test sheet found", body = ArticleDetail),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn get_article(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let article = services::get_article(db.pool(), id).await?;

    Ok(Json(article).into_response())
}

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Supervisors only")
    ),
    tag = "articles"
)]
pub async fn create_article(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateArticleRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;

    let article = services::create_article(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(article)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    request_body = UpdateArticleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Article updated", body = Article),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn update_article(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;

    let article = services::update_article(db.pool(), id, &req).await?;

    Ok(Json(article).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Article and its lines deleted"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn delete_article(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;

    services::delete_article(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/articles/{id}/dressage",
    params(
        ("id" = Uuid, Path, description = "Dressage article ID")
    ),
    request_body = CreateDressageArticleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Movement added", body = DressageArticle),
        (status = 400, description = "Article is not a dressage sheet"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn create_dressage_article(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateDressageArticleRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;

    let line = services::create_dressage_article(db.pool(), user.user_id, id, &req).await?;

    Ok((StatusCode::CREATED, Json(line)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/articles/{id}/jumping",
    params(
        ("id" = Uuid, Path, description = "Show jumping article ID")
    ),
    request_body = CreateJumpingArticleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Obstacle added", body = JumpingArticle),
        (status = 400, description = "Article is not a show jumping sheet"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn create_jumping_article(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateJumpingArticleRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;

    let line = services::create_jumping_article(db.pool(), user.user_id, id, &req).await?;

    Ok((StatusCode::CREATED, Json(line)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/articles/{id}/endurance",
    params(
        ("id" = Uuid, Path, description = "Endurance article ID")
    ),
    request_body = CreateEnduranceArticleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Gate added", body = EnduranceArticle),
        (status = 400, description = "Article is not an endurance sheet"),
        (status = 403, description = "Supervisors only"),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn create_endurance_article(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateEnduranceArticleRequest>,
) -> Result<Response, WebError> {
    user.require_role(&[Role::Supervisor])?;
    req.validate()?;

    let line = services::create_endurance_article(db.pool(), user.user_id, id, &req).await?;

    Ok((StatusCode::CREATED, Json(line)).into_response())
}
