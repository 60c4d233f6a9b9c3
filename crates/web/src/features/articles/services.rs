use sqlx::PgPool;
use storage::{
    dto::article::{
        ArticleDetail, CreateArticleRequest, CreateDressageArticleRequest,
        CreateEnduranceArticleRequest, CreateJumpingArticleRequest, UpdateArticleRequest,
    },
    error::{Result, StorageError},
    models::{Article, ClassType, DressageArticle, EnduranceArticle, JumpingArticle},
    repository::ArticleRepository,
    services::articles,
};
use uuid::Uuid;

async fn with_lines(pool: &PgPool, sheets: Vec<Article>) -> Result<Vec<ArticleDetail>> {
    let repo = ArticleRepository::new(pool);
    let ids: Vec<Uuid> = sheets.iter().map(|a| a.article_id).collect();

    let dressage = repo.dressage_for(&ids).await?;
    let jumping = repo.jumping_for(&ids).await?;
    let endurance = repo.endurance_for(&ids).await?;

    Ok(articles::attach_lines(sheets, dressage, jumping, endurance))
}

pub async fn list_articles(pool: &PgPool) -> Result<Vec<ArticleDetail>> {
    let sheets = ArticleRepository::new(pool).list().await?;
    with_lines(pool, sheets).await
}

pub async fn get_article(pool: &PgPool, id: Uuid) -> Result<ArticleDetail> {
    let sheet = ArticleRepository::new(pool).find_by_id(id).await?;

    with_lines(pool, vec![sheet])
        .await?
        .pop()
        .ok_or(StorageError::NotFound)
}

pub async fn create_article(
    pool: &PgPool,
    user_id: Uuid,
    request: &CreateArticleRequest,
) -> Result<Article> {
    ArticleRepository::new(pool).create(user_id, request).await
}

pub async fn update_article(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateArticleRequest,
) -> Result<Article> {
    ArticleRepository::new(pool).update(id, request).await
}

pub async fn delete_article(pool: &PgPool, id: Uuid) -> Result<()> {
    ArticleRepository::new(pool).delete(id).await
}

pub async fn create_dressage_article(
    pool: &PgPool,
    user_id: Uuid,
    article_id: Uuid,
    request: &CreateDressageArticleRequest,
) -> Result<DressageArticle> {
    let repo = ArticleRepository::new(pool);
    let sheet = repo.find_by_id(article_id).await?;
    articles::ensure_article_type(&sheet, ClassType::Dressage)?;

    let line = articles::dressage_line(request);
    repo.add_dressage(article_id, user_id, &line).await
}

pub async fn create_jumping_article(
    pool: &PgPool,
    user_id: Uuid,
    article_id: Uuid,
    request: &CreateJumpingArticleRequest,
) -> Result<JumpingArticle> {
    let repo = ArticleRepository::new(pool);
    let sheet = repo.find_by_id(article_id).await?;
    articles::ensure_article_type(&sheet, ClassType::ShowJumping)?;

    repo.add_jumping(article_id, user_id, request).await
}

pub async fn create_endurance_article(
    pool: &PgPool,
    user_id: Uuid,
    article_id: Uuid,
    request: &CreateEnduranceArticleRequest,
) -> Result<EnduranceArticle> {
    let repo = ArticleRepository::new(pool);
    let sheet = repo.find_by_id(article_id).await?;
    articles::ensure_article_type(&sheet, ClassType::Endurance)?;

    repo.add_endurance(article_id, user_id, &articles::gate_label(request.gate))
        .await
}
