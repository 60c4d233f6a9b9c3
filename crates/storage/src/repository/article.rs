use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::article::{CreateArticleRequest, CreateJumpingArticleRequest, UpdateArticleRequest};
use crate::error::{Result, StorageError};
use crate::models::{Article, DressageArticle, EnduranceArticle, JumpingArticle};
use crate::services::articles::DressageLine;

const MISSING_ARTICLE: &str = "Article does not exist";

pub struct ArticleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArticleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, req: &CreateArticleRequest) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (user_id, name, article_type)
            VALUES ($1, $2, $3)
            RETURNING article_id, user_id, name, article_type, created_at
            "#,
        )
        .bind(user_id)
        .bind(&req.name)
        .bind(req.article_type)
        .fetch_one(self.pool)
        .await?;

        Ok(article)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            SELECT article_id, user_id, name, article_type, created_at
            FROM articles
            WHERE article_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(article)
    }

    pub async fn list(&self) -> Result<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT article_id, user_id, name, article_type, created_at
            FROM articles
            ORDER BY created_at, name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(articles)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateArticleRequest) -> Result<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET
                name = COALESCE($2, name),
                article_type = COALESCE($3, article_type)
            WHERE article_id = $1
            RETURNING article_id, user_id, name, article_type, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(req.article_type)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(article)
    }

    /// Lines go with the sheet.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn add_dressage(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        line: &DressageLine,
    ) -> Result<DressageArticle> {
        let article = sqlx::query_as::<_, DressageArticle>(
            r#"
            INSERT INTO dressage_articles (article_id, user_id, "move", multiplier)
            VALUES ($1, $2, $3, $4)
            RETURNING dressage_article_id, article_id, user_id, "move", multiplier, created_at
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .bind(&line.move_label)
        .bind(line.multiplier)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint(MISSING_ARTICLE))?;

        Ok(article)
    }

    pub async fn add_jumping(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        req: &CreateJumpingArticleRequest,
    ) -> Result<JumpingArticle> {
        let article = sqlx::query_as::<_, JumpingArticle>(
            r#"
            INSERT INTO jumping_articles (article_id, user_id, input, sort_priority)
            VALUES ($1, $2, $3, $4)
            RETURNING jumping_article_id, article_id, user_id, input, sort_priority, created_at
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .bind(&req.input)
        .bind(req.sort_priority)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint(MISSING_ARTICLE))?;

        Ok(article)
    }

    pub async fn add_endurance(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        gate: &str,
    ) -> Result<EnduranceArticle> {
        let article = sqlx::query_as::<_, EnduranceArticle>(
            r#"
            INSERT INTO endurance_articles (article_id, user_id, gate)
            VALUES ($1, $2, $3)
            RETURNING endurance_article_id, article_id, user_id, gate, created_at
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .bind(gate)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint(MISSING_ARTICLE))?;

        Ok(article)
    }

    pub async fn dressage_for(&self, article_ids: &[Uuid]) -> Result<Vec<DressageArticle>> {
        let lines = sqlx::query_as::<_, DressageArticle>(
            r#"
            SELECT dressage_article_id, article_id, user_id, "move", multiplier, created_at
            FROM dressage_articles
            WHERE article_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(article_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    pub async fn jumping_for(&self, article_ids: &[Uuid]) -> Result<Vec<JumpingArticle>> {
        let lines = sqlx::query_as::<_, JumpingArticle>(
            r#"
            SELECT jumping_article_id, article_id, user_id, input, sort_priority, created_at
            FROM jumping_articles
            WHERE article_id = ANY($1)
            ORDER BY sort_priority, created_at
            "#,
        )
        .bind(article_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    pub async fn endurance_for(&self, article_ids: &[Uuid]) -> Result<Vec<EnduranceArticle>> {
        let lines = sqlx::query_as::<_, EnduranceArticle>(
            r#"
            SELECT endurance_article_id, article_id, user_id, gate, created_at
            FROM endurance_articles
            WHERE article_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(article_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}
