use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth::SignUpRequest;
use crate::dto::user::{ScoreCounts, UpdateUserRequest, UserSummary};
use crate::error::{Result, StorageError};
use crate::models::{Role, User, UserSession};

/// Repository for users and their login sessions
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a rider account. Duplicate emails are a constraint violation.
    pub async fn create(&self, req: &SignUpRequest, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, nationality, phone, dob, gender)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING user_id, name, email, password_hash, role, nationality, phone, dob,
                      gender, image_url, is_verified, created_at
            "#,
        )
        .bind(&req.name)
        .bind(req.email.to_lowercase())
        .bind(password_hash)
        .bind(Role::Rider)
        .bind(&req.nationality)
        .bind(&req.phone)
        .bind(req.dob)
        .bind(&req.gender)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Email already registered"))?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, role, nationality, phone, dob,
                   gender, image_url, is_verified, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, role, nationality, phone, dob,
                   gender, image_url, is_verified, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, role, nationality, phone, dob,
                   gender, image_url, is_verified, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn list_by_role(&self, role: Role) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password_hash, role, nationality, phone, dob,
                   gender, image_url, is_verified, created_at
            FROM users
            WHERE role = $1
            ORDER BY name
            "#,
        )
        .bind(role)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Partial update; `None` fields keep their stored value
    pub async fn update(&self, id: Uuid, req: &UpdateUserRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                nationality = COALESCE($3, nationality),
                phone = COALESCE($4, phone),
                dob = COALESCE($5, dob),
                gender = COALESCE($6, gender),
                image_url = COALESCE($7, image_url)
            WHERE user_id = $1
            RETURNING user_id, name, email, password_hash, role, nationality, phone, dob,
                      gender, image_url, is_verified, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.nationality)
        .bind(&req.phone)
        .bind(req.dob)
        .bind(&req.gender)
        .bind(&req.image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Number of scores of each discipline the user has given
    pub async fn score_counts(&self, id: Uuid) -> Result<ScoreCounts> {
        let counts = sqlx::query_as::<_, ScoreCounts>(
            r#"
            SELECT u.user_id, u.name, u.email,
                   (SELECT COUNT(*) FROM jumping_scores j WHERE j.judge_id = u.user_id)
                       AS jumping_scores_count,
                   (SELECT COUNT(*) FROM dressage_scores d WHERE d.judge_id = u.user_id)
                       AS dressage_scores_count,
                   (SELECT COUNT(*) FROM endurance_scores e WHERE e.judge_id = u.user_id)
                       AS endurance_scores_count
            FROM users u
            WHERE u.user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(counts)
    }

    pub async fn find_summary(&self, id: Uuid) -> Result<UserSummary> {
        let summary = sqlx::query_as::<_, UserSummary>(
            "SELECT user_id, name, email, role FROM users WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(summary)
    }

    pub async fn summaries(&self, ids: &[Uuid]) -> Result<Vec<UserSummary>> {
        let summaries = sqlx::query_as::<_, UserSummary>(
            "SELECT user_id, name, email, role FROM users WHERE user_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: NaiveDateTime,
    ) -> Result<UserSession> {
        let session = sqlx::query_as::<_, UserSession>(
            r#"
            INSERT INTO user_sessions (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token_hash, user_id, created_at, expires_at
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// User owning an unexpired session with this token digest
    pub async fn find_by_session(&self, token_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.name, u.email, u.password_hash, u.role, u.nationality,
                   u.phone, u.dob, u.gender, u.image_url, u.is_verified, u.created_at
            FROM user_sessions s
            INNER JOIN users u ON u.user_id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > (NOW() AT TIME ZONE 'UTC')
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Drops the user's expired sessions; returns how many were removed
    pub async fn purge_expired_sessions(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_sessions
            WHERE user_id = $1 AND expires_at <= (NOW() AT TIME ZONE 'UTC')
            "#,
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
