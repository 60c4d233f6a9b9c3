use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::score::JumpingStanding;
use crate::dto::user::UserSummary;
use crate::error::{Result, StorageError};
use crate::models::{
    DressageScore, EnduranceScore, JumpingScore, RegistrationClass, ScoreDifferenceRecord,
};
use crate::repository::user::UserRepository;
use crate::services::scoring::{self, DressageComputation, JumpingComputation};
use crate::store::{NewDressageScore, ScoringStore, UserRegistrationScores};

/// Repository for dressage, jumping and endurance scores and the
/// judge-consistency history
pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_dressage(&self) -> Result<Vec<DressageScore>> {
        let scores = sqlx::query_as::<_, DressageScore>(
            r#"
            SELECT score_id, registration_id, judge_id, "move", multiplier, scores,
                   total_score, value, comment, created_at
            FROM dressage_scores
            ORDER BY registration_id, judge_id, created_at
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Every jumping score in standings order
    pub async fn list_jumping(&self) -> Result<Vec<JumpingScore>> {
        let scores = sqlx::query_as::<_, JumpingScore>(
            r#"
            SELECT score_id, registration_id, judge_id, faults, time, total_score, value, created_at
            FROM jumping_scores
            ORDER BY faults ASC, time ASC, created_at ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    pub async fn list_endurance(&self) -> Result<Vec<EnduranceScore>> {
        let scores = sqlx::query_as::<_, EnduranceScore>(
            r#"
            SELECT score_id, registration_id, judge_id, arrival, departure, recovery,
                   elapsed_time, created_at
            FROM endurance_scores
            ORDER BY elapsed_time ASC NULLS LAST, created_at ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    pub async fn delete_dressage(&self, id: Uuid) -> Result<()> {
        self.delete_from("DELETE FROM dressage_scores WHERE score_id = $1", id)
            .await
    }

    pub async fn delete_jumping(&self, id: Uuid) -> Result<()> {
        self.delete_from("DELETE FROM jumping_scores WHERE score_id = $1", id)
            .await
    }

    pub async fn delete_endurance(&self, id: Uuid) -> Result<()> {
        self.delete_from("DELETE FROM endurance_scores WHERE score_id = $1", id)
            .await
    }

    async fn delete_from(&self, statement: &'static str, id: Uuid) -> Result<()> {
        let result = sqlx::query(statement).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl ScoringStore for ScoreRepository<'_> {
    async fn registration_class(&self, registration_id: Uuid) -> Result<RegistrationClass> {
        let registration = sqlx::query_as::<_, RegistrationClass>(
            r#"
            SELECT r.registration_id, c.class_type
            FROM registrations r
            INNER JOIN competition_classes c ON c.class_id = r.class_id
            WHERE r.registration_id = $1
            "#,
        )
        .bind(registration_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    /// Numbering runs under a transaction-scoped advisory lock keyed on the
    /// registration, so concurrent submissions for it are serialised.
    async fn append_dressage_score(&self, new: NewDressageScore) -> Result<DressageScore> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(new.registration_id)
            .execute(&mut *tx)
            .await?;

        let labels: Vec<String> = sqlx::query_scalar::<_, String>(
            r#"SELECT "move" FROM dressage_scores WHERE registration_id = $1 AND judge_id = $2"#,
        )
        .bind(new.registration_id)
        .bind(new.judge_id)
        .fetch_all(&mut *tx)
        .await?;

        let move_label =
            scoring::move_label(scoring::next_move_number(labels.iter().map(String::as_str)));

        let score = sqlx::query_as::<_, DressageScore>(
            r#"
            INSERT INTO dressage_scores (registration_id, judge_id, "move", multiplier, scores,
                                         total_score, value, comment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING score_id, registration_id, judge_id, "move", multiplier, scores,
                      total_score, value, comment, created_at
            "#,
        )
        .bind(new.registration_id)
        .bind(new.judge_id)
        .bind(&move_label)
        .bind(new.computation.multiplier)
        .bind(new.computation.scores)
        .bind(new.computation.total_score)
        .bind(&new.computation.value)
        .bind(&new.comment)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).into_constraint("Move already scored by this judge"))?;

        tx.commit().await?;

        Ok(score)
    }

    async fn find_dressage_score(&self, score_id: Uuid) -> Result<DressageScore> {
        let score = sqlx::query_as::<_, DressageScore>(
            r#"
            SELECT score_id, registration_id, judge_id, "move", multiplier, scores,
                   total_score, value, comment, created_at
            FROM dressage_scores
            WHERE score_id = $1
            "#,
        )
        .bind(score_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    async fn update_dressage_score(
        &self,
        score_id: Uuid,
        computation: &DressageComputation,
        comment: Option<String>,
    ) -> Result<DressageScore> {
        let score = sqlx::query_as::<_, DressageScore>(
            r#"
            UPDATE dressage_scores
            SET multiplier = $2, scores = $3, total_score = $4, value = $5, comment = $6
            WHERE score_id = $1
            RETURNING score_id, registration_id, judge_id, "move", multiplier, scores,
                      total_score, value, comment, created_at
            "#,
        )
        .bind(score_id)
        .bind(computation.multiplier)
        .bind(computation.scores)
        .bind(computation.total_score)
        .bind(&computation.value)
        .bind(comment)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    async fn dressage_scores_by_judge(&self, judge_id: Uuid) -> Result<Vec<DressageScore>> {
        let scores = sqlx::query_as::<_, DressageScore>(
            r#"
            SELECT score_id, registration_id, judge_id, "move", multiplier, scores,
                   total_score, value, comment, created_at
            FROM dressage_scores
            WHERE judge_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(judge_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    async fn dressage_scores_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<DressageScore>> {
        let scores = sqlx::query_as::<_, DressageScore>(
            r#"
            SELECT score_id, registration_id, judge_id, "move", multiplier, scores,
                   total_score, value, comment, created_at
            FROM dressage_scores
            WHERE registration_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(registration_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    async fn insert_jumping_score(
        &self,
        registration_id: Uuid,
        judge_id: Uuid,
        computation: &JumpingComputation,
    ) -> Result<JumpingScore> {
        let score = sqlx::query_as::<_, JumpingScore>(
            r#"
            INSERT INTO jumping_scores (registration_id, judge_id, faults, time, total_score, value)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING score_id, registration_id, judge_id, faults, time, total_score, value, created_at
            "#,
        )
        .bind(registration_id)
        .bind(judge_id)
        .bind(computation.faults)
        .bind(computation.time)
        .bind(computation.total_score)
        .bind(&computation.value)
        .fetch_one(self.pool)
        .await?;

        Ok(score)
    }

    async fn find_jumping_score(&self, score_id: Uuid) -> Result<JumpingScore> {
        let score = sqlx::query_as::<_, JumpingScore>(
            r#"
            SELECT score_id, registration_id, judge_id, faults, time, total_score, value, created_at
            FROM jumping_scores
            WHERE score_id = $1
            "#,
        )
        .bind(score_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    async fn update_jumping_score(
        &self,
        score_id: Uuid,
        computation: &JumpingComputation,
    ) -> Result<JumpingScore> {
        let score = sqlx::query_as::<_, JumpingScore>(
            r#"
            UPDATE jumping_scores
            SET faults = $2, time = $3, total_score = $4, value = $5
            WHERE score_id = $1
            RETURNING score_id, registration_id, judge_id, faults, time, total_score, value, created_at
            "#,
        )
        .bind(score_id)
        .bind(computation.faults)
        .bind(computation.time)
        .bind(computation.total_score)
        .bind(&computation.value)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    async fn jumping_standings(&self, class_id: Option<Uuid>) -> Result<Vec<JumpingStanding>> {
        let standings = sqlx::query_as::<_, JumpingStanding>(
            r#"
            SELECT j.score_id, j.registration_id, j.judge_id, j.faults, j.time, j.total_score,
                   j.value, u.user_id AS rider_id, u.name AS rider_name, u.email AS rider_email,
                   h.horse_id, h.name AS horse_name
            FROM jumping_scores j
            INNER JOIN registrations r ON r.registration_id = j.registration_id
            INNER JOIN users u ON u.user_id = r.user_id
            INNER JOIN horses h ON h.horse_id = r.horse_id
            WHERE ($1::uuid IS NULL OR r.class_id = $1)
            ORDER BY j.faults ASC, j.time ASC, j.created_at ASC
            "#,
        )
        .bind(class_id)
        .fetch_all(self.pool)
        .await?;

        Ok(standings)
    }

    async fn jumping_scores_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<JumpingScore>> {
        let scores = sqlx::query_as::<_, JumpingScore>(
            r#"
            SELECT score_id, registration_id, judge_id, faults, time, total_score, value, created_at
            FROM jumping_scores
            WHERE registration_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(registration_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    async fn insert_endurance_score(
        &self,
        registration_id: Uuid,
        judge_id: Uuid,
        at: NaiveDateTime,
    ) -> Result<EnduranceScore> {
        let score = sqlx::query_as::<_, EnduranceScore>(
            r#"
            INSERT INTO endurance_scores (registration_id, judge_id, arrival, departure, recovery)
            VALUES ($1, $2, $3, $3, $3)
            RETURNING score_id, registration_id, judge_id, arrival, departure, recovery,
                      elapsed_time, created_at
            "#,
        )
        .bind(registration_id)
        .bind(judge_id)
        .bind(at)
        .fetch_one(self.pool)
        .await?;

        Ok(score)
    }

    async fn find_endurance_score(&self, score_id: Uuid) -> Result<EnduranceScore> {
        let score = sqlx::query_as::<_, EnduranceScore>(
            r#"
            SELECT score_id, registration_id, judge_id, arrival, departure, recovery,
                   elapsed_time, created_at
            FROM endurance_scores
            WHERE score_id = $1
            "#,
        )
        .bind(score_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    async fn update_endurance_score(&self, score: &EnduranceScore) -> Result<EnduranceScore> {
        let updated = sqlx::query_as::<_, EnduranceScore>(
            r#"
            UPDATE endurance_scores
            SET arrival = $2, departure = $3, recovery = $4, elapsed_time = $5
            WHERE score_id = $1
            RETURNING score_id, registration_id, judge_id, arrival, departure, recovery,
                      elapsed_time, created_at
            "#,
        )
        .bind(score.score_id)
        .bind(score.arrival)
        .bind(score.departure)
        .bind(score.recovery)
        .bind(score.elapsed_time)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    async fn endurance_scores_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<EnduranceScore>> {
        let scores = sqlx::query_as::<_, EnduranceScore>(
            r#"
            SELECT score_id, registration_id, judge_id, arrival, departure, recovery,
                   elapsed_time, created_at
            FROM endurance_scores
            WHERE registration_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(registration_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    async fn insert_difference_record(
        &self,
        registration_id: Uuid,
        user_id: Uuid,
        total_average_difference: f64,
    ) -> Result<ScoreDifferenceRecord> {
        let record = sqlx::query_as::<_, ScoreDifferenceRecord>(
            r#"
            INSERT INTO score_difference_records (registration_id, user_id, total_average_difference)
            VALUES ($1, $2, $3)
            RETURNING record_id, registration_id, user_id, total_average_difference, created_at
            "#,
        )
        .bind(registration_id)
        .bind(user_id)
        .bind(total_average_difference)
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    async fn difference_records(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<ScoreDifferenceRecord>> {
        let records = sqlx::query_as::<_, ScoreDifferenceRecord>(
            r#"
            SELECT record_id, registration_id, user_id, total_average_difference, created_at
            FROM score_difference_records
            WHERE registration_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(registration_id)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    async fn user_scores_for_registration(
        &self,
        registration_id: Uuid,
        user_id: Uuid,
    ) -> Result<UserRegistrationScores> {
        let jumping = sqlx::query_as::<_, JumpingScore>(
            r#"
            SELECT score_id, registration_id, judge_id, faults, time, total_score, value, created_at
            FROM jumping_scores
            WHERE registration_id = $1 AND judge_id = $2
            ORDER BY created_at
            "#,
        )
        .bind(registration_id)
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let dressage = sqlx::query_as::<_, DressageScore>(
            r#"
            SELECT score_id, registration_id, judge_id, "move", multiplier, scores,
                   total_score, value, comment, created_at
            FROM dressage_scores
            WHERE registration_id = $1 AND judge_id = $2
            ORDER BY created_at
            "#,
        )
        .bind(registration_id)
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let endurance = sqlx::query_as::<_, EnduranceScore>(
            r#"
            SELECT score_id, registration_id, judge_id, arrival, departure, recovery,
                   elapsed_time, created_at
            FROM endurance_scores
            WHERE registration_id = $1 AND judge_id = $2
            ORDER BY created_at
            "#,
        )
        .bind(registration_id)
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(UserRegistrationScores {
            jumping,
            dressage,
            endurance,
        })
    }

    async fn find_user_summary(&self, user_id: Uuid) -> Result<UserSummary> {
        UserRepository::new(self.pool).find_summary(user_id).await
    }

    async fn user_summaries(&self, user_ids: &[Uuid]) -> Result<Vec<UserSummary>> {
        UserRepository::new(self.pool).summaries(user_ids).await
    }
}
