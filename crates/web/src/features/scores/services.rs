//! Thin adapters running the scoring workflow against PostgreSQL.

use chrono::Local;
use sqlx::PgPool;
use storage::{
    dto::score::{
        ConsistencyResponse, CreateDressageScoreRequest, CreateJumpingScoreRequest,
        DressageScoreResponse, JumpingStanding, RegistrationJudgeScoresResponse,
        RegistrationScores, UpdateDressageScoreRequest, UpdateEnduranceScoreRequest,
        UpdateJumpingScoreRequest, UserScoresResponse,
    },
    error::Result,
    models::{ClassType, DressageScore, EnduranceScore, JumpingScore, ScoreDifferenceRecord},
    repository::ScoreRepository,
    services::scoring_workflow,
    store::ScoringStore,
};
use uuid::Uuid;

pub async fn list_dressage_scores(pool: &PgPool) -> Result<Vec<DressageScore>> {
    ScoreRepository::new(pool).list_dressage().await
}

pub async fn list_own_dressage_scores(pool: &PgPool, judge_id: Uuid) -> Result<Vec<DressageScore>> {
    ScoreRepository::new(pool)
        .dressage_scores_by_judge(judge_id)
        .await
}

pub async fn find_dressage_score(pool: &PgPool, id: Uuid) -> Result<DressageScore> {
    ScoreRepository::new(pool).find_dressage_score(id).await
}

pub async fn create_dressage_score(
    pool: &PgPool,
    judge_id: Uuid,
    request: &CreateDressageScoreRequest,
) -> Result<DressageScoreResponse> {
    scoring_workflow::create_dressage_score(&ScoreRepository::new(pool), judge_id, request).await
}

pub async fn update_dressage_score(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateDressageScoreRequest,
) -> Result<DressageScoreResponse> {
    scoring_workflow::update_dressage_score(&ScoreRepository::new(pool), id, request).await
}

pub async fn delete_dressage_score(pool: &PgPool, id: Uuid) -> Result<()> {
    ScoreRepository::new(pool).delete_dressage(id).await
}

pub async fn list_jumping_scores(pool: &PgPool) -> Result<Vec<JumpingScore>> {
    ScoreRepository::new(pool).list_jumping().await
}

pub async fn find_jumping_score(pool: &PgPool, id: Uuid) -> Result<JumpingScore> {
    ScoreRepository::new(pool).find_jumping_score(id).await
}

pub async fn create_jumping_score(
    pool: &PgPool,
    judge_id: Uuid,
    request: &CreateJumpingScoreRequest,
) -> Result<JumpingScore> {
    scoring_workflow::create_jumping_score(&ScoreRepository::new(pool), judge_id, request).await
}

pub async fn update_jumping_score(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateJumpingScoreRequest,
) -> Result<JumpingScore> {
    scoring_workflow::update_jumping_score(&ScoreRepository::new(pool), id, request).await
}

pub async fn delete_jumping_score(pool: &PgPool, id: Uuid) -> Result<()> {
    ScoreRepository::new(pool).delete_jumping(id).await
}

/// Best jumping round, optionally within one class
pub async fn jumping_winner(pool: &PgPool, class_id: Option<Uuid>) -> Result<JumpingStanding> {
    scoring_workflow::jumping_winner(&ScoreRepository::new(pool), class_id).await
}

pub async fn list_endurance_scores(pool: &PgPool) -> Result<Vec<EnduranceScore>> {
    ScoreRepository::new(pool).list_endurance().await
}

pub async fn find_endurance_score(pool: &PgPool, id: Uuid) -> Result<EnduranceScore> {
    ScoreRepository::new(pool).find_endurance_score(id).await
}

/// Opens an endurance card with every clock set to now
pub async fn create_endurance_score(
    pool: &PgPool,
    judge_id: Uuid,
    registration_id: Uuid,
) -> Result<EnduranceScore> {
    let now = Local::now().naive_local();
    scoring_workflow::create_endurance_score(&ScoreRepository::new(pool), judge_id, registration_id, now)
        .await
}

/// Clock readings are taken on today's date
pub async fn update_endurance_score(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateEnduranceScoreRequest,
) -> Result<EnduranceScore> {
    let today = Local::now().date_naive();
    scoring_workflow::update_endurance_score(&ScoreRepository::new(pool), id, request, today).await
}

pub async fn delete_endurance_score(pool: &PgPool, id: Uuid) -> Result<()> {
    ScoreRepository::new(pool).delete_endurance(id).await
}

pub async fn registration_scores(
    pool: &PgPool,
    registration_id: Uuid,
    class_type: ClassType,
) -> Result<RegistrationScores> {
    scoring_workflow::registration_scores(&ScoreRepository::new(pool), registration_id, class_type)
        .await
}

pub async fn record_consistency(
    pool: &PgPool,
    registration_id: Uuid,
    requested_by: Uuid,
) -> Result<ConsistencyResponse> {
    scoring_workflow::record_consistency(&ScoreRepository::new(pool), registration_id, requested_by)
        .await
}

pub async fn consistency_history(
    pool: &PgPool,
    registration_id: Uuid,
) -> Result<Vec<ScoreDifferenceRecord>> {
    scoring_workflow::consistency_history(&ScoreRepository::new(pool), registration_id).await
}

pub async fn user_scores(
    pool: &PgPool,
    registration_id: Uuid,
    user_id: Uuid,
) -> Result<UserScoresResponse> {
    scoring_workflow::user_scores(&ScoreRepository::new(pool), registration_id, user_id).await
}

pub async fn judge_scores(
    pool: &PgPool,
    registration_id: Uuid,
) -> Result<RegistrationJudgeScoresResponse> {
    scoring_workflow::judge_scores(&ScoreRepository::new(pool), registration_id).await
}
