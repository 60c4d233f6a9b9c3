//! Storage access needed by the scoring workflow.
//!
//! The workflow in [`crate::services::scoring_workflow`] only talks to this
//! trait, so it runs the same against PostgreSQL
//! ([`crate::repository::ScoreRepository`]) and against an in-memory store in
//! tests.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::dto::score::JumpingStanding;
use crate::dto::user::UserSummary;
use crate::error::Result;
use crate::models::{
    DressageScore, EnduranceScore, JumpingScore, RegistrationClass, ScoreDifferenceRecord,
};
use crate::services::scoring::{DressageComputation, JumpingComputation};

/// Dressage mark about to be stored. The move label is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDressageScore {
    pub registration_id: Uuid,
    pub judge_id: Uuid,
    pub computation: DressageComputation,
    pub comment: Option<String>,
}

/// Every score a single user has given on one registration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRegistrationScores {
    pub jumping: Vec<JumpingScore>,
    pub dressage: Vec<DressageScore>,
    pub endurance: Vec<EnduranceScore>,
}

#[async_trait]
pub trait ScoringStore: Send + Sync {
    /// Registration with its class type, or `NotFound`
    async fn registration_class(&self, registration_id: Uuid) -> Result<RegistrationClass>;

    /// Stores a dressage mark under the next `move#<n>` of its judge on the
    /// registration. Numbering and insert must be atomic per registration.
    async fn append_dressage_score(&self, new: NewDressageScore) -> Result<DressageScore>;

    async fn find_dressage_score(&self, score_id: Uuid) -> Result<DressageScore>;

    async fn update_dressage_score(
        &self,
        score_id: Uuid,
        computation: &DressageComputation,
        comment: Option<String>,
    ) -> Result<DressageScore>;

    async fn dressage_scores_by_judge(&self, judge_id: Uuid) -> Result<Vec<DressageScore>>;

    async fn dressage_scores_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<DressageScore>>;

    async fn insert_jumping_score(
        &self,
        registration_id: Uuid,
        judge_id: Uuid,
        computation: &JumpingComputation,
    ) -> Result<JumpingScore>;

    async fn find_jumping_score(&self, score_id: Uuid) -> Result<JumpingScore>;

    async fn update_jumping_score(
        &self,
        score_id: Uuid,
        computation: &JumpingComputation,
    ) -> Result<JumpingScore>;

    /// Jumping scores joined with rider and horse, optionally limited to a class
    async fn jumping_standings(&self, class_id: Option<Uuid>) -> Result<Vec<JumpingStanding>>;

    async fn jumping_scores_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<JumpingScore>>;

    /// New endurance row with every clock set to `at`
    async fn insert_endurance_score(
        &self,
        registration_id: Uuid,
        judge_id: Uuid,
        at: NaiveDateTime,
    ) -> Result<EnduranceScore>;

    async fn find_endurance_score(&self, score_id: Uuid) -> Result<EnduranceScore>;

    /// Persists the clocks and elapsed time of `score`
    async fn update_endurance_score(&self, score: &EnduranceScore) -> Result<EnduranceScore>;

    async fn endurance_scores_for_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<EnduranceScore>>;

    /// Appends a consistency record; earlier records are never touched
    async fn insert_difference_record(
        &self,
        registration_id: Uuid,
        user_id: Uuid,
        total_average_difference: f64,
    ) -> Result<ScoreDifferenceRecord>;

    /// Consistency history, newest first
    async fn difference_records(&self, registration_id: Uuid)
    -> Result<Vec<ScoreDifferenceRecord>>;

    async fn user_scores_for_registration(
        &self,
        registration_id: Uuid,
        user_id: Uuid,
    ) -> Result<UserRegistrationScores>;

    async fn find_user_summary(&self, user_id: Uuid) -> Result<UserSummary>;

    /// Summaries for the given ids; unknown ids are left out
    async fn user_summaries(&self, user_ids: &[Uuid]) -> Result<Vec<UserSummary>>;
}
