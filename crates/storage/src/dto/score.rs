use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{DressageScore, EnduranceScore, JumpingScore, Role, ScoreDifferenceRecord};
use crate::services::judge_consistency::MoveDifference;
use crate::services::score_assembly::{JudgeScoreGroup, UnifiedScore};
use crate::services::scoring;
use crate::services::winner::JumpingRound;

/// Dressage multiplier as submitted: a number, or free text such as `"x2"`
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MultiplierInput {
    Number(f64),
    Text(String),
}

impl MultiplierInput {
    pub fn resolve(input: Option<&Self>) -> f64 {
        match input {
            Some(Self::Number(value)) if value.is_finite() => *value,
            Some(Self::Number(_)) => scoring::DEFAULT_MULTIPLIER,
            Some(Self::Text(text)) => scoring::parse_multiplier(Some(text)),
            None => scoring::DEFAULT_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDressageScoreRequest {
    pub registration_id: Uuid,
    pub multiplier: Option<MultiplierInput>,
    pub comment: Option<String>,
    /// Raw mark; -1..-6 encode an outcome instead of a mark
    pub scores: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDressageScoreRequest {
    pub multiplier: Option<MultiplierInput>,
    pub comment: Option<String>,
    pub scores: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DressageScoreResponse {
    pub dressage_score: DressageScore,
    /// Every dressage score held by the judge who gave `dressage_score`
    pub all_scores: Vec<DressageScore>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateJumpingScoreRequest {
    pub registration_id: Uuid,
    /// Fault count; 994..=999 encode an outcome
    #[validate(range(min = 0, message = "Faults cannot be negative"))]
    pub faults: i32,
    #[validate(range(min = 0.0, message = "Time cannot be negative"))]
    pub time: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateJumpingScoreRequest {
    #[validate(range(min = 0, message = "Faults cannot be negative"))]
    pub faults: i32,
    #[validate(range(min = 0.0, message = "Time cannot be negative"))]
    pub time: f64,
}

/// Jumping score joined with the rider and horse it was given to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JumpingStanding {
    pub score_id: Uuid,
    pub registration_id: Uuid,
    pub judge_id: Uuid,
    pub faults: i32,
    pub time: f64,
    pub total_score: f64,
    pub value: Option<String>,
    pub rider_id: Uuid,
    pub rider_name: String,
    pub rider_email: String,
    pub horse_id: Uuid,
    pub horse_name: String,
}

impl JumpingRound for JumpingStanding {
    fn faults(&self) -> i32 {
        self.faults
    }

    fn time(&self) -> f64 {
        self.time
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WinnerQuery {
    /// Only consider rounds ridden in this class
    pub class_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerResponse {
    pub winner: JumpingStanding,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEnduranceScoreRequest {
    pub registration_id: Uuid,
}

/// Clock readings as `HH:MM:SS` on the current day; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEnduranceScoreRequest {
    pub arrival: Option<String>,
    pub departure: Option<String>,
    pub recovery: Option<String>,
    #[validate(range(min = 0.0))]
    pub elapsed_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConsistencyResponse {
    pub total_difference_sum: f64,
    /// Percentage with two decimals, e.g. `"150.00%"`
    pub total_average_difference: String,
    pub record: ScoreDifferenceRecord,
    pub move_differences: Vec<MoveDifference>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserScoresResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub scores: Vec<UnifiedScore>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationJudgeScoresResponse {
    pub registration_id: Uuid,
    pub scores: Vec<JudgeScoreGroup>,
}

/// Scores of one discipline for a registration, already ordered
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "class_type", content = "scores", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationScores {
    Dressage(Vec<DressageScore>),
    ShowJumping(Vec<JumpingScore>),
    Endurance(Vec<EnduranceScore>),
}
