use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One judge's mark for one move of a dressage test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DressageScore {
    pub score_id: Uuid,
    pub registration_id: Uuid,
    pub judge_id: Uuid,
    /// `move#<n>`, numbered per judge per registration
    #[serde(rename = "move")]
    #[sqlx(rename = "move")]
    pub move_label: String,
    pub multiplier: f64,
    pub scores: f64,
    pub total_score: f64,
    pub value: String,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}
