use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JumpingScore {
    pub score_id: Uuid,
    pub registration_id: Uuid,
    pub judge_id: Uuid,
    pub faults: i32,
    pub time: f64,
    pub total_score: f64,
    pub value: Option<String>,
    pub created_at: NaiveDateTime,
}
