use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EnduranceScore {
    pub score_id: Uuid,
    pub registration_id: Uuid,
    pub judge_id: Uuid,
    pub arrival: NaiveDateTime,
    pub departure: NaiveDateTime,
    pub recovery: NaiveDateTime,
    /// Seconds, provided by the timing system; never derived here
    pub elapsed_time: Option<f64>,
    pub created_at: NaiveDateTime,
}
