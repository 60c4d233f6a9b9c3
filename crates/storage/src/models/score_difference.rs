use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Judge-consistency snapshot for a registration.
///
/// Rows are append-only: every consistency run inserts a new record, so the
/// table doubles as the history of how judges' disagreement evolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreDifferenceRecord {
    pub record_id: Uuid,
    pub registration_id: Uuid,
    /// Supervisor who requested the run
    pub user_id: Uuid,
    /// Percentage (average spread × 100)
    pub total_average_difference: f64,
    pub created_at: NaiveDateTime,
}
