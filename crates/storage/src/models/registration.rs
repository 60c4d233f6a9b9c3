use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ClassType;

/// A rider and horse entered into one class of one event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub registration_id: Uuid,
    pub user_id: Uuid,
    pub horse_id: Uuid,
    pub event_id: Uuid,
    pub class_id: Uuid,
    pub stabling: bool,
    pub payment_status: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Registration joined with the type of its class, which is all the
/// scoring rules need to accept or reject a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct RegistrationClass {
    pub registration_id: Uuid,
    pub class_type: ClassType,
}
