use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ClassType, EventStatus};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassRequest {
    pub event_id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Class name must be between 1 and 255 characters"
    ))]
    pub class_name: String,

    #[validate(length(max = 64))]
    pub class_status: Option<String>,

    pub class_type: ClassType,

    pub class_start_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 255))]
    pub class_name: Option<String>,

    #[validate(length(max = 64))]
    pub class_status: Option<String>,

    pub class_type: Option<ClassType>,

    pub class_start_time: Option<NaiveDateTime>,
}

/// Rider entered into a class, as seen by the judges
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassParticipant {
    pub registration_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub horse_id: Uuid,
    pub horse_name: String,
    pub estimated_start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassDetailResponse {
    pub class_id: Uuid,
    pub class_name: String,
    pub class_status: String,
    pub class_type: ClassType,
    pub class_start_time: Option<NaiveDateTime>,
    pub class_participants_count: usize,
    pub event_status: EventStatus,
    pub participants: Vec<ClassParticipant>,
}
