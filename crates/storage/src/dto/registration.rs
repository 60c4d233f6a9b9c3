use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user::UserSummary;
use crate::models::{DressageScore, EnduranceScore, JumpingScore, Registration};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRegistrationRequest {
    pub horse_id: Uuid,
    pub class_id: Uuid,
    pub event_id: Uuid,

    #[serde(default)]
    pub stabling: bool,

    #[validate(length(max = 64))]
    pub payment_status: Option<String>,

    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRegistrationRequest {
    pub horse_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub stabling: Option<bool>,

    #[validate(length(max = 64))]
    pub payment_status: Option<String>,

    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

/// Registration with the rider and every score recorded against it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationDetailResponse {
    pub registration: Registration,
    pub user: UserSummary,
    pub jumping_scores: Vec<JumpingScore>,
    pub dressage_scores: Vec<DressageScore>,
    pub endurance_scores: Vec<EnduranceScore>,
}

/// One of the caller's registrations with event and class context
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserRegistrationSummary {
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub event_title: String,
    pub event_location: Option<String>,
    pub event_start_date: Option<NaiveDateTime>,
    pub event_end_date: Option<NaiveDateTime>,
    pub class_id: Uuid,
    pub class_name: String,
    pub class_start_time: Option<NaiveDateTime>,
}
