use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Horse {
    pub horse_id: Uuid,
    pub owner_id: Uuid,
    pub stable_id: Option<Uuid>,
    pub name: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}
