use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ClassType;

/// Header of a test sheet. Its discipline decides which kind of line it
/// accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub article_type: ClassType,
    pub created_at: NaiveDateTime,
}

/// One movement of a dressage sheet with its coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DressageArticle {
    pub dressage_article_id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "move")]
    #[sqlx(rename = "move")]
    pub move_label: String,
    pub multiplier: f64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JumpingArticle {
    pub jumping_article_id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub input: String,
    pub sort_priority: i32,
    pub created_at: NaiveDateTime,
}

/// A vet gate on an endurance sheet, labelled `Gate#<n>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EnduranceArticle {
    pub endurance_article_id: Uuid,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub gate: String,
    pub created_at: NaiveDateTime,
}
