use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Rider,
    Judge,
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rider => "RIDER",
            Self::Judge => "JUDGE",
            Self::Supervisor => "SUPERVISOR",
        }
    }
}

/// Account row. Never serialized directly; see `dto::user::UserResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

/// Login session; only the SHA-256 digest of the bearer token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}
