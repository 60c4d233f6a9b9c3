use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Horse, Registration, Role, Stable, User};

/// Public view of a user, without credentials
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            nationality: user.nationality,
            phone: user.phone,
            dob: user.dob,
            gender: user.gender,
            image_url: user.image_url,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

/// Identity attached to scores and score groupings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSummary {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// How many scores of each discipline a user holds
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreCounts {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub jumping_scores_count: i64,
    pub dressage_scores_count: i64,
    pub endurance_scores_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDetailResponse {
    pub user: UserResponse,
    pub score_counts: ScoreCounts,
}

/// The caller's own profile
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub horses: Vec<Horse>,
    pub stables: Vec<Stable>,
    pub registrations: Vec<Registration>,
}

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub nationality: Option<String>,

    #[validate(length(max = 64))]
    pub phone: Option<String>,

    pub dob: Option<NaiveDate>,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}
