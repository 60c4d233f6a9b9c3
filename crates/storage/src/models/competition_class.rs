use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Discipline of a competition class. Gates which kind of score a
/// registration in that class may receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "class_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassType {
    Dressage,
    ShowJumping,
    Endurance,
}

impl ClassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dressage => "DRESSAGE",
            Self::ShowJumping => "SHOW_JUMPING",
            Self::Endurance => "ENDURANCE",
        }
    }
}

impl std::fmt::Display for ClassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionClass {
    pub class_id: Uuid,
    pub event_id: Uuid,
    pub created_by: Option<Uuid>,
    pub class_name: String,
    pub class_status: Option<String>,
    pub class_type: ClassType,
    pub class_start_time: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
