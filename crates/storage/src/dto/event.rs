use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CompetitionClass, Event, EventStatus};

/// Request payload for creating a new event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[serde(default = "default_status")]
    pub status: EventStatus,

    pub start_date: Option<NaiveDateTime>,

    pub end_date: Option<NaiveDateTime>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub status: Option<EventStatus>,

    pub start_date: Option<NaiveDateTime>,

    pub end_date: Option<NaiveDateTime>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignJudgeRequest {
    pub user_id: Uuid,
}

/// Event together with its competition classes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventWithClasses {
    #[serde(flatten)]
    pub event: Event,
    pub classes: Vec<CompetitionClass>,
}

fn default_status() -> EventStatus {
    EventStatus::Upcoming
}

fn check_date_order(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<(), &'static str> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err("End date must be on or after start date");
    }

    Ok(())
}

impl CreateEventRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_date_order(self.start_date, self.end_date)
    }
}

impl UpdateEventRequest {
    /// Checks the date order once merged with the stored event
    pub fn validate_dates(&self, existing: &Event) -> Result<(), &'static str> {
        check_date_order(
            self.start_date.or(existing.start_date),
            self.end_date.or(existing.end_date),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn request(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> CreateEventRequest {
        CreateEventRequest {
            title: "Spring Show".to_string(),
            description: None,
            location: None,
            status: EventStatus::Upcoming,
            start_date: start,
            end_date: end,
            image_url: None,
        }
    }

    fn day(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap().and_hms_opt(8, 0, 0)
    }

    #[test]
    fn test_validate_dates() {
        assert!(request(day(1), day(3)).validate_dates().is_ok());
        assert!(request(day(3), day(3)).validate_dates().is_ok());
        assert!(request(None, day(3)).validate_dates().is_ok());
        assert!(request(day(3), day(1)).validate_dates().is_err());
    }

    #[test]
    fn test_status_defaults_to_upcoming() {
        let req: CreateEventRequest =
            serde_json::from_value(serde_json::json!({ "title": "Derby" })).unwrap();
        assert_eq!(req.status, EventStatus::Upcoming);

        let req: CreateEventRequest =
            serde_json::from_value(serde_json::json!({ "title": "Derby", "status": "LIVE" }))
                .unwrap();
        assert_eq!(req.status, EventStatus::Live);
    }
}
