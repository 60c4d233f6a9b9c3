use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHorseRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub stable_id: Option<Uuid>,

    #[validate(length(max = 255))]
    pub breed: Option<String>,

    #[validate(length(max = 64))]
    pub color: Option<String>,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateHorseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub stable_id: Option<Uuid>,

    #[validate(length(max = 255))]
    pub breed: Option<String>,

    #[validate(length(max = 64))]
    pub color: Option<String>,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}
