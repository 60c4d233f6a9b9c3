use sqlx::PgPool;
use storage::{
    dto::registration::{
        CreateRegistrationRequest, RegistrationDetailResponse, UpdateRegistrationRequest,
        UserRegistrationSummary,
    },
    error::Result,
    models::{CompetitionClass, Registration},
    repository::{
        CompetitionClassRepository, EventRepository, HorseRepository, RegistrationRepository,
        ScoreRepository,
    },
    services::scoring_workflow,
    store::ScoringStore,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

/// A class can only be entered through the event that runs it
pub fn check_class_in_event(class: &CompetitionClass, event_id: Uuid) -> std::result::Result<(), WebError> {
    if class.event_id != event_id {
        return Err(WebError::BadRequest(
            "Class does not belong to this event".to_string(),
        ));
    }

    Ok(())
}

/// Registration with its rider and every score recorded against it
pub async fn registration_detail(
    pool: &PgPool,
    registration: Registration,
) -> Result<RegistrationDetailResponse> {
    let scores = ScoreRepository::new(pool);
    let id = registration.registration_id;

    let user = scores.find_user_summary(registration.user_id).await?;

    let jumping_scores = scores.jumping_scores_for_registration(id).await?;

    let mut dressage_scores = scores.dressage_scores_for_registration(id).await?;
    scoring_workflow::order_dressage(&mut dressage_scores);

    let mut endurance_scores = scores.endurance_scores_for_registration(id).await?;
    scoring_workflow::order_endurance(&mut endurance_scores);

    Ok(RegistrationDetailResponse {
        registration,
        user,
        jumping_scores,
        dressage_scores,
        endurance_scores,
    })
}

pub async fn list_registrations(pool: &PgPool) -> Result<Vec<Registration>> {
    RegistrationRepository::new(pool).list().await
}

pub async fn get_registration_detail(
    pool: &PgPool,
    id: Uuid,
) -> Result<RegistrationDetailResponse> {
    let registration = RegistrationRepository::new(pool).find_by_id(id).await?;
    registration_detail(pool, registration).await
}

/// The caller's registrations with event and class context
pub async fn list_own_registrations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<UserRegistrationSummary>> {
    RegistrationRepository::new(pool)
        .summaries_for_user(user_id)
        .await
}

/// Checks that the horse, class and event exist and fit together
async fn check_entry(
    pool: &PgPool,
    user: &AuthUser,
    horse_id: Uuid,
    class_id: Uuid,
    event_id: Uuid,
) -> std::result::Result<(), WebError> {
    let horse = HorseRepository::new(pool).find_by_id(horse_id).await?;
    user.require_owner_or_supervisor(horse.owner_id)?;

    let class = CompetitionClassRepository::new(pool)
        .find_by_id(class_id)
        .await?;
    EventRepository::new(pool).find_by_id(event_id).await?;

    check_class_in_event(&class, event_id)
}

/// Enter the caller's horse into a class of an event
pub async fn create_registration(
    pool: &PgPool,
    user: &AuthUser,
    request: &CreateRegistrationRequest,
) -> std::result::Result<Registration, WebError> {
    check_entry(
        pool,
        user,
        request.horse_id,
        request.class_id,
        request.event_id,
    )
    .await?;

    let registration = RegistrationRepository::new(pool)
        .create(user.user_id, request)
        .await?;

    tracing::info!(
        registration_id = %registration.registration_id,
        user_id = %user.user_id,
        class_id = %registration.class_id,
        "Registered for class"
    );

    Ok(registration)
}

pub async fn update_registration(
    pool: &PgPool,
    user: &AuthUser,
    id: Uuid,
    request: &UpdateRegistrationRequest,
) -> std::result::Result<Registration, WebError> {
    let repo = RegistrationRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    user.require_owner_or_supervisor(existing.user_id)?;

    if request.horse_id.is_some() || request.class_id.is_some() || request.event_id.is_some() {
        check_entry(
            pool,
            user,
            request.horse_id.unwrap_or(existing.horse_id),
            request.class_id.unwrap_or(existing.class_id),
            request.event_id.unwrap_or(existing.event_id),
        )
        .await?;
    }

    Ok(repo.update(id, request).await?)
}

/// Withdraw from a class
pub async fn cancel_registration(
    pool: &PgPool,
    user: &AuthUser,
    id: Uuid,
) -> std::result::Result<(), WebError> {
    let repo = RegistrationRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    user.require_owner_or_supervisor(existing.user_id)?;

    repo.delete(id).await?;
    tracing::info!(registration_id = %id, "Registration cancelled");

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use storage::models::ClassType;

    use super::*;

    #[test]
    fn test_class_must_belong_to_event() {
        let event_id = Uuid::new_v4();
        let class = CompetitionClass {
            class_id: Uuid::new_v4(),
            event_id,
            created_by: None,
            class_name: "Grand Prix".to_string(),
            class_status: None,
            class_type: ClassType::Dressage,
            class_start_time: None,
            created_at: NaiveDate::from_ymd_opt(2025, 5, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };

        assert!(check_class_in_event(&class, event_id).is_ok());
        assert!(matches!(
            check_class_in_event(&class, Uuid::new_v4()),
            Err(WebError::BadRequest(_))
        ));
    }
}
