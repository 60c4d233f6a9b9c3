use sqlx::PgPool;
use storage::{
    dto::{
        competition_class::{ClassDetailResponse, CreateClassRequest, UpdateClassRequest},
        registration::RegistrationDetailResponse,
    },
    error::{Result, StorageError},
    models::{CompetitionClass, Role},
    repository::{CompetitionClassRepository, EventRepository, RegistrationRepository},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::features::registrations::services::registration_detail;
use crate::middleware::auth::AuthUser;

/// Creators edit their own classes; classes without a creator are supervisor-only
pub fn check_class_editor(
    user: &AuthUser,
    class: &CompetitionClass,
) -> std::result::Result<(), WebError> {
    match class.created_by {
        Some(owner_id) => user.require_owner_or_supervisor(owner_id),
        None => user.require_role(&[Role::Supervisor]),
    }
}

pub async fn list_classes(pool: &PgPool) -> Result<Vec<CompetitionClass>> {
    CompetitionClassRepository::new(pool).list().await
}

pub async fn get_class(pool: &PgPool, id: Uuid) -> Result<CompetitionClass> {
    CompetitionClassRepository::new(pool).find_by_id(id).await
}

/// Add a class to an existing event
pub async fn create_class(
    pool: &PgPool,
    created_by: Uuid,
    request: &CreateClassRequest,
) -> Result<CompetitionClass> {
    EventRepository::new(pool).find_by_id(request.event_id).await?;

    CompetitionClassRepository::new(pool)
        .create(created_by, request)
        .await
}

pub async fn update_class(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateClassRequest,
) -> Result<CompetitionClass> {
    CompetitionClassRepository::new(pool).update(id, request).await
}

pub async fn delete_class(pool: &PgPool, id: Uuid) -> Result<()> {
    CompetitionClassRepository::new(pool).delete(id).await
}

/// Class of an event with the riders entered in it
pub async fn get_class_detail(
    pool: &PgPool,
    event_id: Uuid,
    class_id: Uuid,
) -> Result<ClassDetailResponse> {
    let repo = CompetitionClassRepository::new(pool);

    let class = repo.find_by_id(class_id).await?;
    if class.event_id != event_id {
        return Err(StorageError::NotFound);
    }

    let event = EventRepository::new(pool).find_by_id(event_id).await?;
    let participants = repo.participants(class_id).await?;

    Ok(ClassDetailResponse {
        class_id: class.class_id,
        class_name: class.class_name,
        class_status: class.class_status.unwrap_or_default(),
        class_type: class.class_type,
        class_start_time: class.class_start_time,
        class_participants_count: participants.len(),
        event_status: event.status,
        participants,
    })
}

/// One rider's registration in a class, with every score recorded against it
pub async fn get_participant_detail(
    pool: &PgPool,
    event_id: Uuid,
    class_id: Uuid,
    user_id: Uuid,
) -> Result<RegistrationDetailResponse> {
    let registration = RegistrationRepository::new(pool)
        .find_for_participant(event_id, class_id, user_id)
        .await?;

    registration_detail(pool, registration).await
}
