use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        event::{CreateEventRequest, EventWithClasses, UpdateEventRequest},
        user::ScoreCounts,
    },
    error::Result,
    models::{CompetitionClass, Event, EventStatus, Role, User},
    repository::{CompetitionClassRepository, EventRepository, UserRepository},
};
use uuid::Uuid;

use crate::error::WebError;

/// Pairs every event with its classes, keeping the event order
pub fn attach_classes(events: Vec<Event>, classes: Vec<CompetitionClass>) -> Vec<EventWithClasses> {
    let mut by_event: HashMap<Uuid, Vec<CompetitionClass>> = HashMap::new();
    for class in classes {
        by_event.entry(class.event_id).or_default().push(class);
    }

    events
        .into_iter()
        .map(|event| EventWithClasses {
            classes: by_event.remove(&event.event_id).unwrap_or_default(),
            event,
        })
        .collect()
}

/// A judge may be assigned once, and only to an account holding the judge role
pub fn check_judge_assignment(event: &Event, candidate: &User) -> std::result::Result<(), WebError> {
    if candidate.role != Role::Judge {
        return Err(WebError::BadRequest("User is not a judge".to_string()));
    }

    if event.judge_id == Some(candidate.user_id) {
        return Err(WebError::BadRequest(
            "Judge is already assigned to this event".to_string(),
        ));
    }

    Ok(())
}

pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>> {
    EventRepository::new(pool).list().await
}

/// Events in one lifecycle state, each with its classes
pub async fn list_events_by_status(
    pool: &PgPool,
    status: EventStatus,
) -> Result<Vec<EventWithClasses>> {
    let events = EventRepository::new(pool).list_by_status(status).await?;
    let ids: Vec<Uuid> = events.iter().map(|e| e.event_id).collect();
    let classes = CompetitionClassRepository::new(pool)
        .list_by_events(&ids)
        .await?;

    Ok(attach_classes(events, classes))
}

pub async fn get_event(pool: &PgPool, id: Uuid) -> Result<Event> {
    EventRepository::new(pool).find_by_id(id).await
}

pub async fn get_event_with_classes(pool: &PgPool, id: Uuid) -> Result<EventWithClasses> {
    let event = EventRepository::new(pool).find_by_id(id).await?;
    let classes = CompetitionClassRepository::new(pool)
        .list_by_events(&[id])
        .await?;

    Ok(EventWithClasses { event, classes })
}

pub async fn create_event(
    pool: &PgPool,
    created_by: Uuid,
    request: &CreateEventRequest,
) -> Result<Event> {
    EventRepository::new(pool).create(created_by, request).await
}

pub async fn update_event(pool: &PgPool, id: Uuid, request: &UpdateEventRequest) -> Result<Event> {
    EventRepository::new(pool).update(id, request).await
}

pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<()> {
    EventRepository::new(pool).delete(id).await
}

/// Put a judge in charge of the event
pub async fn assign_judge(
    pool: &PgPool,
    event_id: Uuid,
    judge_id: Uuid,
) -> std::result::Result<Event, WebError> {
    let repo = EventRepository::new(pool);

    let event = repo.find_by_id(event_id).await?;
    let candidate = UserRepository::new(pool).find_by_id(judge_id).await?;
    check_judge_assignment(&event, &candidate)?;

    let event = repo.assign_judge(event_id, judge_id).await?;
    tracing::info!(%event_id, %judge_id, "Assigned judge to event");

    Ok(event)
}

/// Registered riders with their score counts in this event
pub async fn list_participants(pool: &PgPool, event_id: Uuid) -> Result<Vec<ScoreCounts>> {
    let repo = EventRepository::new(pool);
    repo.find_by_id(event_id).await?;
    repo.participants(event_id).await
}
