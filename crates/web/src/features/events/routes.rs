use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    assign_judge, create_event, delete_event, get_event, list_events, list_events_by_status,
    list_participants, update_event,
};
use crate::features::classes;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/judge", post(assign_judge))
        .route("/:id/participants", get(list_participants))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_auth));

    Router::new()
        .route("/status/:status", get(list_events_by_status))
        .merge(protected)
        .merge(classes::routes::event_routes(db))
}
