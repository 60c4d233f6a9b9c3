use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_class, delete_class, get_class, get_class_detail, get_participant_detail,
    list_classes, update_class,
};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_class))
        .route("/:id", put(update_class).delete(delete_class))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/", get(list_classes))
        .route("/:id", get(get_class))
        .merge(protected)
}

/// Class views scoped to an event, merged into the events router
pub fn event_routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/:id/classes/:class_id", get(get_class_detail))
        .route(
            "/:id/classes/:class_id/users/:user_id",
            get(get_participant_detail),
        )
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
