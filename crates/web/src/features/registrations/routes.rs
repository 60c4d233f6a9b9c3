use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    cancel_registration, create_registration, get_registration, list_own_registrations,
    list_registrations, update_registration,
};
use crate::features::scores;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_registration))
        .route("/mine", get(list_own_registrations))
        .route("/:id", put(update_registration).delete(cancel_registration))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_auth));

    Router::new()
        .route("/", get(list_registrations))
        .route("/:id", get(get_registration))
        .merge(protected)
        .merge(scores::routes::registration_routes(db))
}
