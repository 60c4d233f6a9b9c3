use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{create_horse, delete_horse, get_horse, list_horses, update_horse};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/", get(list_horses).post(create_horse))
        .route("/:id", get(get_horse).put(update_horse).delete(delete_horse))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
