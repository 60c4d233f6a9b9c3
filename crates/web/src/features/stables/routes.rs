use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{create_stable, delete_stable, get_stable, list_stables, update_stable};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/", get(list_stables).post(create_stable))
        .route("/:id", get(get_stable).put(update_stable).delete(delete_stable))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
