use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{delete_user, get_user, list_judges, list_riders, list_users, update_user};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route("/", get(list_users))
        .route("/judges", get(list_judges))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/riders", get(list_riders))
        .merge(protected)
}
