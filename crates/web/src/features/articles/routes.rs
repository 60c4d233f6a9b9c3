use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    create_article, create_dressage_article, create_endurance_article, create_jumping_article,
    delete_article, get_article, list_articles, update_article,
};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/", get(list_articles).post(create_article))
        .route("/:id", get(get_article).put(update_article).delete(delete_article))
        .route("/:id/dressage", post(create_dressage_article))
        .route("/:id/jumping", post(create_jumping_article))
        .route("/:id/endurance", post(create_endurance_article))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
