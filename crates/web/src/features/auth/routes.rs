use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{login, me, sign_up};
use super::services::SessionTtl;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database, ttl: SessionTtl) -> Router<Database> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .layer(Extension(ttl))
        .merge(protected)
}
