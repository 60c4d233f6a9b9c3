use axum::{
    Router, middleware,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{
    create_dressage_score, create_endurance_score, create_jumping_score, delete_dressage_score,
    delete_endurance_score, delete_jumping_score, get_judge_scores, get_jumping_winner,
    get_registration_scores, get_user_scores, list_consistency_history, list_dressage_scores,
    list_endurance_scores, list_jumping_scores, list_own_dressage_scores, record_consistency,
    update_dressage_score, update_endurance_score, update_jumping_score,
};
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<Database> {
    let protected = Router::new()
        .route(
            "/dressage",
            get(list_dressage_scores).post(create_dressage_score),
        )
        .route("/dressage/mine", get(list_own_dressage_scores))
        .route(
            "/dressage/:id",
            put(update_dressage_score).delete(delete_dressage_score),
        )
        .route("/jumping", get(list_jumping_scores).post(create_jumping_score))
        .route(
            "/jumping/:id",
            put(update_jumping_score).delete(delete_jumping_score),
        )
        .route(
            "/endurance",
            get(list_endurance_scores).post(create_endurance_score),
        )
        .route(
            "/endurance/:id",
            put(update_endurance_score).delete(delete_endurance_score),
        )
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/jumping/winner", get(get_jumping_winner))
        .merge(protected)
}

/// Score views keyed by registration, merged into the registrations router
pub fn registration_routes(db: Database) -> Router<Database> {
    Router::new()
        .route("/:id/scores/:class_type", get(get_registration_scores))
        .route(
            "/:id/consistency",
            get(list_consistency_history).post(record_consistency),
        )
        .route("/:id/users/:user_id/scores", get(get_user_scores))
        .route("/:id/judges/scores", get(get_judge_scores))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
