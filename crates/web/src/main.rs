use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use features::auth::services::SessionTtl;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::sign_up,
        features::auth::handlers::login,
        features::auth::handlers::me,
        features::users::handlers::list_users,
        features::users::handlers::list_judges,
        features::users::handlers::list_riders,
        features::users::handlers::get_user,
        features::users::handlers::update_user,
        features::users::handlers::delete_user,
        features::horses::handlers::list_horses,
        features::horses::handlers::get_horse,
        features::horses::handlers::create_horse,
        features::horses::handlers::update_horse,
        features::horses::handlers::delete_horse,
        features::stables::handlers::list_stables,
        features::stables::handlers::get_stable,
        features::stables::handlers::create_stable,
        features::stables::handlers::update_stable,
        features::stables::handlers::delete_stable,
        features::events::handlers::list_events,
        features::events::handlers::list_events_by_status,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::events::handlers::assign_judge,
        features::events::handlers::list_participants,
        features::classes::handlers::list_classes,
        features::classes::handlers::get_class,
        features::classes::handlers::create_class,
        features::classes::handlers::update_class,
        features::classes::handlers::delete_class,
        features::classes::handlers::get_class_detail,
        features::classes::handlers::get_participant_detail,
        features::registrations::handlers::list_registrations,
        features::registrations::handlers::list_own_registrations,
        features::registrations::handlers::get_registration,
        features::registrations::handlers::create_registration,
        features::registrations::handlers::update_registration,
        features::registrations::handlers::cancel_registration,
        features::scores::handlers::list_dressage_scores,
        features::scores::handlers::list_own_dressage_scores,
        features::scores::handlers::create_dressage_score,
        features::scores::handlers::update_dressage_score,
        features::scores::handlers::delete_dressage_score,
        features::scores::handlers::list_jumping_scores,
        features::scores::handlers::get_jumping_winner,
        features::scores::handlers::create_jumping_score,
        features::scores::handlers::update_jumping_score,
        features::scores::handlers::delete_jumping_score,
        features::scores::handlers::list_endurance_scores,
        features::scores::handlers::create_endurance_score,
        features::scores::handlers::update_endurance_score,
        features::scores::handlers::delete_endurance_score,
        features::scores::handlers::get_registration_scores,
        features::scores::handlers::record_consistency,
        features::scores::handlers::list_consistency_history,
        features::scores::handlers::get_user_scores,
        features::scores::handlers::get_judge_scores,
        features::articles::handlers::list_articles,
        features::articles::handlers::get_article,
        features::articles::handlers::create_article,
        features::articles::handlers::update_article,
        features::articles::handlers::delete_article,
        features::articles::handlers::create_dressage_article,
        features::articles::handlers::create_jumping_article,
        features::articles::handlers::create_endurance_article,
    ),
    components(
        schemas(
            storage::dto::auth::SignUpRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::auth::LoginResponse,
            storage::dto::user::UserResponse,
            storage::dto::user::UserSummary,
            storage::dto::user::ScoreCounts,
            storage::dto::user::UserDetailResponse,
            storage::dto::user::ProfileResponse,
            storage::dto::user::UpdateUserRequest,
            storage::dto::horse::CreateHorseRequest,
            storage::dto::horse::UpdateHorseRequest,
            storage::dto::stable::CreateStableRequest,
            storage::dto::stable::UpdateStableRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::AssignJudgeRequest,
            storage::dto::event::EventWithClasses,
            storage::dto::competition_class::CreateClassRequest,
            storage::dto::competition_class::UpdateClassRequest,
            storage::dto::competition_class::ClassParticipant,
            storage::dto::competition_class::ClassDetailResponse,
            storage::dto::registration::CreateRegistrationRequest,
            storage::dto::registration::UpdateRegistrationRequest,
            storage::dto::registration::RegistrationDetailResponse,
            storage::dto::registration::UserRegistrationSummary,
            storage::dto::score::MultiplierInput,
            storage::dto::score::CreateDressageScoreRequest,
            storage::dto::score::UpdateDressageScoreRequest,
            storage::dto::score::DressageScoreResponse,
            storage::dto::score::CreateJumpingScoreRequest,
            storage::dto::score::UpdateJumpingScoreRequest,
            storage::dto::score::JumpingStanding,
            storage::dto::score::WinnerResponse,
            storage::dto::score::CreateEnduranceScoreRequest,
            storage::dto::score::UpdateEnduranceScoreRequest,
            storage::dto::score::ConsistencyResponse,
            storage::dto::score::UserScoresResponse,
            storage::dto::score::RegistrationJudgeScoresResponse,
            storage::dto::score::RegistrationScores,
            storage::dto::article::CreateArticleRequest,
            storage::dto::article::UpdateArticleRequest,
            storage::dto::article::CreateDressageArticleRequest,
            storage::dto::article::CreateJumpingArticleRequest,
            storage::dto::article::CreateEnduranceArticleRequest,
            storage::dto::article::ArticleDetail,
            storage::services::judge_consistency::MoveDifference,
            storage::services::score_assembly::Discipline,
            storage::services::score_assembly::UnifiedScore,
            storage::services::score_assembly::JudgeScoreGroup,
            storage::models::Role,
            storage::models::EventStatus,
            storage::models::ClassType,
            storage::models::Horse,
            storage::models::Stable,
            storage::models::Event,
            storage::models::CompetitionClass,
            storage::models::Registration,
            storage::models::DressageScore,
            storage::models::JumpingScore,
            storage::models::EnduranceScore,
            storage::models::ScoreDifferenceRecord,
            storage::models::Article,
            storage::models::DressageArticle,
            storage::models::JumpingArticle,
            storage::models::EnduranceArticle,
        )
    ),
    tags(
        (name = "auth", description = "Sign-up, login and the caller's profile"),
        (name = "users", description = "User accounts"),
        (name = "horses", description = "Horses owned by riders"),
        (name = "stables", description = "Stables"),
        (name = "events", description = "Competition events"),
        (name = "classes", description = "Competition classes within events"),
        (name = "registrations", description = "Rider and horse entries into classes"),
        (name = "scores", description = "Dressage, show jumping and endurance scoring"),
        (name = "articles", description = "Supervisor test sheets: dressage movements, jumping obstacles and endurance gates"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .build(),
                ),
            )
        }
    }
}

fn api_routes(db: Database, session_ttl: SessionTtl) -> Router<Database> {
    Router::new()
        .nest("/auth", features::auth::routes::routes(db.clone(), session_ttl))
        .nest("/users", features::users::routes::routes(db.clone()))
        .nest("/horses", features::horses::routes::routes(db.clone()))
        .nest("/stables", features::stables::routes::routes(db.clone()))
        .nest("/events", features::events::routes::routes(db.clone()))
        .nest("/classes", features::classes::routes::routes(db.clone()))
        .nest(
            "/registrations",
            features::registrations::routes::routes(db.clone()),
        )
        .nest("/scores", features::scores::routes::routes(db.clone()))
        .nest("/articles", features::articles::routes::routes(db))
}

fn app(db: Database, session_ttl: SessionTtl) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes(db.clone(), session_ttl))
        .layer(cors)
        .with_state(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting equestrian competition API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = Database::with_max_connections(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let session_ttl = SessionTtl::from_hours(config.session_ttl_hours);
    let router = app(db, session_ttl);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        app(Database::from_pool(pool), SessionTtl::from_hours(1))
    }

    async fn status_of(method: Method, uri: &str) -> StatusCode {
        test_app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn test_openapi_lists_scoring_paths() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/scores/dressage",
            "/api/scores/jumping/winner",
            "/api/registrations/{id}/consistency",
            "/api/events/{event_id}/classes/{class_id}",
            "/api/registrations/{id}",
            "/api/articles",
            "/api/articles/{id}/dressage",
            "/api/articles/{id}/endurance",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let id = uuid::Uuid::new_v4();

        assert_eq!(
            status_of(Method::GET, "/api/auth/me").await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(Method::POST, "/api/scores/dressage").await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(Method::POST, &format!("/api/registrations/{id}/consistency")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(Method::GET, &format!("/api/events/{id}/classes/{id}")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_article_routes_require_token() {
        let id = uuid::Uuid::new_v4();

        for (method, uri) in [
            (Method::GET, "/api/articles".to_string()),
            (Method::POST, "/api/articles".to_string()),
            (Method::DELETE, format!("/api/articles/{id}")),
            (Method::POST, format!("/api/articles/{id}/dressage")),
            (Method::POST, format!("/api/articles/{id}/jumping")),
            (Method::POST, format!("/api/articles/{id}/endurance")),
        ] {
            assert_eq!(status_of(method, &uri).await, StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[test]
    fn test_openapi_omits_internal_outcome_enums() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;

        assert!(!schemas.contains_key("DressageOutcome"));
        assert!(!schemas.contains_key("JumpingOutcome"));
        assert!(schemas.contains_key("ArticleDetail"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        assert_eq!(
            status_of(Method::GET, "/api/paddocks").await,
            StatusCode::NOT_FOUND
        );
    }
}
