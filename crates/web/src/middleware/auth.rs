//! Bearer-token authentication.
//!
//! Login hands out an opaque random token; only its SHA-256 digest is kept in
//! `user_sessions`. [`require_auth`] resolves the token back to a user and
//! stores an [`AuthUser`] in the request extensions.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use storage::{
    Database,
    error::StorageError,
    models::{Role, User},
    repository::UserRepository,
};
use uuid::Uuid;

use crate::error::WebError;

const TOKEN_BYTES: usize = 32;

/// Authenticated caller, available to handlers behind [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

impl AuthUser {
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), WebError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }

        tracing::warn!(
            user_id = %self.user_id,
            role = self.role.as_str(),
            "Rejected request for insufficient role"
        );
        Err(WebError::Forbidden)
    }

    pub fn is_supervisor(&self) -> bool {
        self.role == Role::Supervisor
    }

    /// Owners act on their own records; supervisors on anyone's
    pub fn require_owner_or_supervisor(&self, owner_id: Uuid) -> Result<(), WebError> {
        if self.user_id == owner_id || self.is_supervisor() {
            Ok(())
        } else {
            Err(WebError::Forbidden)
        }
    }
}

pub async fn require_auth(
    State(db): State<Database>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(token_hash) = bearer_token(req.headers()).map(hash_token) else {
        tracing::warn!("Missing or malformed bearer token");
        return Err(WebError::Unauthorized);
    };

    let user = match UserRepository::new(db.pool())
        .find_by_session(&token_hash)
        .await
    {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            tracing::warn!("Invalid or expired session token");
            return Err(WebError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    };

    req.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(req).await)
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Fresh session token: 32 random bytes, hex encoded
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub fn hash_password(password: &str) -> Result<String, WebError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| WebError::InternalServerError(format!("Password hashing failed: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{HeaderValue, Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_generated_tokens_are_unique_hex() {
        let (a, b) = (generate_token(), generate_token());

        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_token_is_stable_sha256() {
        let digest = hash_token("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-hash"));
    }

    #[test]
    fn test_require_role() {
        let judge = user(Role::Judge);

        assert!(judge.require_role(&[Role::Judge, Role::Supervisor]).is_ok());
        assert!(matches!(
            judge.require_role(&[Role::Supervisor]),
            Err(WebError::Forbidden)
        ));
    }

    #[test]
    fn test_owner_or_supervisor() {
        let rider = user(Role::Rider);
        let supervisor = user(Role::Supervisor);
        let someone_else = Uuid::new_v4();

        assert!(rider.require_owner_or_supervisor(rider.user_id).is_ok());
        assert!(rider.require_owner_or_supervisor(someone_else).is_err());
        assert!(supervisor.require_owner_or_supervisor(someone_else).is_ok());
    }

    #[tokio::test]
    async fn test_requests_without_token_are_rejected() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let db = Database::from_pool(pool);

        let app = Router::new()
            .route("/protected", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(db.clone(), require_auth))
            .with_state(db);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
