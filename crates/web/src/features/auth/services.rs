use chrono::{TimeDelta, Utc};
use sqlx::PgPool;
use storage::{
    dto::{
        auth::{LoginRequest, LoginResponse, SignUpRequest},
        user::{ProfileResponse, UserResponse},
    },
    error::StorageError,
    models::User,
    repository::{HorseRepository, RegistrationRepository, StableRepository, UserRepository},
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::{generate_token, hash_password, hash_token, verify_password};

/// How long a freshly issued session token stays valid
#[derive(Debug, Clone, Copy)]
pub struct SessionTtl(pub TimeDelta);

impl SessionTtl {
    pub fn from_hours(hours: i64) -> Self {
        Self(TimeDelta::hours(hours))
    }
}

/// Register a new rider account
pub async fn sign_up(pool: &PgPool, request: &SignUpRequest) -> Result<User, WebError> {
    let password_hash = hash_password(&request.password)?;
    let user = UserRepository::new(pool).create(request, &password_hash).await?;

    tracing::info!(user_id = %user.user_id, "Registered new rider");

    Ok(user)
}

/// Check credentials and open a session
pub async fn login(
    pool: &PgPool,
    request: &LoginRequest,
    ttl: SessionTtl,
) -> Result<LoginResponse, WebError> {
    let repo = UserRepository::new(pool);

    let user = match repo.find_by_email(&request.email).await {
        Ok(user) => user,
        Err(StorageError::NotFound) => {
            tracing::warn!("Login attempt for unknown email");
            return Err(WebError::NotFound);
        }
        Err(e) => return Err(e.into()),
    };

    if !verify_password(&request.password, &user.password_hash) {
        tracing::warn!(user_id = %user.user_id, "Login rejected: wrong password");
        return Err(WebError::Unauthorized);
    }

    let purged = repo.purge_expired_sessions(user.user_id).await?;
    if purged > 0 {
        tracing::debug!(user_id = %user.user_id, purged, "Dropped expired sessions");
    }

    let token = generate_token();
    let expires_at = Utc::now().naive_utc() + ttl.0;
    let session = repo
        .create_session(&hash_token(&token), user.user_id, expires_at)
        .await?;

    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok(LoginResponse {
        token,
        role: user.role,
        expires_at: session.expires_at,
    })
}

/// The caller's account with everything they own
pub async fn profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileResponse, WebError> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    let horses = HorseRepository::new(pool).list_by_owner(user_id).await?;
    let stables = StableRepository::new(pool).list_by_owner(user_id).await?;
    let registrations = RegistrationRepository::new(pool).list_by_user(user_id).await?;

    Ok(ProfileResponse {
        user: UserResponse::from(user),
        horses,
        stables,
        registrations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_from_hours() {
        assert_eq!(SessionTtl::from_hours(168).0, TimeDelta::days(7));
        assert_eq!(SessionTtl::from_hours(1).0.num_minutes(), 60);
    }
}
