use domain::{DomainError, User, UserRepository};
use sqlx::PgPool;
use tracing::info;

use crate::error::UserFeatureError;
use crate::password::{hash_password, verify_password};
use crate::session::SessionKeys;

pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_USERNAME_LEN: usize = 50;

/// Username and password as submitted by the client
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Usernames are compared trimmed and lowercased
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Service for user-related operations
pub struct UserService;

impl UserService {
    /// Register a new user
    pub async fn register(pool: &PgPool, input: Credentials) -> Result<User, UserFeatureError> {
        let username = normalize_username(&input.username);

        if username.is_empty() || input.password.is_empty() {
            return Err(UserFeatureError::Validation(
                "username and password are required".to_string(),
            ));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(UserFeatureError::Validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserFeatureError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        // Check if username already exists
        if UserRepository::find_by_username(pool, &username)
            .await?
            .is_some()
        {
            return Err(UserFeatureError::UsernameTaken(username));
        }

        let password_hash = hash_password(&input.password).await?;

        let mut tx = pool.begin().await.map_err(DomainError::from)?;

        // The unique index still catches a concurrent registration of the same name
        let user = match UserRepository::create(&mut *tx, &username, &password_hash).await {
            Ok(user) => user,
            Err(DomainError::Conflict(_)) => return Err(UserFeatureError::UsernameTaken(username)),
            Err(e) => return Err(e.into()),
        };

        tx.commit().await.map_err(DomainError::from)?;

        info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Check credentials. Unknown user and wrong password fail identically.
    pub async fn login(pool: &PgPool, input: Credentials) -> Result<User, UserFeatureError> {
        let username = normalize_username(&input.username);

        let Some(user) = UserRepository::find_by_username(pool, &username).await? else {
            return Err(UserFeatureError::InvalidCredentials);
        };
        if !verify_password(&input.password, &user.password_hash).await {
            return Err(UserFeatureError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");

        Ok(user)
    }

    /// Resolve a bearer token to the user it was issued for
    pub async fn authenticate(
        pool: &PgPool,
        sessions: &SessionKeys,
        token: &str,
    ) -> Result<User, UserFeatureError> {
        let user_id = sessions.verify(token)?;

        // A token for a deleted user is just an invalid token
        Self::get(pool, user_id).await.map_err(|e| match e {
            UserFeatureError::NotFound(_) => UserFeatureError::Unauthenticated,
            other => other,
        })
    }

    /// Get a user by ID
    pub async fn get(pool: &PgPool, id: i64) -> Result<User, UserFeatureError> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or(UserFeatureError::NotFound(id))
    }

    /// Delete a user together with their todos
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, UserFeatureError> {
        Ok(UserRepository::delete(pool, id).await?)
    }
}
