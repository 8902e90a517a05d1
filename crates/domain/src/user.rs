use sqlx::{Executor, FromRow, Postgres};
use time::OffsetDateTime;

use crate::DomainError;

/// User entity
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Repository for User operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user.
    ///
    /// `username` is stored as given; callers normalize it first. A duplicate
    /// username surfaces as [`DomainError::Conflict`].
    pub async fn create<'e, E>(
        executor: E,
        username: &str,
        password_hash: &str,
    ) -> Result<User, DomainError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let now = OffsetDateTime::now_utc();

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .fetch_one(executor)
        .await
        .map_err(|e| DomainError::from_insert(e, username))
    }

    /// Find a user by ID
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, DomainError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Find a user by (already normalized) username
    pub async fn find_by_username<'e, E>(
        executor: E,
        username: &str,
    ) -> Result<Option<User>, DomainError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Delete a user by ID. Owned todos go with it.
    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, DomainError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
