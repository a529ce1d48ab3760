use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use stash_core::error::AppError;
use stash_core::models::{NewUser, User};
use stash_core::traits::UserStore;

/// Credential store backed by the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    salt: String,
    iterations: i32,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            salt: row.salt,
            iterations: row.iterations as u32,
            created_at: row.created_at,
        }
    }
}

impl UserStore for UserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<Uuid, AppError> {
        let iterations = i32::try_from(user.iterations).map_err(|_| {
            AppError::Generic(format!("Iteration count {} out of range", user.iterations))
        })?;

        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, salt, iterations)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(iterations)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                tracing::debug!(username = %user.username, "Username already taken");
                AppError::Conflict(format!("username '{}' is already taken", user.username))
            } else {
                tracing::error!(error = %e, "Failed to insert user");
                AppError::DatabaseError(e.to_string())
            }
        })?;

        Ok(row.0)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, salt, iterations, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}
