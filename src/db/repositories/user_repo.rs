//! User repository

use sqlx::PgPool;

use crate::{error::AppResult, models::User};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Grant admin capability to a user
    pub async fn promote_to_admin(pool: &PgPool, id: i32) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users SET admin = TRUE WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
