//! Revision log repository
//!
//! An append-only event log of content mutations. Every create, update
//! and delete appends one row in the same transaction as the mutation
//! itself; nothing in the application reads the log back.

use sqlx::PgExecutor;

use crate::error::AppResult;

/// Mutation kinds recorded in the revision log
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
}

/// Repository for the revision event log
pub struct RevisionRepository;

impl RevisionRepository {
    /// Append one revision entry
    ///
    /// `snapshot` is the entity state after the mutation (or the last
    /// state before a delete); `user_id` is the acting requester, when
    /// identified.
    pub async fn append<'e, E: PgExecutor<'e>>(
        db: E,
        entity_type: &str,
        entity_id: i32,
        action: &str,
        snapshot: serde_json::Value,
        user_id: Option<i32>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO revisions (entity_type, entity_id, action, snapshot, user_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .bind(action)
        .bind(snapshot)
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(())
    }
}
