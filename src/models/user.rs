//! User model
//!
//! Users are created and authenticated by the external auth service;
//! this application only stores them so progress records have an owner
//! and the promote-admin command has a target.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub registered: bool,
    pub admin: bool,
}
