//! One-shot admin promotion tool
//!
//! Grants the admin capability to an existing user:
//! `promote-admin <username>`

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use quizdeck::{config::CONFIG, db::repositories::UserRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let username = std::env::args()
        .nth(1)
        .context("usage: promote-admin <username>")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&CONFIG.database.url)
        .await?;

    let user = UserRepository::find_by_username(&pool, &username)
        .await?
        .with_context(|| format!("No user named '{username}'"))?;

    if user.admin {
        tracing::info!(username = %user.username, "User is already admin");
        return Ok(());
    }

    let user = UserRepository::promote_to_admin(&pool, user.id).await?;
    tracing::info!(username = %user.username, id = user.id, "User promoted to admin");

    Ok(())
}
