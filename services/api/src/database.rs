//! Schema bootstrap for the API service
//!
//! The schema is small enough that it is created in place with embedded DDL
//! instead of a migration framework. Every statement is idempotent.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// Create the tables used by the service if they do not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create locations table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create categories table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT,
            username TEXT,
            role TEXT,
            age INTEGER
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create users table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_locations (
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            location_id INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
            PRIMARY KEY (user_id, location_id)
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create user_locations table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            price INTEGER NOT NULL,
            description TEXT,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            is_published INTEGER NOT NULL DEFAULT 0,
            image TEXT
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create ads table")?;

    Ok(())
}
