//! User repository for database operations

use anyhow::{Context, Result};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::models::users::{CreateUserRequest, UpdateUserRequest, UserListItem, UserResponse};
use crate::pagination::{self, Page};

/// Fixed page size for the user listing
pub const USERS_PER_PAGE: i64 = 4;

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user and associate its locations, creating location rows
    /// on demand.
    pub async fn create(&self, payload: &CreateUserRequest) -> Result<UserResponse> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, username, role, age)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.username)
        .bind(&payload.role)
        .bind(payload.age)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        for name in &payload.locations {
            link_location(&mut tx, id, name).await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .context("user missing right after insert")
    }

    /// Find a user by ID, with resolved location names
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserResponse>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, username, role, age
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let locations = self.location_names(id).await?;

        Ok(Some(UserResponse {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            username: row.get("username"),
            role: row.get("role"),
            age: row.get("age"),
            locations,
        }))
    }

    /// Get one page of users ordered by username ascending, each annotated
    /// with the count of its published ads.
    pub async fn get_page(&self, requested_page: Option<i64>) -> Result<(Vec<UserListItem>, Page)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let page = pagination::resolve(total, USERS_PER_PAGE, requested_page);

        let rows = sqlx::query(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.role, u.age,
                   (SELECT COUNT(*) FROM ads a
                    WHERE a.author_id = u.id AND a.is_published = 1) AS total_ads
            FROM users u
            ORDER BY u.username ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");
            users.push(UserListItem {
                id,
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                username: row.get("username"),
                role: row.get("role"),
                age: row.get("age"),
                locations: self.location_names(id).await?,
                total_ads: row.get("total_ads"),
            });
        }

        Ok((users, page))
    }

    /// Apply the present fields of a partial update; a present `locations`
    /// list replaces the whole association set. Returns None when the row is
    /// missing.
    pub async fn update(
        &self,
        id: i64,
        payload: &UpdateUserRequest,
    ) -> Result<Option<UserResponse>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT first_name, last_name, username, age FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let first_name: Option<String> =
            payload.first_name.clone().or_else(|| row.get("first_name"));
        let last_name: Option<String> =
            payload.last_name.clone().or_else(|| row.get("last_name"));
        let username: Option<String> = payload.username.clone().or_else(|| row.get("username"));
        let age: Option<i64> = payload.age.or_else(|| row.get("age"));

        sqlx::query(
            r#"
            UPDATE users
            SET first_name = ?, last_name = ?, username = ?, age = ?
            WHERE id = ?
            "#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&username)
        .bind(age)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(locations) = &payload.locations {
            sqlx::query("DELETE FROM user_locations WHERE user_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for name in locations {
                link_location(&mut tx, id, name).await?;
            }
        }

        tx.commit().await?;

        self.find_by_id(id).await
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn location_names(&self, user_id: i64) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT l.name
            FROM locations l
            JOIN user_locations ul ON ul.location_id = l.id
            WHERE ul.user_id = ?
            ORDER BY l.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.get("name")).collect())
    }
}

/// Get-or-create a location by name and associate it with the user.
///
/// The insert relies on the UNIQUE constraint: on conflict nothing happens
/// and the re-select picks up whichever row won, so concurrent creators of
/// the same name converge on a single location.
async fn link_location(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    name: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO locations (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(&mut **tx)
        .await?;

    let location_id: i64 = sqlx::query_scalar("SELECT id FROM locations WHERE name = ?")
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;

    sqlx::query("INSERT OR IGNORE INTO user_locations (user_id, location_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(location_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
