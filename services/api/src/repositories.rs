//! Repositories for database operations

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::models::CategoryResponse;

pub mod ads;
pub mod users;

pub use ads::AdRepository;
pub use users::UserRepository;

/// Category repository for database operations
#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new category
    pub async fn create(&self, name: Option<&str>) -> Result<CategoryResponse> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(CategoryResponse {
            id: result.last_insert_rowid(),
            name: name.map(str::to_string),
        })
    }

    /// Get all categories ordered by name
    pub async fn get_all(&self) -> Result<Vec<CategoryResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let categories = rows
            .into_iter()
            .map(|row| CategoryResponse {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect();

        Ok(categories)
    }

    /// Find a category by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CategoryResponse>> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| CategoryResponse {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    /// Overwrite the name of a category; returns None when the row is missing
    pub async fn update(&self, id: i64, name: Option<&str>) -> Result<Option<CategoryResponse>> {
        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(CategoryResponse {
            id,
            name: name.map(str::to_string),
        }))
    }

    /// Delete a category by ID
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
