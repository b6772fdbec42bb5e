//! Ad repository for database operations

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::ads::{AdResponse, CreateAdRequest, UpdateAdRequest};
use crate::pagination::{self, Page};

/// Fixed page size for the ad listing
pub const ADS_PER_PAGE: i64 = 10;

/// Base select resolving the author username and category name
const AD_SELECT: &str = r#"
    SELECT a.id, a.name, u.username AS author, a.price, a.description,
           c.name AS category, a.is_published, a.image
    FROM ads a
    JOIN users u ON u.id = a.author_id
    JOIN categories c ON c.id = a.category_id
"#;

fn ad_from_row(row: &SqliteRow) -> AdResponse {
    let image: Option<String> = row.get("image");

    AdResponse {
        id: row.get("id"),
        name: row.get("name"),
        author: row.get("author"),
        price: row.get("price"),
        description: row.get("description"),
        category: row.get("category"),
        is_published: row.get("is_published"),
        image: image.map(|path| format!("/media/{}", path)),
    }
}

/// Ad repository for database operations
#[derive(Clone)]
pub struct AdRepository {
    pool: SqlitePool,
}

impl AdRepository {
    /// Create a new ad repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new ad; the caller is responsible for having resolved the
    /// author and category references beforehand.
    pub async fn create(&self, payload: &CreateAdRequest) -> Result<AdResponse> {
        let result = sqlx::query(
            r#"
            INSERT INTO ads (name, author_id, price, description, category_id, is_published)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payload.name)
        .bind(payload.author_id)
        .bind(payload.price)
        .bind(&payload.description)
        .bind(payload.category_id)
        .bind(payload.is_published.unwrap_or(false))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .context("ad missing right after insert")
    }

    /// Find an ad by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AdResponse>> {
        let row = sqlx::query(&format!("{AD_SELECT} WHERE a.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(ad_from_row))
    }

    /// Get one page of ads ordered by price descending
    pub async fn get_page(&self, requested_page: Option<i64>) -> Result<(Vec<AdResponse>, Page)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ads")
            .fetch_one(&self.pool)
            .await?;

        let page = pagination::resolve(total, ADS_PER_PAGE, requested_page);

        let rows = sqlx::query(&format!(
            "{AD_SELECT} ORDER BY a.price DESC LIMIT ? OFFSET ?"
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        let ads = rows.iter().map(ad_from_row).collect();

        Ok((ads, page))
    }

    /// Apply the present fields of a partial update; returns None when the
    /// row is missing. A `category_id`, if any, must already be resolved.
    pub async fn update(
        &self,
        id: i64,
        payload: &UpdateAdRequest,
    ) -> Result<Option<AdResponse>> {
        let row = sqlx::query("SELECT name, description, price, category_id FROM ads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = payload
            .name
            .clone()
            .unwrap_or_else(|| row.get("name"));
        let description: Option<String> = payload
            .description
            .clone()
            .or_else(|| row.get("description"));
        let price: i64 = payload.price.unwrap_or_else(|| row.get("price"));
        let category_id: i64 = payload
            .category_id
            .unwrap_or_else(|| row.get("category_id"));

        sqlx::query(
            r#"
            UPDATE ads
            SET name = ?, description = ?, price = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(price)
        .bind(category_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await
    }

    /// Attach an uploaded image path to an ad; returns None when the row is
    /// missing.
    pub async fn set_image(&self, id: i64, path: &str) -> Result<Option<AdResponse>> {
        let result = sqlx::query("UPDATE ads SET image = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Delete an ad by ID
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
