//! Application state shared across handlers

use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::repositories::{AdRepository, CategoryRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub category_repository: CategoryRepository,
    pub ad_repository: AdRepository,
    pub user_repository: UserRepository,
    /// Root directory for uploaded ad images
    pub media_root: PathBuf,
}
