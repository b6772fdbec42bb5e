use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod database;
mod error;
mod models;
mod pagination;
mod repositories;
mod routes;
mod state;

use std::path::PathBuf;

use common::database::{DatabaseConfig, init_pool};

use crate::{
    repositories::{AdRepository, CategoryRepository, UserRepository},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting classified-ads API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Bootstrap the schema
    database::run_migrations(&pool).await?;

    // Directory for uploaded ad images, served under /media/
    let media_root =
        PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()));
    tokio::fs::create_dir_all(&media_root).await?;

    info!("API service initialized successfully");

    // Initialize repositories
    let category_repository = CategoryRepository::new(pool.clone());
    let ad_repository = AdRepository::new(pool.clone());
    let user_repository = UserRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        category_repository,
        ad_repository,
        user_repository,
        media_root,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
