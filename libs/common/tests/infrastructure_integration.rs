//! Integration tests for the infrastructure components
//!
//! These tests verify that the SQLite pool is properly configured and
//! accessible from the application.

use common::database::{DatabaseConfig, health_check, init_pool};
use sqlx::Row;

/// Test that the database pool can be created and queried
#[tokio::test]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "SQLite simple query test failed");

    // Foreign key enforcement is switched on by the pool options
    let row = sqlx::query("PRAGMA foreign_keys").fetch_one(&pool).await?;
    let enabled: i32 = row.get(0);
    assert_eq!(enabled, 1, "foreign_keys pragma should be enabled");

    Ok(())
}
