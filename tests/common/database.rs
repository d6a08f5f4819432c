//! Database test fixtures and utilities
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` is set; otherwise the
//! helpers return `None` and the test returns early.

use sqlx::PgPool;

/// Connect to the test database and apply migrations
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to create test database pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    cleanup_test_data(&pool).await.expect("Failed to clean test data");

    Some(pool)
}

/// Remove all rows while preserving the schema
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE posts, users CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}
