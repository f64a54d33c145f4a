use fa_db::MIGRATOR;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Writes a row directly, bypassing the store, to simulate data written
/// before linked providers were stored as a list.
pub async fn insert_raw_identity(pool: &SqlitePool, email: &str, linked_providers: Option<&str>) {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query(
        "INSERT INTO identities (email, name, linked_providers, external_ids, version, created_at, updated_at)
         VALUES (?, NULL, ?, '{}', 1, 0, 0)",
    )
    .bind(email)
    .bind(linked_providers)
    .execute(pool)
    .await
    .expect("Failed to insert raw identity");
}
