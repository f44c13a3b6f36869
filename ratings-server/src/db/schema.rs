//! Schema setup for the teachers and reviews tables
//!
//! Creation is `IF NOT EXISTS`, so running this against an existing
//! database leaves tables and rows untouched. The one upgrade step adds
//! `teachers.name_key` when an older file lacks it.

use sqlx::SqlitePool;

/// Create tables and indexes if they are missing.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring database schema...");

    // No UNIQUE on name: uniqueness is case-insensitive, enforced by TeacherRepo
    // against name_key (the Unicode-lowercased name).
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_key TEXT NOT NULL,
            description TEXT NOT NULL,
            avg_rating REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id INTEGER NOT NULL REFERENCES teachers(id),
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            reason TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    add_name_key_if_missing(pool).await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_teachers_name_key ON teachers (name_key)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_teacher_id ON reviews (teacher_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database schema ready");
    Ok(())
}

/// Upgrade a teachers table created before name_key existed.
///
/// The backfill uses SQLite's `lower()`, which folds ASCII only; rows
/// written afterwards get the full Unicode key from TeacherRepo.
async fn add_name_key_if_missing(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let present: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pragma_table_info('teachers') WHERE name = 'name_key'",
    )
    .fetch_one(pool)
    .await?;

    if present == 0 {
        tracing::info!("Adding teachers.name_key column");
        let mut tx = pool.begin().await?;
        sqlx::query("ALTER TABLE teachers ADD COLUMN name_key TEXT NOT NULL DEFAULT ''")
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE teachers SET name_key = lower(name)")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
    }

    Ok(())
}
