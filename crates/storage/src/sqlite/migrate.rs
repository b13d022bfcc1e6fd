use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the chapter and subject-book tables plus the listing index.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS chapters (
                    id INTEGER PRIMARY KEY,
                    subject TEXT NOT NULL,
                    category TEXT NOT NULL,
                    ordinal INTEGER NOT NULL CHECK (ordinal >= 1),
                    title TEXT NOT NULL,
                    theory INTEGER NOT NULL DEFAULT 0,
                    pyqs INTEGER NOT NULL DEFAULT 0,
                    module_a INTEGER NOT NULL DEFAULT 0,
                    module_b INTEGER NOT NULL DEFAULT 0,
                    revision_count INTEGER NOT NULL DEFAULT 0 CHECK (revision_count >= 0),
                    physics_galaxy INTEGER NOT NULL DEFAULT 0,
                    cengage INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    UNIQUE (subject, title)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS subject_books (
                    id INTEGER PRIMARY KEY,
                    subject TEXT NOT NULL UNIQUE,
                    pinkbook INTEGER NOT NULL DEFAULT 0,
                    yellowbook INTEGER NOT NULL DEFAULT 0,
                    play_with_graphs INTEGER NOT NULL DEFAULT 0,
                    n_awasthi INTEGER NOT NULL DEFAULT 0,
                    ms_chauhan INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_chapters_subject_category_ordinal
                    ON chapters (subject, category, ordinal);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
