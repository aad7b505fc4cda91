//! SQLite connection management.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::super::ports::RepoError;

/// Shared SQLite connection pool.
///
/// Creates the schema on construction; there is no migration framework.
/// The objectives/rewards blob columns carry their own schema version.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) a file-backed database.
    pub async fn open(path: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        tracing::info!("Opened SQLite database at {}", path);

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    /// In-memory database for tests and resets.
    ///
    /// Pinned to a single connection: every pooled connection would
    /// otherwise see its own empty in-memory database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS npc_characteristics (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                species TEXT NOT NULL,
                characteristics TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dialogue_history (
                npc_id INTEGER NOT NULL,
                dialogue TEXT NOT NULL,
                player_message TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quests (
                quest_id INTEGER PRIMARY KEY,
                npc_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                is_completed INTEGER NOT NULL DEFAULT 0,
                objectives TEXT NOT NULL,
                rewards TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("Database schema initialized");
        Ok(())
    }

    /// Wipe all three tables. Irreversible; used for resets and fixtures.
    pub async fn clear_all(&self) -> Result<(), RepoError> {
        for table in ["quests", "dialogue_history", "npc_characteristics"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::database("clear_all", e))?;
        }
        Ok(())
    }
}
