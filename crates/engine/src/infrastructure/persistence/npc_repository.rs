//! SQLite NPC repository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use npchat_domain::{NpcId, NpcRecord};

use super::super::ports::{NpcRepo, RepoError};
use super::SqliteStore;

pub struct SqliteNpcRepo {
    pool: SqlitePool,
}

impl SqliteNpcRepo {
    pub fn new(store: &SqliteStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    fn record_from_row(row: (i64, String, String, String)) -> NpcRecord {
        let (id, name, species, characteristics) = row;
        // Introductions are asset data, not identity columns; retrieved
        // records carry an empty list.
        NpcRecord::new(NpcId::new(id), name, species, characteristics)
    }
}

#[async_trait]
impl NpcRepo for SqliteNpcRepo {
    async fn upsert(&self, npc: &NpcRecord) -> Result<(), RepoError> {
        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM npc_characteristics WHERE id = ?")
                .bind(npc.id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepoError::database("upsert_npc", e))?;

        if existing == 0 {
            sqlx::query(
                "INSERT INTO npc_characteristics (id, name, species, characteristics) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(npc.id.value())
            .bind(&npc.name)
            .bind(&npc.species)
            .bind(&npc.characteristics)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("upsert_npc", e))?;
        }

        Ok(())
    }

    async fn get(&self, id: NpcId) -> Result<Option<NpcRecord>, RepoError> {
        let row: Option<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id, name, species, characteristics FROM npc_characteristics WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_npc", e))?;

        Ok(row.map(Self::record_from_row))
    }

    async fn list_except(&self, id: NpcId) -> Result<Vec<NpcRecord>, RepoError> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            "SELECT id, name, species, characteristics FROM npc_characteristics \
             WHERE id != ? ORDER BY id",
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_npcs", e))?;

        Ok(rows.into_iter().map(Self::record_from_row).collect())
    }
}
