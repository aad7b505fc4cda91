//! SQLite dialogue history repository.
//!
//! The dialogue log is append-only and ordered by rowid. NPC lines are
//! deduplicated by content; player messages are distinct per turn and
//! always inserted.

use async_trait::async_trait;
use sqlx::SqlitePool;

use npchat_domain::{DialogueEntry, NpcId};

use super::super::ports::{DialogueRepo, RepoError};
use super::SqliteStore;

pub struct SqliteDialogueRepo {
    pool: SqlitePool,
}

impl SqliteDialogueRepo {
    pub fn new(store: &SqliteStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    async fn insert_entry(&self, entry: &DialogueEntry) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO dialogue_history (npc_id, dialogue, player_message) VALUES (?, ?, ?)",
        )
        .bind(entry.npc_id.value())
        .bind(&entry.dialogue)
        .bind(entry.player_message.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_dialogue", e))?;
        Ok(())
    }
}

#[async_trait]
impl DialogueRepo for SqliteDialogueRepo {
    async fn append_npc_line(&self, npc_id: NpcId, text: &str) -> Result<(), RepoError> {
        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM dialogue_history WHERE npc_id = ? AND dialogue = ?",
        )
        .bind(npc_id.value())
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("append_npc_line", e))?;

        if existing == 0 {
            self.insert_entry(&DialogueEntry::npc_line(npc_id, text))
                .await?;
        }
        Ok(())
    }

    async fn save_player_message(&self, npc_id: NpcId, text: &str) -> Result<(), RepoError> {
        self.insert_entry(&DialogueEntry::player(npc_id, text)).await
    }

    async fn last_player_message(&self, npc_id: NpcId) -> Result<String, RepoError> {
        let message: Option<String> = sqlx::query_scalar(
            "SELECT player_message FROM dialogue_history \
             WHERE npc_id = ? AND player_message IS NOT NULL \
             ORDER BY rowid DESC LIMIT 1",
        )
        .bind(npc_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("last_player_message", e))?;

        Ok(message.unwrap_or_default())
    }

    async fn npc_lines(&self, npc_id: NpcId) -> Result<Vec<String>, RepoError> {
        sqlx::query_scalar(
            "SELECT dialogue FROM dialogue_history \
             WHERE npc_id = ? AND dialogue != '' ORDER BY rowid",
        )
        .bind(npc_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("npc_lines", e))
    }

    async fn player_messages(&self, npc_id: NpcId) -> Result<Vec<String>, RepoError> {
        sqlx::query_scalar(
            "SELECT player_message FROM dialogue_history \
             WHERE npc_id = ? AND player_message IS NOT NULL ORDER BY rowid",
        )
        .bind(npc_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("player_messages", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NPC: NpcId = NpcId::new(1);

    async fn repo() -> SqliteDialogueRepo {
        let store = SqliteStore::in_memory().await.unwrap();
        SqliteDialogueRepo::new(&store)
    }

    #[tokio::test]
    async fn identical_npc_lines_are_inserted_once() {
        let repo = repo().await;
        repo.append_npc_line(NPC, "Ahoy there!").await.unwrap();
        repo.append_npc_line(NPC, "Ahoy there!").await.unwrap();

        assert_eq!(repo.npc_lines(NPC).await.unwrap(), vec!["Ahoy there!"]);
    }

    #[tokio::test]
    async fn same_line_for_another_npc_is_kept() {
        let repo = repo().await;
        repo.append_npc_line(NPC, "Ahoy there!").await.unwrap();
        repo.append_npc_line(NpcId::new(2), "Ahoy there!").await.unwrap();

        assert_eq!(repo.npc_lines(NPC).await.unwrap().len(), 1);
        assert_eq!(repo.npc_lines(NpcId::new(2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn player_messages_are_never_deduplicated() {
        let repo = repo().await;
        repo.save_player_message(NPC, "hi").await.unwrap();
        repo.save_player_message(NPC, "hi").await.unwrap();

        assert_eq!(repo.player_messages(NPC).await.unwrap(), vec!["hi", "hi"]);
    }

    #[tokio::test]
    async fn last_player_message_skips_npc_lines() {
        let repo = repo().await;
        repo.save_player_message(NPC, "first").await.unwrap();
        repo.save_player_message(NPC, "second").await.unwrap();
        repo.append_npc_line(NPC, "a reply").await.unwrap();

        assert_eq!(repo.last_player_message(NPC).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn last_player_message_is_empty_when_none_exist() {
        let repo = repo().await;
        assert_eq!(repo.last_player_message(NPC).await.unwrap(), "");
    }

    #[tokio::test]
    async fn npc_lines_preserve_insertion_order_and_exclude_player_rows() {
        let repo = repo().await;
        repo.append_npc_line(NPC, "one").await.unwrap();
        repo.save_player_message(NPC, "player says").await.unwrap();
        repo.append_npc_line(NPC, "two").await.unwrap();

        assert_eq!(repo.npc_lines(NPC).await.unwrap(), vec!["one", "two"]);
    }
}
