//! SQLite quest repository.
//!
//! Objectives and rewards live inside the quest row as versioned JSON
//! blobs (see `npchat_domain::BLOB_SCHEMA_VERSION`).

use async_trait::async_trait;
use sqlx::SqlitePool;

use npchat_domain::{
    objectives_from_blob, objectives_to_blob, rewards_from_blob, rewards_to_blob, NpcId, Quest,
    QuestId,
};

use super::super::ports::{QuestRepo, RepoError};
use super::SqliteStore;

pub struct SqliteQuestRepo {
    pool: SqlitePool,
}

impl SqliteQuestRepo {
    pub fn new(store: &SqliteStore) -> Self {
        Self {
            pool: store.pool().clone(),
        }
    }

    fn quest_from_row(
        row: (i64, i64, String, String, bool, String, String),
    ) -> Result<Quest, RepoError> {
        let (quest_id, npc_id, name, description, is_completed, objectives, rewards) = row;
        let mut quest = Quest::new(QuestId::new(quest_id), NpcId::new(npc_id), name, description);
        quest.is_completed = is_completed;
        quest.objectives =
            objectives_from_blob(&objectives).map_err(RepoError::serialization)?;
        quest.rewards = rewards_from_blob(&rewards).map_err(RepoError::serialization)?;
        Ok(quest)
    }
}

#[async_trait]
impl QuestRepo for SqliteQuestRepo {
    async fn insert(&self, quest: &Quest) -> Result<(), RepoError> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quests WHERE quest_id = ?")
            .bind(quest.id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("insert_quest", e))?;

        if existing != 0 {
            return Ok(());
        }

        let objectives = objectives_to_blob(&quest.objectives).map_err(RepoError::serialization)?;
        let rewards = rewards_to_blob(&quest.rewards).map_err(RepoError::serialization)?;

        sqlx::query(
            "INSERT INTO quests (quest_id, npc_id, name, description, is_completed, objectives, rewards) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(quest.id.value())
        .bind(quest.npc_id.value())
        .bind(&quest.name)
        .bind(&quest.description)
        .bind(quest.is_completed)
        .bind(objectives)
        .bind(rewards)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_quest", e))?;

        Ok(())
    }

    async fn list_for_npc(&self, npc_id: NpcId) -> Result<Vec<Quest>, RepoError> {
        let rows: Vec<(i64, i64, String, String, bool, String, String)> = sqlx::query_as(
            "SELECT quest_id, npc_id, name, description, is_completed, objectives, rewards \
             FROM quests WHERE npc_id = ? ORDER BY quest_id",
        )
        .bind(npc_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_quests", e))?;

        rows.into_iter().map(Self::quest_from_row).collect()
    }

    async fn is_completed(&self, quest_id: QuestId, npc_id: NpcId) -> Result<bool, RepoError> {
        let completed: Option<bool> = sqlx::query_scalar(
            "SELECT is_completed FROM quests WHERE quest_id = ? AND npc_id = ?",
        )
        .bind(quest_id.value())
        .bind(npc_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("is_quest_completed", e))?;

        Ok(completed.unwrap_or(false))
    }

    async fn set_completed(&self, quest_id: QuestId, npc_id: NpcId) -> Result<(), RepoError> {
        sqlx::query("UPDATE quests SET is_completed = 1 WHERE quest_id = ? AND npc_id = ?")
            .bind(quest_id.value())
            .bind(npc_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("set_quest_completed", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use npchat_domain::{Objective, ObjectiveId, Reward};

    use super::*;

    const NPC: NpcId = NpcId::new(1);

    async fn repo() -> SqliteQuestRepo {
        let store = SqliteStore::in_memory().await.unwrap();
        SqliteQuestRepo::new(&store)
    }

    fn pearl_quest() -> Quest {
        Quest::new(QuestId::new(10), NPC, "Pearl Hunt", "Find two pearls")
            .with_objectives(vec![
                Objective::new(ObjectiveId::new(1), "First pearl", "On the beach"),
                Objective::new(ObjectiveId::new(2), "Second pearl", "In the reef"),
            ])
            .with_rewards(vec![Reward::new(50, "Shelly once dove the reef herself.")])
    }

    #[tokio::test]
    async fn insert_twice_keeps_one_row() {
        let repo = repo().await;
        repo.insert(&pearl_quest()).await.unwrap();
        repo.insert(&pearl_quest()).await.unwrap();

        assert_eq!(repo.list_for_npc(NPC).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn objectives_and_rewards_round_trip_by_value() {
        let repo = repo().await;
        let quest = pearl_quest();
        repo.insert(&quest).await.unwrap();

        let stored = repo.list_for_npc(NPC).await.unwrap().remove(0);
        assert_eq!(stored.objectives, quest.objectives);
        assert_eq!(stored.rewards, quest.rewards);
        assert!(!stored.is_completed);
    }

    #[tokio::test]
    async fn quests_are_ordered_by_quest_id() {
        let repo = repo().await;
        for id in [30, 10, 20] {
            repo.insert(&Quest::new(QuestId::new(id), NPC, format!("q{id}"), "d"))
                .await
                .unwrap();
        }

        let ids: Vec<i64> = repo
            .list_for_npc(NPC)
            .await
            .unwrap()
            .iter()
            .map(|q| q.id.value())
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn set_completed_is_idempotent_and_visible() {
        let repo = repo().await;
        repo.insert(&pearl_quest()).await.unwrap();
        assert!(!repo.is_completed(QuestId::new(10), NPC).await.unwrap());

        repo.set_completed(QuestId::new(10), NPC).await.unwrap();
        repo.set_completed(QuestId::new(10), NPC).await.unwrap();
        assert!(repo.is_completed(QuestId::new(10), NPC).await.unwrap());
    }

    #[tokio::test]
    async fn is_completed_is_false_for_missing_quest() {
        let repo = repo().await;
        assert!(!repo.is_completed(QuestId::new(404), NPC).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_blob_surfaces_serialization_error() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO quests (quest_id, npc_id, name, description, is_completed, objectives, rewards) \
             VALUES (1, 1, 'q', 'd', 0, 'not json', 'not json')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.list_for_npc(NPC).await.unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }
}
