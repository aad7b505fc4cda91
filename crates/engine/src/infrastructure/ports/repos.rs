//! Repository port traits for database access.
//!
//! All inserts are idempotent by existence check: a duplicate key or
//! duplicate NPC line is a silent no-op, never a uniqueness violation.
//! "Not found" surfaces as `Option`/empty results; `RepoError` is reserved
//! for structural storage failures.

use async_trait::async_trait;

use npchat_domain::{NpcId, NpcRecord, Quest, QuestId};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpcRepo: Send + Sync {
    /// Insert the NPC if its id is unseen; an existing row is left untouched.
    async fn upsert(&self, npc: &NpcRecord) -> Result<(), RepoError>;

    async fn get(&self, id: NpcId) -> Result<Option<NpcRecord>, RepoError>;

    /// All other NPCs, ordered by id.
    async fn list_except(&self, id: NpcId) -> Result<Vec<NpcRecord>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueRepo: Send + Sync {
    /// Append an NPC line unless an identical `(npc_id, text)` line exists.
    async fn append_npc_line(&self, npc_id: NpcId, text: &str) -> Result<(), RepoError>;

    /// Player messages are distinct per turn and always inserted.
    async fn save_player_message(&self, npc_id: NpcId, text: &str) -> Result<(), RepoError>;

    /// Most recent player message by insertion order; empty string if none.
    async fn last_player_message(&self, npc_id: NpcId) -> Result<String, RepoError>;

    /// NPC lines only, in insertion order.
    async fn npc_lines(&self, npc_id: NpcId) -> Result<Vec<String>, RepoError>;

    /// Player messages only, in insertion order.
    async fn player_messages(&self, npc_id: NpcId) -> Result<Vec<String>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestRepo: Send + Sync {
    /// Insert the quest if its id is unseen; an existing row is left untouched.
    async fn insert(&self, quest: &Quest) -> Result<(), RepoError>;

    /// The NPC's quest sequence, ordered by quest id.
    async fn list_for_npc(&self, npc_id: NpcId) -> Result<Vec<Quest>, RepoError>;

    /// False when the quest row is absent.
    async fn is_completed(&self, quest_id: QuestId, npc_id: NpcId) -> Result<bool, RepoError>;

    /// Idempotent completion update.
    async fn set_completed(&self, quest_id: QuestId, npc_id: NpcId) -> Result<(), RepoError>;
}
