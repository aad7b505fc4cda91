//! Quest catalog entity operations.

use std::sync::Arc;

use npchat_domain::{NpcId, Quest, QuestId};

use crate::infrastructure::ports::{QuestRepo, RepoError};

/// Quest definitions and completion state.
pub struct QuestCatalog {
    repo: Arc<dyn QuestRepo>,
}

impl QuestCatalog {
    pub fn new(repo: Arc<dyn QuestRepo>) -> Self {
        Self { repo }
    }

    /// Add a quest definition; an existing quest id is a silent no-op.
    pub async fn add(&self, quest: &Quest) -> Result<(), RepoError> {
        self.repo.insert(quest).await
    }

    /// The NPC's quest sequence in its stable progression order.
    pub async fn for_npc(&self, npc_id: NpcId) -> Result<Vec<Quest>, RepoError> {
        self.repo.list_for_npc(npc_id).await
    }

    pub async fn is_completed(&self, quest_id: QuestId, npc_id: NpcId) -> Result<bool, RepoError> {
        self.repo.is_completed(quest_id, npc_id).await
    }

    pub async fn mark_completed(&self, quest_id: QuestId, npc_id: NpcId) -> Result<(), RepoError> {
        self.repo.set_completed(quest_id, npc_id).await
    }
}
