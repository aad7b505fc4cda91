//! Dialogue log entity operations.

use std::sync::Arc;

use npchat_domain::NpcId;

use crate::infrastructure::ports::{DialogueRepo, RepoError};

/// The append-only per-NPC conversation log.
pub struct DialogueLog {
    repo: Arc<dyn DialogueRepo>,
}

impl DialogueLog {
    pub fn new(repo: Arc<dyn DialogueRepo>) -> Self {
        Self { repo }
    }

    pub async fn record_npc_line(&self, npc_id: NpcId, text: &str) -> Result<(), RepoError> {
        self.repo.append_npc_line(npc_id, text).await
    }

    pub async fn record_player_message(&self, npc_id: NpcId, text: &str) -> Result<(), RepoError> {
        self.repo.save_player_message(npc_id, text).await
    }

    pub async fn last_player_message(&self, npc_id: NpcId) -> Result<String, RepoError> {
        self.repo.last_player_message(npc_id).await
    }

    pub async fn npc_lines(&self, npc_id: NpcId) -> Result<Vec<String>, RepoError> {
        self.repo.npc_lines(npc_id).await
    }

    pub async fn player_messages(&self, npc_id: NpcId) -> Result<Vec<String>, RepoError> {
        self.repo.player_messages(npc_id).await
    }
}
