//! NPC entity operations.

use std::sync::Arc;

use npchat_domain::{NpcId, NpcRecord};

use crate::infrastructure::ports::{NpcRepo, RepoError};

/// NPC identity queries and registration.
pub struct Npc {
    repo: Arc<dyn NpcRepo>,
}

impl Npc {
    pub fn new(repo: Arc<dyn NpcRepo>) -> Self {
        Self { repo }
    }

    /// Register the NPC on first sight; repeat calls are silent no-ops.
    pub async fn register(&self, npc: &NpcRecord) -> Result<(), RepoError> {
        self.repo.upsert(npc).await
    }

    pub async fn get(&self, id: NpcId) -> Result<Option<NpcRecord>, RepoError> {
        self.repo.get(id).await
    }

    /// Every other known NPC, in stable id order.
    pub async fn others(&self, id: NpcId) -> Result<Vec<NpcRecord>, RepoError> {
        self.repo.list_except(id).await
    }
}
