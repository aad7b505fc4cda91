//! System prompt composition.
//!
//! The prompt is a deterministic function of store state: NPC identity,
//! the other known NPCs, completed-quest lore, and the NPC's own prior
//! lines. Clause order is fixed; the wording is a tunable template.

use std::fmt::Write as _;
use std::sync::Arc;

use npchat_domain::{NpcId, NpcRecord, Quest};

use crate::entities::{DialogueLog, Npc, QuestCatalog};
use crate::infrastructure::ports::RepoError;

pub struct PromptComposer {
    npcs: Arc<Npc>,
    dialogue: Arc<DialogueLog>,
    quests: Arc<QuestCatalog>,
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("NPC not found")]
    NpcNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl PromptComposer {
    pub fn new(npcs: Arc<Npc>, dialogue: Arc<DialogueLog>, quests: Arc<QuestCatalog>) -> Self {
        Self {
            npcs,
            dialogue,
            quests,
        }
    }

    /// Gather store state for the NPC and build its system prompt.
    ///
    /// Fails with `NpcNotFound` when the identity record is missing; the
    /// caller treats that as fatal for the current turn.
    pub async fn compose(&self, npc_id: NpcId) -> Result<String, PromptError> {
        let npc = self
            .npcs
            .get(npc_id)
            .await?
            .ok_or(PromptError::NpcNotFound)?;
        let others = self.npcs.others(npc_id).await?;
        let quests = self.quests.for_npc(npc_id).await?;
        let history = self.dialogue.npc_lines(npc_id).await?;

        Ok(build_system_prompt(&npc, &others, &quests, &history))
    }
}

/// Pure prompt construction over already-retrieved state.
pub fn build_system_prompt(
    npc: &NpcRecord,
    others: &[NpcRecord],
    quests: &[Quest],
    history: &[String],
) -> String {
    let mut prompt = String::new();

    // 1. Identity and world setting.
    let _ = write!(
        prompt,
        "You are a(n) {} named {}. You are known for your {} attitude. \
         You find yourself in a world called Surf and Turf where people love \
         to go on adventures in both sea and land.",
        npc.species, npc.name, npc.characteristics
    );

    // 2. Other known NPCs, in retrieval order.
    if !others.is_empty() {
        prompt.push_str(" You are aware of the following NPCs:");
        for other in others {
            let _ = write!(
                prompt,
                " {}, a {} known for their {} attitude.",
                other.name, other.species, other.characteristics
            );
        }
    }

    // 3. Completed quests and their lore; the remaining-quest counter starts
    //    at the full sequence length.
    let mut available_quests = quests.len();
    let completed: Vec<&Quest> = quests.iter().filter(|q| q.is_completed).collect();
    available_quests -= completed.len();

    if !completed.is_empty() {
        prompt.push_str(
            " The player has completed the following quests and have added lore about your life: ",
        );
        for quest in &completed {
            let _ = writeln!(prompt, "{}: {}", quest.name, quest.description);
            for reward in &quest.rewards {
                let _ = writeln!(prompt, "Lore: {}", reward.lore_description);
            }
        }
    }

    // 4. Prior NPC lines, verbatim and in order.
    if !history.is_empty() {
        prompt.push_str(" Here is what you have said before: ");
        for line in history {
            prompt.push_str(line);
        }
    }

    // 5. Remaining quest count.
    if available_quests > 0 {
        let _ = write!(prompt, " You have {available_quests} quest(s) available.");
    }

    // 6. Closing persona and style instruction.
    let _ = write!(
        prompt,
        " Interact with the player, who is a crab, in your {} manner. \
         Do not use any paragraph breaks in your message and say all you \
         have to say in 4 sentences (your dialogue only).",
        npc.characteristics
    );

    prompt
}
