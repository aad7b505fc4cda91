//! Interaction start flow.
//!
//! Seeds the NPC's identity, introduction lines, and quest definitions into
//! the store (all idempotent), advances the quest state machine, and decides
//! the greeting: introductions on first contact, a thank-you with rewards
//! right after a quest completes, a plain welcome otherwise.

use std::collections::HashSet;
use std::sync::Arc;

use npchat_domain::{NpcId, NpcRecord, Quest, QuestItem, Reward};

use crate::entities::{DialogueLog, Npc, QuestCatalog};
use crate::infrastructure::ports::RepoError;
use crate::use_cases::quests::QuestProgression;

/// What the UI collaborator shows when an interaction starts.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// First contact: the NPC's opening lines, plus the first quest when one
    /// is open.
    Introduction {
        lines: Vec<String>,
        active_quest: Option<Quest>,
    },
    /// A quest was just completed: rewards to apply and the next quest to
    /// display.
    QuestComplete {
        greeting: String,
        rewards: Vec<Reward>,
        next_quest: Quest,
    },
    /// Any other return visit.
    WelcomeBack { greeting: String },
}

/// Session state for NPC interactions.
///
/// Owns the progression engine and the per-NPC first-contact flags for the
/// lifetime of the play session; nothing here is global.
pub struct InteractionSession {
    npcs: Arc<Npc>,
    dialogue: Arc<DialogueLog>,
    quests: Arc<QuestCatalog>,
    progression: QuestProgression,
    greeted: HashSet<NpcId>,
}

impl InteractionSession {
    pub fn new(
        npcs: Arc<Npc>,
        dialogue: Arc<DialogueLog>,
        quests: Arc<QuestCatalog>,
        progression: QuestProgression,
    ) -> Self {
        Self {
            npcs,
            dialogue,
            quests,
            progression,
            greeted: HashSet::new(),
        }
    }

    /// Begin an interaction with the NPC described by the given asset data.
    pub async fn start(
        &mut self,
        npc: &NpcRecord,
        npc_quests: &[Quest],
    ) -> Result<InteractionOutcome, RepoError> {
        self.npcs.register(npc).await?;
        for line in &npc.introductions {
            self.dialogue.record_npc_line(npc.id, line).await?;
        }
        for quest in npc_quests {
            self.quests.add(quest).await?;
        }

        self.progression.initialize_for_npc(npc.id).await?;
        let next_quest = self.progression.next_quest(npc.id).await?;

        if self.greeted.insert(npc.id) {
            return Ok(InteractionOutcome::Introduction {
                lines: npc.introductions.clone(),
                active_quest: next_quest.filter(|q| !q.is_completed),
            });
        }

        match next_quest {
            Some(next_quest) if self.progression.is_previous_quest_complete() => {
                let rewards = self.progression.rewards_to_trigger().to_vec();
                // The transition consumed the collected quest items.
                self.progression.take_collected_items();
                Ok(InteractionOutcome::QuestComplete {
                    greeting: "Thank you so much".to_string(),
                    rewards,
                    next_quest,
                })
            }
            _ => Ok(InteractionOutcome::WelcomeBack {
                greeting: "Welcome Back".to_string(),
            }),
        }
    }

    /// Hand a collected item to the progression engine.
    ///
    /// Returns true when it satisfied an open objective of the active quest.
    pub fn collect_item(&mut self, item: QuestItem) -> bool {
        let satisfied = self.progression.complete_objective(&item);
        if satisfied {
            self.progression.collect_item(item);
        }
        satisfied
    }

    pub fn active_quest(&self) -> Option<&Quest> {
        self.progression.active_quest()
    }
}
