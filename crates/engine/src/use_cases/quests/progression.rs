//! Per-NPC quest progression state machine.
//!
//! Each NPC owns an ordered quest sequence (store retrieval order, ascending
//! quest id). At most one quest is active at a time; the next quest activates
//! only after the active one completes. Cursors advance monotonically and
//! live for the process lifetime.
//!
//! Completion flushing is deferred: `complete_objective` marks the active
//! quest completed in memory, and the store is updated on the next
//! `next_quest` call, when the sequence advances.

use std::collections::HashMap;
use std::sync::Arc;

use npchat_domain::{NpcId, Quest, QuestItem, Reward};

use crate::entities::QuestCatalog;
use crate::infrastructure::ports::RepoError;

pub struct QuestProgression {
    quests: Arc<QuestCatalog>,
    /// Quest sequence of the NPC currently being served.
    sequence: Vec<Quest>,
    /// Index into `sequence`; mirrors the entry in `cursors`.
    cursor: usize,
    /// Per-NPC cursors, created lazily on first interaction.
    cursors: HashMap<NpcId, usize>,
    active: Option<Quest>,
    previous: Option<Quest>,
    collected_items: Vec<QuestItem>,
}

impl QuestProgression {
    pub fn new(quests: Arc<QuestCatalog>) -> Self {
        Self {
            quests,
            sequence: Vec::new(),
            cursor: 0,
            cursors: HashMap::new(),
            active: None,
            previous: None,
            collected_items: Vec::new(),
        }
    }

    /// Load the NPC's quest sequence and restore its cursor (0 if unseen).
    pub async fn initialize_for_npc(&mut self, npc_id: NpcId) -> Result<(), RepoError> {
        let cursor = *self.cursors.entry(npc_id).or_insert(0);
        self.sequence = self.quests.for_npc(npc_id).await?;
        self.cursor = cursor;
        Ok(())
    }

    /// Advance the state machine and return the quest that is now active.
    ///
    /// - No active quest: activates the quest under the cursor, if any.
    /// - Active quest completed: persists the completion, advances the
    ///   cursor, records the previous quest, and activates the next one.
    /// - Active quest still open: returns `None`; the caller must not
    ///   advance.
    pub async fn next_quest(&mut self, npc_id: NpcId) -> Result<Option<Quest>, RepoError> {
        match &self.active {
            None => {
                if let Some(first) = self.sequence.get(self.cursor) {
                    let first = first.clone();
                    self.active = Some(first.clone());
                    self.cursors.insert(npc_id, self.cursor);
                    return Ok(Some(first));
                }
                Ok(None)
            }
            Some(active) if active.is_completed => {
                // Flush the deferred in-memory completion before advancing.
                self.quests.mark_completed(active.id, npc_id).await?;

                self.cursor += 1;
                if let Some(next) = self.sequence.get(self.cursor) {
                    let next = next.clone();
                    self.previous = self.active.replace(next.clone());
                    self.cursors.insert(npc_id, self.cursor);
                    return Ok(Some(next));
                }
                Ok(None)
            }
            Some(_) => Ok(None),
        }
    }

    /// Mark the objective matching the collected item, if the active quest
    /// has one open. Completing the last objective completes the active
    /// quest in memory; the store is updated on the next `next_quest` call.
    pub fn complete_objective(&mut self, item: &QuestItem) -> bool {
        match self.active.as_mut() {
            Some(active) => active.complete_objective(item.id),
            None => false,
        }
    }

    /// True iff a quest transition has occurred and the previous quest
    /// completed.
    pub fn is_previous_quest_complete(&self) -> bool {
        self.previous.as_ref().is_some_and(|q| q.is_completed)
    }

    /// The previous quest's rewards, for the caller to apply. Empty before
    /// the first quest transition. Does not mutate store state.
    pub fn rewards_to_trigger(&self) -> &[Reward] {
        self.previous
            .as_ref()
            .map(|q| q.rewards.as_slice())
            .unwrap_or(&[])
    }

    /// Remember a collected item so the caller can clear its inventory
    /// display after the quest transition.
    pub fn collect_item(&mut self, item: QuestItem) {
        self.collected_items.push(item);
    }

    pub fn take_collected_items(&mut self) -> Vec<QuestItem> {
        std::mem::take(&mut self.collected_items)
    }

    pub fn active_quest(&self) -> Option<&Quest> {
        self.active.as_ref()
    }

    /// Current position in the quest sequence being served.
    pub fn current_index(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use npchat_domain::{Objective, ObjectiveId, QuestId};

    use crate::infrastructure::ports::MockQuestRepo;

    use super::*;

    const NPC: NpcId = NpcId::new(1);

    fn quest(id: i64, objective_id: i64) -> Quest {
        Quest::new(QuestId::new(id), NPC, format!("quest-{id}"), "desc").with_objectives(vec![
            Objective::new(ObjectiveId::new(objective_id), "find it", "somewhere"),
        ])
    }

    fn progression_with_quests(quests: Vec<Quest>) -> QuestProgression {
        let mut repo = MockQuestRepo::new();
        repo.expect_list_for_npc()
            .returning(move |_| Ok(quests.clone()));
        repo.expect_set_completed().returning(|_, _| Ok(()));
        QuestProgression::new(Arc::new(QuestCatalog::new(Arc::new(repo))))
    }

    #[tokio::test]
    async fn first_call_activates_the_first_quest() {
        let mut progression = progression_with_quests(vec![quest(10, 1), quest(20, 2)]);
        progression.initialize_for_npc(NPC).await.unwrap();

        let active = progression.next_quest(NPC).await.unwrap().unwrap();
        assert_eq!(active.id, QuestId::new(10));
        assert_eq!(progression.current_index(), 0);
    }

    #[tokio::test]
    async fn open_active_quest_blocks_advancement() {
        let mut progression = progression_with_quests(vec![quest(10, 1), quest(20, 2)]);
        progression.initialize_for_npc(NPC).await.unwrap();

        progression.next_quest(NPC).await.unwrap();
        assert!(progression.next_quest(NPC).await.unwrap().is_none());
        assert_eq!(progression.current_index(), 0);
    }

    #[tokio::test]
    async fn completing_all_objectives_advances_and_persists() {
        let mut repo = MockQuestRepo::new();
        let quests = vec![quest(10, 1), quest(20, 2)];
        repo.expect_list_for_npc()
            .returning(move |_| Ok(quests.clone()));
        repo.expect_set_completed()
            .withf(|quest_id, npc_id| *quest_id == QuestId::new(10) && *npc_id == NPC)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut progression =
            QuestProgression::new(Arc::new(QuestCatalog::new(Arc::new(repo))));
        progression.initialize_for_npc(NPC).await.unwrap();
        progression.next_quest(NPC).await.unwrap();

        let item = QuestItem {
            id: ObjectiveId::new(1),
            name: "pearl".to_string(),
        };
        assert!(progression.complete_objective(&item));

        let next = progression.next_quest(NPC).await.unwrap().unwrap();
        assert_eq!(next.id, QuestId::new(20));
        assert_eq!(progression.current_index(), 1);
    }

    #[tokio::test]
    async fn cursor_never_decreases_across_calls() {
        let mut progression = progression_with_quests(vec![quest(10, 1), quest(20, 2)]);
        progression.initialize_for_npc(NPC).await.unwrap();

        let mut max_seen = 0;
        progression.next_quest(NPC).await.unwrap();
        for round in 0..4 {
            if round == 1 {
                let item = QuestItem {
                    id: ObjectiveId::new(1),
                    name: "pearl".to_string(),
                };
                progression.complete_objective(&item);
            }
            progression.next_quest(NPC).await.unwrap();
            assert!(progression.current_index() >= max_seen);
            max_seen = progression.current_index();
        }
    }

    #[tokio::test]
    async fn exhausted_sequence_returns_none() {
        let mut progression = progression_with_quests(vec![quest(10, 1)]);
        progression.initialize_for_npc(NPC).await.unwrap();
        progression.next_quest(NPC).await.unwrap();

        let item = QuestItem {
            id: ObjectiveId::new(1),
            name: "pearl".to_string(),
        };
        progression.complete_objective(&item);

        assert!(progression.next_quest(NPC).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn previous_quest_is_complete_only_after_a_transition() {
        let mut progression = progression_with_quests(vec![quest(10, 1), quest(20, 2)]);
        progression.initialize_for_npc(NPC).await.unwrap();

        assert!(!progression.is_previous_quest_complete());
        assert!(progression.rewards_to_trigger().is_empty());

        progression.next_quest(NPC).await.unwrap();
        assert!(!progression.is_previous_quest_complete());

        let item = QuestItem {
            id: ObjectiveId::new(1),
            name: "pearl".to_string(),
        };
        progression.complete_objective(&item);
        progression.next_quest(NPC).await.unwrap();

        assert!(progression.is_previous_quest_complete());
    }

    #[tokio::test]
    async fn cursor_is_restored_per_npc_across_initializations() {
        let mut repo = MockQuestRepo::new();
        let quests = vec![quest(10, 1), quest(20, 2)];
        repo.expect_list_for_npc()
            .returning(move |_| Ok(quests.clone()));
        repo.expect_set_completed().returning(|_, _| Ok(()));

        let mut progression =
            QuestProgression::new(Arc::new(QuestCatalog::new(Arc::new(repo))));
        progression.initialize_for_npc(NPC).await.unwrap();
        progression.next_quest(NPC).await.unwrap();
        let item = QuestItem {
            id: ObjectiveId::new(1),
            name: "pearl".to_string(),
        };
        progression.complete_objective(&item);
        progression.next_quest(NPC).await.unwrap();
        assert_eq!(progression.current_index(), 1);

        // Re-entering the same NPC's interaction restores the advanced cursor.
        progression.initialize_for_npc(NPC).await.unwrap();
        assert_eq!(progression.current_index(), 1);

        // A different NPC starts from the beginning.
        progression.initialize_for_npc(NpcId::new(2)).await.unwrap();
        assert_eq!(progression.current_index(), 0);
    }

    #[tokio::test]
    async fn objective_completion_without_active_quest_is_ignored() {
        let mut progression = progression_with_quests(vec![quest(10, 1)]);
        progression.initialize_for_npc(NPC).await.unwrap();

        let item = QuestItem {
            id: ObjectiveId::new(1),
            name: "pearl".to_string(),
        };
        assert!(!progression.complete_objective(&item));
    }

    #[tokio::test]
    async fn collected_items_are_drained_once() {
        let mut progression = progression_with_quests(vec![quest(10, 1)]);
        progression.collect_item(QuestItem {
            id: ObjectiveId::new(1),
            name: "pearl".to_string(),
        });

        assert_eq!(progression.take_collected_items().len(), 1);
        assert!(progression.take_collected_items().is_empty());
    }
}
