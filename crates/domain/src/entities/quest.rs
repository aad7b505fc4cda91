//! Quests, objectives, and rewards.
//!
//! A quest belongs to exactly one NPC and is completed by fulfilling all of
//! its objectives in any order. Objectives and rewards are stored inside the
//! quest row as versioned JSON blobs; the envelope format is defined here so
//! the storage layer and the domain agree on one schema.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{NpcId, ObjectiveId, QuestId};

/// Current version of the objectives/rewards blob envelope.
pub const BLOB_SCHEMA_VERSION: u32 = 1;

/// A quest owned by an NPC.
///
/// `is_completed` is the only field that changes after creation, and only
/// through the quest progression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub npc_id: NpcId,
    pub name: String,
    pub description: String,
    pub is_completed: bool,
    pub objectives: Vec<Objective>,
    pub rewards: Vec<Reward>,
}

/// An atomic completion condition within a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: ObjectiveId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

/// Granted when the owning quest completes. The lore line feeds back into
/// future system prompts once the quest is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub experience_points: u32,
    pub lore_description: String,
}

/// A collected item handed to the progression engine; its id matches the
/// objective it satisfies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestItem {
    pub id: ObjectiveId,
    pub name: String,
}

impl Quest {
    pub fn new(
        id: QuestId,
        npc_id: NpcId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            npc_id,
            name: name.into(),
            description: description.into(),
            is_completed: false,
            objectives: Vec::new(),
            rewards: Vec::new(),
        }
    }

    pub fn with_objectives(mut self, objectives: Vec<Objective>) -> Self {
        self.objectives = objectives;
        self
    }

    pub fn with_rewards(mut self, rewards: Vec<Reward>) -> Self {
        self.rewards = rewards;
        self
    }

    /// Mark the objective matching `objective_id` as completed.
    ///
    /// Returns true when an uncompleted objective was found and marked.
    /// Completion of the last open objective flips `is_completed`; the
    /// caller is responsible for persisting that change.
    pub fn complete_objective(&mut self, objective_id: ObjectiveId) -> bool {
        let Some(objective) = self
            .objectives
            .iter_mut()
            .find(|o| o.id == objective_id && !o.is_completed)
        else {
            return false;
        };
        objective.is_completed = true;

        if self.all_objectives_completed() {
            self.is_completed = true;
        }
        true
    }

    pub fn all_objectives_completed(&self) -> bool {
        self.objectives.iter().all(|o| o.is_completed)
    }
}

impl Objective {
    pub fn new(id: ObjectiveId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_completed: false,
        }
    }
}

impl Reward {
    pub fn new(experience_points: u32, lore_description: impl Into<String>) -> Self {
        Self {
            experience_points,
            lore_description: lore_description.into(),
        }
    }
}

// =============================================================================
// Blob envelope
// =============================================================================

/// Versioned envelope wrapping the objective/reward lists inside a quest row.
#[derive(Debug, Serialize, Deserialize)]
struct BlobEnvelope<T> {
    version: u32,
    items: Vec<T>,
}

fn to_blob<T: Serialize + Clone>(items: &[T]) -> Result<String, DomainError> {
    let envelope = BlobEnvelope {
        version: BLOB_SCHEMA_VERSION,
        items: items.to_vec(),
    };
    serde_json::to_string(&envelope).map_err(|e| DomainError::parse(e.to_string()))
}

fn from_blob<T: DeserializeOwned>(blob: &str) -> Result<Vec<T>, DomainError> {
    let envelope: BlobEnvelope<T> =
        serde_json::from_str(blob).map_err(|e| DomainError::parse(e.to_string()))?;
    if envelope.version != BLOB_SCHEMA_VERSION {
        return Err(DomainError::parse(format!(
            "unsupported blob schema version {}, expected {}",
            envelope.version, BLOB_SCHEMA_VERSION
        )));
    }
    Ok(envelope.items)
}

pub fn objectives_to_blob(objectives: &[Objective]) -> Result<String, DomainError> {
    to_blob(objectives)
}

pub fn objectives_from_blob(blob: &str) -> Result<Vec<Objective>, DomainError> {
    from_blob(blob)
}

pub fn rewards_to_blob(rewards: &[Reward]) -> Result<String, DomainError> {
    to_blob(rewards)
}

pub fn rewards_from_blob(blob: &str) -> Result<Vec<Reward>, DomainError> {
    from_blob(blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quest() -> Quest {
        Quest::new(QuestId::new(10), NpcId::new(1), "Pearl Hunt", "Find two pearls")
            .with_objectives(vec![
                Objective::new(ObjectiveId::new(1), "First pearl", "On the beach"),
                Objective::new(ObjectiveId::new(2), "Second pearl", "In the reef"),
            ])
            .with_rewards(vec![Reward::new(50, "Shelly once dove the reef herself.")])
    }

    #[test]
    fn completing_one_objective_does_not_complete_quest() {
        let mut quest = sample_quest();
        assert!(quest.complete_objective(ObjectiveId::new(1)));
        assert!(!quest.is_completed);
    }

    #[test]
    fn completing_all_objectives_completes_quest() {
        let mut quest = sample_quest();
        quest.complete_objective(ObjectiveId::new(1));
        quest.complete_objective(ObjectiveId::new(2));
        assert!(quest.is_completed);
    }

    #[test]
    fn completing_unknown_or_done_objective_returns_false() {
        let mut quest = sample_quest();
        assert!(!quest.complete_objective(ObjectiveId::new(99)));
        assert!(quest.complete_objective(ObjectiveId::new(1)));
        // Already completed, so a second match is not re-marked.
        assert!(!quest.complete_objective(ObjectiveId::new(1)));
    }

    #[test]
    fn quest_with_no_objectives_reports_all_completed() {
        let quest = Quest::new(QuestId::new(1), NpcId::new(1), "Empty", "No objectives");
        assert!(quest.all_objectives_completed());
    }

    #[test]
    fn blobs_round_trip_objectives_and_rewards() {
        let quest = sample_quest();

        let objectives = objectives_from_blob(&objectives_to_blob(&quest.objectives).unwrap())
            .unwrap();
        assert_eq!(objectives, quest.objectives);

        let rewards = rewards_from_blob(&rewards_to_blob(&quest.rewards).unwrap()).unwrap();
        assert_eq!(rewards, quest.rewards);
    }

    #[test]
    fn blob_with_unknown_version_is_rejected() {
        let blob = r#"{"version":2,"items":[]}"#;
        let err = objectives_from_blob(blob).unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }
}
