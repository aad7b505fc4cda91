//! Domain entities.

mod dialogue;
mod npc;
mod quest;

pub use dialogue::DialogueEntry;
pub use npc::NpcRecord;
pub use quest::{
    objectives_from_blob, objectives_to_blob, rewards_from_blob, rewards_to_blob, Objective,
    Quest, QuestItem, Reward, BLOB_SCHEMA_VERSION,
};
