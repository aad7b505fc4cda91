//! NPChat domain model.
//!
//! Core types for the NPC dialogue and quest progression engine:
//! NPC identity records, dialogue history entries, quests with their
//! objectives and rewards, and the typed ids that key them.
//!
//! This crate is persistence-agnostic: storage and LLM access live in
//! `npchat-engine` behind port traits.

pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    objectives_from_blob, objectives_to_blob, rewards_from_blob, rewards_to_blob, DialogueEntry,
    NpcRecord, Objective, Quest, QuestItem, Reward, BLOB_SCHEMA_VERSION,
};
pub use error::DomainError;
pub use ids::{NpcId, ObjectiveId, QuestId};
