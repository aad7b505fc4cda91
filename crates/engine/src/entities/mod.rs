//! Entity modules wrapping repository operations.

mod dialogue;
mod npc;
mod quest;

pub use dialogue::DialogueLog;
pub use npc::Npc;
pub use quest::QuestCatalog;
