//! Port traits decoupling use cases from storage and the LLM service.

mod error;
mod external;
mod repos;

pub use error::{LlmError, RepoError};
pub use external::{ChatMessage, ChatRequest, LlmPort, MessageRole};
pub use repos::{DialogueRepo, NpcRepo, QuestRepo};

#[cfg(test)]
pub use external::MockLlmPort;
#[cfg(test)]
pub use repos::{MockDialogueRepo, MockNpcRepo, MockQuestRepo};
