//! Dialogue response pipeline.
//!
//! Turns the stored conversation state into a chat completion request,
//! splits the reply into display chunks, and persists each chunk. Nothing
//! is persisted when the external call fails.

use std::sync::Arc;
use std::time::Instant;

use npchat_domain::NpcId;

use crate::entities::DialogueLog;
use crate::infrastructure::ports::{ChatMessage, ChatRequest, LlmError, LlmPort, RepoError};

use super::chunking::{split_reply, MAX_WORDS_PER_CHUNK};
use super::prompt::{PromptComposer, PromptError};

pub struct ProcessPlayerMessage {
    dialogue: Arc<DialogueLog>,
    composer: PromptComposer,
    /// Absent when no API credential is configured; every call then fails
    /// fast without touching the store.
    llm: Option<Arc<dyn LlmPort>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessMessageError {
    #[error("No API key configured; the dialogue pipeline is disabled")]
    MissingApiKey,
    #[error("NPC not found")]
    NpcNotFound,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<PromptError> for ProcessMessageError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::NpcNotFound => Self::NpcNotFound,
            PromptError::Repo(e) => Self::Repo(e),
        }
    }
}

impl ProcessPlayerMessage {
    pub fn new(
        dialogue: Arc<DialogueLog>,
        composer: PromptComposer,
        llm: Option<Arc<dyn LlmPort>>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            dialogue,
            composer,
            llm,
            temperature,
            max_tokens,
        }
    }

    /// Respond to the NPC's most recent player message.
    ///
    /// Returns the reply chunks in display order; each chunk has already
    /// been appended to the NPC's dialogue history.
    pub async fn execute(&self, npc_id: NpcId) -> Result<Vec<String>, ProcessMessageError> {
        let llm = self
            .llm
            .as_ref()
            .ok_or(ProcessMessageError::MissingApiKey)?;

        let started = Instant::now();
        let user_message = self.dialogue.last_player_message(npc_id).await?;
        let system_prompt = self.composer.compose(npc_id).await?;

        let request = ChatRequest::new(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ])
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens);

        let reply = llm.complete(request).await?;

        let chunks = split_reply(&reply, MAX_WORDS_PER_CHUNK);
        for chunk in &chunks {
            self.dialogue.record_npc_line(npc_id, chunk).await?;
        }

        tracing::debug!(
            npc_id = %npc_id,
            chunks = chunks.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat completion processed"
        );

        Ok(chunks)
    }
}
