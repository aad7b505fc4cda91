//! Conversation flow: prompt composition, the chat completion exchange,
//! and reply chunking.

mod chunking;
mod process_message;
mod prompt;

pub use chunking::{split_reply, MAX_WORDS_PER_CHUNK};
pub use process_message::{ProcessMessageError, ProcessPlayerMessage};
pub use prompt::{build_system_prompt, PromptComposer, PromptError};
