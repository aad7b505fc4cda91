//! Interaction session: what happens when the player walks up to an NPC.

mod session;

pub use session::{InteractionOutcome, InteractionSession};
