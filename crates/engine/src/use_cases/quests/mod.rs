//! Quest progression.

mod progression;

pub use progression::QuestProgression;
