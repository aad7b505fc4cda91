//! NPC identity record.

use serde::{Deserialize, Serialize};

use crate::ids::NpcId;

/// A persistent NPC identity.
///
/// The store keeps the identity columns (name, species, characteristics);
/// introduction lines come from the game's asset data and are written into
/// dialogue history on first interaction rather than stored on the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcRecord {
    pub id: NpcId,
    pub name: String,
    pub species: String,
    /// Free-text personality summary woven into the system prompt.
    pub characteristics: String,
    /// Ordered opening lines, shown and persisted on first interaction.
    #[serde(default)]
    pub introductions: Vec<String>,
}

impl NpcRecord {
    pub fn new(
        id: NpcId,
        name: impl Into<String>,
        species: impl Into<String>,
        characteristics: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            species: species.into(),
            characteristics: characteristics.into(),
            introductions: Vec::new(),
        }
    }

    pub fn with_introductions(mut self, lines: Vec<String>) -> Self {
        self.introductions = lines;
        self
    }
}
