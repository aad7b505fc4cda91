//! Dialogue history entries.

use serde::{Deserialize, Serialize};

use crate::ids::NpcId;

/// One row of the append-only dialogue log.
///
/// Exactly one side is populated per entry: an NPC line has text in
/// `dialogue`, a player message has empty `dialogue` and text in
/// `player_message`. Insertion order is conversation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueEntry {
    pub npc_id: NpcId,
    pub dialogue: String,
    pub player_message: Option<String>,
}

impl DialogueEntry {
    /// An NPC-spoken line.
    pub fn npc_line(npc_id: NpcId, text: impl Into<String>) -> Self {
        Self {
            npc_id,
            dialogue: text.into(),
            player_message: None,
        }
    }

    /// A player message addressed to the NPC.
    pub fn player(npc_id: NpcId, text: impl Into<String>) -> Self {
        Self {
            npc_id,
            dialogue: String::new(),
            player_message: Some(text.into()),
        }
    }

    pub fn is_player_message(&self) -> bool {
        self.player_message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npc_line_has_no_player_side() {
        let entry = DialogueEntry::npc_line(NpcId::new(1), "Ahoy!");
        assert_eq!(entry.dialogue, "Ahoy!");
        assert!(!entry.is_player_message());
    }

    #[test]
    fn player_entry_has_empty_dialogue() {
        let entry = DialogueEntry::player(NpcId::new(1), "Hello");
        assert!(entry.dialogue.is_empty());
        assert_eq!(entry.player_message.as_deref(), Some("Hello"));
        assert!(entry.is_player_message());
    }
}
