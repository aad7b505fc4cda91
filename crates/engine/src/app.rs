//! Application composition.
//!
//! Builds the repositories, entities, and use cases and wires them together
//! by constructor injection. Everything the UI layer needs hangs off `App`.

use std::sync::Arc;

use crate::entities::{DialogueLog, Npc, QuestCatalog};
use crate::infrastructure::persistence::{
    SqliteDialogueRepo, SqliteNpcRepo, SqliteQuestRepo, SqliteStore,
};
use crate::infrastructure::ports::LlmPort;
use crate::infrastructure::settings::EngineSettings;
use crate::use_cases::conversation::{ProcessPlayerMessage, PromptComposer};
use crate::use_cases::interaction::InteractionSession;
use crate::use_cases::quests::QuestProgression;

pub struct App {
    pub npcs: Arc<Npc>,
    pub dialogue: Arc<DialogueLog>,
    pub quests: Arc<QuestCatalog>,
    pub session: InteractionSession,
    pub pipeline: ProcessPlayerMessage,
}

impl App {
    pub fn new(store: &SqliteStore, llm: Option<Arc<dyn LlmPort>>, settings: &EngineSettings) -> Self {
        let npcs = Arc::new(Npc::new(Arc::new(SqliteNpcRepo::new(store))));
        let dialogue = Arc::new(DialogueLog::new(Arc::new(SqliteDialogueRepo::new(store))));
        let quests = Arc::new(QuestCatalog::new(Arc::new(SqliteQuestRepo::new(store))));

        let session = InteractionSession::new(
            npcs.clone(),
            dialogue.clone(),
            quests.clone(),
            QuestProgression::new(quests.clone()),
        );

        let composer = PromptComposer::new(npcs.clone(), dialogue.clone(), quests.clone());
        let pipeline = ProcessPlayerMessage::new(
            dialogue.clone(),
            composer,
            llm,
            settings.temperature,
            settings.max_tokens,
        );

        Self {
            npcs,
            dialogue,
            quests,
            session,
            pipeline,
        }
    }
}
