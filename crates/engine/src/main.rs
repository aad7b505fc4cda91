//! NPChat Engine - terminal entry point.
//!
//! Wires the dialogue/quest core together and drives it from a small
//! line-oriented loop standing in for the game's UI layer.

use std::io::Write as _;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use npchat_domain::{NpcId, NpcRecord, Objective, ObjectiveId, Quest, QuestId, QuestItem, Reward};
use npchat_engine::infrastructure::openai::OpenAiClient;
use npchat_engine::infrastructure::persistence::SqliteStore;
use npchat_engine::infrastructure::ports::LlmPort;
use npchat_engine::infrastructure::settings::EngineSettings;
use npchat_engine::use_cases::interaction::InteractionOutcome;
use npchat_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npchat_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NPChat Engine");

    let settings = EngineSettings::from_env();
    let llm: Option<Arc<dyn LlmPort>> = match &settings.api_key {
        Some(key) => Some(Arc::new(OpenAiClient::new(
            &settings.api_base_url,
            key,
            &settings.model,
        ))),
        None => {
            tracing::error!("OPENAI_API_KEY is not set; the dialogue pipeline is disabled");
            None
        }
    };

    let store = SqliteStore::open(&settings.db_path).await?;
    let mut app = App::new(&store, llm, &settings);

    let world = demo_world();
    run_loop(&mut app, &world).await
}

async fn run_loop(app: &mut App, world: &[(NpcRecord, Vec<Quest>)]) -> anyhow::Result<()> {
    println!("Surf and Turf - talk to an NPC.");
    println!("Commands: /talk <npc id>, /collect <objective id>, /history, /quit");

    let mut current: Option<usize> = None;
    let stdin = std::io::stdin();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input == "/quit" {
            return Ok(());
        } else if let Some(id) = input.strip_prefix("/talk ") {
            let Ok(id) = id.trim().parse::<i64>() else {
                println!("NPC ids are numeric.");
                continue;
            };
            let Some(index) = world.iter().position(|(npc, _)| npc.id == NpcId::new(id)) else {
                println!("No NPC with id {id} here.");
                continue;
            };

            let (npc, quests) = &world[index];
            match app.session.start(npc, quests).await? {
                InteractionOutcome::Introduction { lines, active_quest } => {
                    for line in lines {
                        println!("[{}] {line}", npc.name);
                    }
                    if let Some(quest) = active_quest {
                        println!("New quest: {}: {}", quest.name, quest.description);
                    }
                }
                InteractionOutcome::QuestComplete {
                    greeting,
                    rewards,
                    next_quest,
                } => {
                    println!("[{}] {greeting}", npc.name);
                    for reward in rewards {
                        println!("Gained {} XP.", reward.experience_points);
                    }
                    println!("New quest: {}: {}", next_quest.name, next_quest.description);
                }
                InteractionOutcome::WelcomeBack { greeting } => {
                    println!("[{}] {greeting}", npc.name);
                }
            }
            current = Some(index);
        } else if input == "/history" {
            let Some(index) = current else {
                println!("Talk to someone first: /talk <npc id>");
                continue;
            };
            let (npc, _) = &world[index];
            for line in app.dialogue.npc_lines(npc.id).await? {
                println!("[{}] {line}", npc.name);
            }
            for message in app.dialogue.player_messages(npc.id).await? {
                println!("[you] {message}");
            }
        } else if let Some(id) = input.strip_prefix("/collect ") {
            let Ok(id) = id.trim().parse::<i64>() else {
                println!("Objective ids are numeric.");
                continue;
            };
            let item = QuestItem {
                id: ObjectiveId::new(id),
                name: format!("item-{id}"),
            };
            if app.session.collect_item(item) {
                println!("Objective complete!");
            } else {
                println!("Nothing here needs that.");
            }
        } else if let Some(index) = current {
            let (npc, _) = &world[index];
            app.dialogue.record_player_message(npc.id, input).await?;
            match app.pipeline.execute(npc.id).await {
                Ok(chunks) => {
                    for chunk in chunks {
                        println!("[{}] {chunk}", npc.name);
                    }
                }
                Err(e) => println!("({e})"),
            }
        } else {
            println!("Talk to someone first: /talk <npc id>");
        }
    }
}

/// Demo NPCs and quest chains, in place of the game's asset data.
fn demo_world() -> Vec<(NpcRecord, Vec<Quest>)> {
    let shelly = NpcRecord::new(NpcId::new(1), "Shelly", "turtle", "wise")
        .with_introductions(vec![
            "Ah, a visitor to my cove.".to_string(),
            "The tides bring all sorts of travelers these days.".to_string(),
        ]);
    let shelly_quests = vec![
        Quest::new(QuestId::new(10), NpcId::new(1), "Pearl Hunt", "Find the lost pearl on the beach")
            .with_objectives(vec![Objective::new(
                ObjectiveId::new(1),
                "Lost pearl",
                "Somewhere along the shoreline",
            )])
            .with_rewards(vec![Reward::new(50, "Shelly once dove the deep reef for pearls herself.")]),
        Quest::new(QuestId::new(20), NpcId::new(1), "Kelp Delivery", "Bring fresh kelp from the shallows")
            .with_objectives(vec![Objective::new(
                ObjectiveId::new(2),
                "Fresh kelp",
                "Growing in the shallows",
            )])
            .with_rewards(vec![Reward::new(75, "Shelly brews a famous kelp tea.")]),
    ];

    let finn = NpcRecord::new(NpcId::new(2), "Finn", "fish", "nervous")
        .with_introductions(vec!["Oh! You startled me.".to_string()]);
    let finn_quests = vec![Quest::new(
        QuestId::new(30),
        NpcId::new(2),
        "Shiny Shell",
        "Find a shell to calm Finn's nerves",
    )
    .with_objectives(vec![Objective::new(
        ObjectiveId::new(3),
        "Shiny shell",
        "Near the tide pools",
    )])
    .with_rewards(vec![Reward::new(25, "Finn collects shells to feel safe.")])];

    vec![(shelly, shelly_quests), (finn, finn_quests)]
}
