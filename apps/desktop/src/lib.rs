pub mod ai;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod notes;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Handle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::{AiClient, HttpAiClient};
use crate::cli::{Cli, Command};
use crate::config::StudyConfig;
use crate::controller::StudyController;
use crate::events::StudyEvent;
use crate::notes::{DirectoryNotes, NoteSource};

pub use crate::error::StudyError;

/// Drive a controller headlessly: one action, then wait until it settles.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = StudyConfig::from_env().context("invalid configuration")?;
    let notes_dir = cli.notes_dir.clone().unwrap_or_else(|| config.notes_dir.clone());
    let directory = DirectoryNotes::new(notes_dir);

    match &cli.command {
        Command::Boards => {
            let boards = directory.boards().with_context(|| {
                format!("failed to list boards in {}", directory.root().display())
            })?;
            for board in boards {
                println!("{}", board);
            }
        }
        Command::Generate { board } => {
            let mut controller = build_controller(&cli, config, directory);
            let errors = collect_errors(&mut controller);
            controller.generate_flashcards_for_board(board);
            settle(&mut controller, &errors).await?;

            for (i, card) in controller.flashcards().iter().enumerate() {
                println!("{}. Q: {}", i + 1, card.question);
                println!("   A: {}", card.answer);
            }
        }
        Command::Ask { board, question } => {
            let mut controller = build_controller(&cli, config, directory);
            let errors = collect_errors(&mut controller);
            controller.ask_ai_about_board(board, question);
            settle(&mut controller, &errors).await?;

            println!("{}", controller.last_ai_answer());
        }
    }

    Ok(())
}

fn build_controller(cli: &Cli, config: StudyConfig, directory: DirectoryNotes) -> StudyController {
    let notes: Arc<dyn NoteSource> = Arc::new(directory);
    let ai = config.ai.map(|settings| {
        Box::new(HttpAiClient::new(settings, Handle::current())) as Box<dyn AiClient>
    });

    let mut controller = StudyController::new(Some(notes), ai);
    controller.set_use_local_flashcards(cli.local || config.use_local_flashcards);
    if let Some(url) = &cli.endpoint {
        controller.set_ai_endpoint(url);
    }
    if let Some(key) = &cli.api_key {
        controller.set_ai_api_key(key);
    }
    controller
}

fn collect_errors(controller: &mut StudyController) -> Rc<RefCell<Vec<String>>> {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    controller.subscribe(move |event| {
        if let StudyEvent::Error(message) = event {
            sink.borrow_mut().push(message.clone());
        }
    });
    errors
}

/// Pump AI completions until the controller is idle, then surface the last error.
async fn settle(
    controller: &mut StudyController,
    errors: &Rc<RefCell<Vec<String>>>,
) -> anyhow::Result<()> {
    while controller.is_busy() {
        if !controller.wait_for_ai_event().await {
            break;
        }
    }

    let last_error = errors.borrow().last().cloned();
    match last_error {
        Some(message) => Err(anyhow::anyhow!(message)),
        None => Ok(()),
    }
}
