//! Study controller: routes flashcard generation and questions to the local
//! generator or the AI client and tracks busy/answer/error state for the UI.
//!
//! The controller lives on the UI thread. AI completions arrive through a
//! channel and are applied by [`StudyController::process_ai_events`] or
//! [`StudyController::wait_for_ai_event`].

use std::sync::Arc;

use flashcard_core::{Flashcard, FlashcardList, ListEvent, LocalGenerator, Signal, SubscriptionId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::ai::{self, AiClient, AiEvent};
use crate::error::StudyError;
use crate::events::StudyEvent;
use crate::notes::NoteSource;

/// Answer stored when a question is asked without an AI client.
pub const NO_AI_CLIENT_ANSWER: &str = "AI client not configured.";

pub struct StudyController {
    notes: Option<Arc<dyn NoteSource>>,
    ai: Option<Box<dyn AiClient>>,
    generator: LocalGenerator,
    flashcards: FlashcardList,
    use_local_flashcards: bool,
    is_busy: bool,
    last_ai_answer: String,
    events: Signal<StudyEvent>,
    ai_events: mpsc::UnboundedReceiver<AiEvent>,
}

impl StudyController {
    /// Create a controller. A present AI client is connected to the
    /// controller's completion channel.
    pub fn new(notes: Option<Arc<dyn NoteSource>>, mut ai: Option<Box<dyn AiClient>>) -> Self {
        let (sink, ai_events) = ai::channel();
        if let Some(client) = ai.as_mut() {
            client.connect(sink);
        }

        Self {
            notes,
            ai,
            generator: LocalGenerator::default(),
            flashcards: FlashcardList::new(),
            use_local_flashcards: false,
            is_busy: false,
            last_ai_answer: String::new(),
            events: Signal::new(),
            ai_events,
        }
    }

    pub fn with_generator(mut self, generator: LocalGenerator) -> Self {
        self.generator = generator;
        self
    }

    // === Observable state ===

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn use_local_flashcards(&self) -> bool {
        self.use_local_flashcards
    }

    pub fn last_ai_answer(&self) -> &str {
        &self.last_ai_answer
    }

    pub fn has_ai_client(&self) -> bool {
        self.ai.is_some()
    }

    pub fn flashcards(&self) -> &FlashcardList {
        &self.flashcards
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StudyEvent) + 'static,
    {
        self.events.connect(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.disconnect(id)
    }

    /// Observe list-level resets and count changes.
    pub fn subscribe_flashcards<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ListEvent) + 'static,
    {
        self.flashcards.subscribe(observer)
    }

    pub fn unsubscribe_flashcards(&mut self, id: SubscriptionId) -> bool {
        self.flashcards.unsubscribe(id)
    }

    // === Actions ===

    pub fn set_use_local_flashcards(&mut self, use_local: bool) {
        if self.use_local_flashcards == use_local {
            return;
        }
        self.use_local_flashcards = use_local;
        self.events
            .emit(&StudyEvent::UseLocalFlashcardsChanged(use_local));
    }

    /// Generate flashcards from a board's notes.
    ///
    /// Local generation completes before this returns; an AI request leaves
    /// the controller busy until its completion is processed.
    pub fn generate_flashcards_for_board(&mut self, board_id: &str) {
        let Some(notes) = self.board_notes(board_id) else {
            self.report(StudyError::NotesUnavailable);
            return;
        };

        info!(board_id, notes_len = notes.len(), "generating flashcards");
        if notes.trim().is_empty() {
            self.report(StudyError::NoNotes);
            return;
        }

        self.set_busy(true);

        if !self.use_local_flashcards {
            if let Some(client) = self.ai.as_mut() {
                info!(board_id, "requesting flashcards from AI client");
                client.request_flashcards(&notes);
                return;
            }
        }

        debug!(
            board_id,
            forced = self.use_local_flashcards,
            "using local flashcard generator"
        );
        let cards = self.generator.generate_from_text(&notes);
        self.handle_flashcards_ready(cards);
    }

    /// Ask a free-text question about a board's notes.
    pub fn ask_ai_about_board(&mut self, board_id: &str, question: &str) {
        if question.trim().is_empty() {
            self.report(StudyError::EmptyQuestion);
            return;
        }

        let Some(context) = self.board_notes(board_id) else {
            self.report(StudyError::NotesUnavailable);
            return;
        };

        info!(board_id, context_len = context.len(), "asking AI about board");
        if context.trim().is_empty() {
            self.report(StudyError::NoNotes);
            return;
        }

        self.set_busy(true);

        match self.ai.as_mut() {
            Some(client) => client.request_answer(&context, question),
            None => self.handle_answer_ready(NO_AI_CLIENT_ANSWER.to_string()),
        }
    }

    pub fn set_ai_endpoint(&mut self, url: &str) {
        if let Some(client) = self.ai.as_mut() {
            client.set_endpoint_override(url);
        }
    }

    pub fn set_ai_api_key(&mut self, key: &str) {
        if let Some(client) = self.ai.as_mut() {
            client.set_api_key_override(key);
        }
    }

    // === AI completions ===

    /// Apply all completions that have already arrived. Never blocks.
    pub fn process_ai_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.ai_events.try_recv() {
            self.handle_ai_event(event);
            processed += 1;
        }
        processed
    }

    /// Wait for the next completion and apply it.
    ///
    /// Returns false when no completion can ever arrive (no AI client, or the
    /// client dropped its sink). Only await this while a request is in flight.
    pub async fn wait_for_ai_event(&mut self) -> bool {
        match self.ai_events.recv().await {
            Some(event) => {
                self.handle_ai_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_ai_event(&mut self, event: AiEvent) {
        match event {
            AiEvent::FlashcardsReady(cards) => self.handle_flashcards_ready(cards),
            AiEvent::AnswerReady(answer) => self.handle_answer_ready(answer),
            AiEvent::Error(message) => self.handle_ai_error(message),
        }
    }

    fn handle_flashcards_ready(&mut self, cards: Vec<Flashcard>) {
        debug!(count = cards.len(), "flashcards ready");
        let count = cards.len();
        self.flashcards.replace_all(cards);
        self.events.emit(&StudyEvent::FlashcardsChanged(count));
        self.set_busy(false);
    }

    fn handle_answer_ready(&mut self, answer: String) {
        debug!(answer_len = answer.len(), "answer ready");
        self.last_ai_answer = answer;
        self.events
            .emit(&StudyEvent::LastAiAnswerChanged(self.last_ai_answer.clone()));
        self.set_busy(false);
    }

    fn handle_ai_error(&mut self, message: String) {
        self.report(StudyError::Remote(message));
        self.set_busy(false);
    }

    // === Helpers ===

    /// `None` when no notes source is configured.
    fn board_notes(&self, board_id: &str) -> Option<String> {
        self.notes
            .as_ref()
            .map(|source| source.all_notes_for_board(board_id))
    }

    fn set_busy(&mut self, busy: bool) {
        if self.is_busy == busy {
            return;
        }
        self.is_busy = busy;
        self.events.emit(&StudyEvent::BusyChanged(busy));
    }

    fn report(&mut self, error: StudyError) {
        warn!(%error, "study request failed");
        self.events.emit(&StudyEvent::Error(error.to_string()));
    }
}
