//! AI assistant collaborator.
//!
//! Clients run requests asynchronously and report completions as [`AiEvent`]s
//! through an [`AiEventSink`]. The controller owns the receiving end and
//! applies events on the UI thread.

pub mod http;

pub use http::{AiError, AiSettings, HttpAiClient};

use flashcard_core::Flashcard;
use tokio::sync::mpsc;

/// Completion of a dispatched AI request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiEvent {
    FlashcardsReady(Vec<Flashcard>),
    AnswerReady(String),
    Error(String),
}

/// Sending half of the completion channel handed to an [`AiClient`].
#[derive(Debug, Clone)]
pub struct AiEventSink {
    tx: mpsc::UnboundedSender<AiEvent>,
}

impl AiEventSink {
    /// Deliver a completion. Dropped silently once the controller is gone.
    pub fn emit(&self, event: AiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("AI completion dropped, controller no longer listening");
        }
    }
}

pub(crate) fn channel() -> (AiEventSink, mpsc::UnboundedReceiver<AiEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AiEventSink { tx }, rx)
}

/// Remote flashcard generation and question answering.
///
/// Every `request_flashcards` call must eventually emit exactly one of
/// `FlashcardsReady` or `Error`; every `request_answer` call exactly one of
/// `AnswerReady` or `Error`. That guarantee starts at `connect`: a client
/// has nowhere to report to before it, so earlier requests are dropped.
pub trait AiClient {
    /// Attach the sink completions are delivered to. Must be called before
    /// any request; [`crate::controller::StudyController::new`] does this.
    fn connect(&mut self, sink: AiEventSink);

    fn request_flashcards(&mut self, notes: &str);

    fn request_answer(&mut self, context: &str, question: &str);

    /// Override the configured endpoint. An empty url restores the default.
    fn set_endpoint_override(&mut self, url: &str);

    /// Override the configured API key. An empty key restores the default.
    fn set_api_key_override(&mut self, key: &str);
}
