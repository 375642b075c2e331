//! Errors surfaced to the UI through the controller's error notification.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudyError {
    #[error("Board manager unavailable.")]
    NotesUnavailable,

    #[error("This board has no notes.")]
    NoNotes,

    #[error("Please enter a question.")]
    EmptyQuestion,

    /// Opaque failure reported by the AI client.
    #[error("{0}")]
    Remote(String),
}
