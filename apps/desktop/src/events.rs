//! Notifications published by the study controller.

/// Property-change and error notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyEvent {
    BusyChanged(bool),
    UseLocalFlashcardsChanged(bool),
    LastAiAnswerChanged(String),
    /// The flashcard list was replaced; carries the new count.
    FlashcardsChanged(usize),
    Error(String),
}
