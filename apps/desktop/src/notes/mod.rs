//! Board notes sources.

mod directory;

pub use directory::DirectoryNotes;

use std::collections::HashMap;

/// Provides the notes text of a board.
pub trait NoteSource {
    /// Concatenated notes of `board_id`, or empty text when the board has none.
    fn all_notes_for_board(&self, board_id: &str) -> String;
}

/// In-memory notes, keyed by board id.
#[derive(Debug, Clone, Default)]
pub struct StaticNotes {
    boards: HashMap<String, String>,
}

impl StaticNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(mut self, board_id: impl Into<String>, notes: impl Into<String>) -> Self {
        self.insert(board_id, notes);
        self
    }

    pub fn insert(&mut self, board_id: impl Into<String>, notes: impl Into<String>) {
        self.boards.insert(board_id.into(), notes.into());
    }
}

impl NoteSource for StaticNotes {
    fn all_notes_for_board(&self, board_id: &str) -> String {
        self.boards.get(board_id).cloned().unwrap_or_default()
    }
}
