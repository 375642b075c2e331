//! Notes stored as plain files, one directory per board.
//!
//! ```text
//! <root>/
//!   rust/
//!     01-ownership.md
//!     02-traits.md
//!   biology/
//!     cells.txt
//! ```

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::NoteSource;

const NOTE_EXTENSIONS: &[&str] = &["md", "txt"];

#[derive(Debug, Clone)]
pub struct DirectoryNotes {
    root: PathBuf,
}

impl DirectoryNotes {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Board ids found under the root, sorted.
    pub fn boards(&self) -> io::Result<Vec<String>> {
        let mut boards = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                boards.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        boards.sort();
        Ok(boards)
    }

    /// Resolve a board id to its directory. Ids must be a single path segment.
    fn board_dir(&self, board_id: &str) -> Option<PathBuf> {
        let mut components = Path::new(board_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.root.join(board_id)),
            _ => None,
        }
    }

    fn read_board(dir: &Path) -> io::Result<String> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_note = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| NOTE_EXTENSIONS.contains(&ext));
            if is_note && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut notes = Vec::with_capacity(files.len());
        for path in files {
            // One unreadable file must not hide the rest of the board.
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable note file");
                    continue;
                }
            };
            let content = content.trim();
            if !content.is_empty() {
                notes.push(content.to_string());
            }
        }
        Ok(notes.join("\n\n"))
    }
}

impl NoteSource for DirectoryNotes {
    fn all_notes_for_board(&self, board_id: &str) -> String {
        let Some(dir) = self.board_dir(board_id) else {
            tracing::warn!(board_id, "rejected board id");
            return String::new();
        };

        if !dir.is_dir() {
            tracing::debug!(board_id, path = %dir.display(), "board directory not found");
            return String::new();
        }

        match Self::read_board(&dir) {
            Ok(notes) => notes,
            Err(e) => {
                tracing::warn!(board_id, error = %e, "failed to read board notes");
                String::new()
            }
        }
    }
}
