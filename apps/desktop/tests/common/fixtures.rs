//! Notes fixtures.

use flashcard_core::Flashcard;
use study_desktop_lib::notes::StaticNotes;

pub const RUST_BOARD: &str = "rust";
pub const EMPTY_BOARD: &str = "empty";
pub const BLANK_BOARD: &str = "blank";
pub const MISSING_BOARD: &str = "missing";

pub const RUST_NOTES: &str = "\
# Ownership
Every value has a single owner.

Borrow: a reference that does not take ownership
Crate: a compilation unit
";

pub fn boards() -> StaticNotes {
    StaticNotes::new()
        .with_board(RUST_BOARD, RUST_NOTES)
        .with_board(EMPTY_BOARD, "")
        .with_board(BLANK_BOARD, "  \n\t \n")
}

pub fn remote_cards() -> Vec<Flashcard> {
    vec![
        Flashcard::new("What does the borrow checker enforce?", "Aliasing XOR mutation."),
        Flashcard::new("What is a trait?", "Shared behavior."),
    ]
}
