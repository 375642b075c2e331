//! Read-only, index-addressable flashcard list for UI binding layers.
//!
//! Binding frameworks look fields up by a numeric id or a symbolic name, so
//! the list publishes a fixed field table alongside per-index accessors.
//! Every accessor tolerates speculative out-of-range probes.

use crate::signal::{Signal, SubscriptionId};
use crate::types::Flashcard;
use std::fmt;

/// Version of the field table. Bumped whenever a field is added.
pub const FIELD_TABLE_VERSION: u32 = 1;

/// Field identifiers exposed to the binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FlashcardField {
    Question = 1,
    Answer = 2,
}

impl FlashcardField {
    pub const ALL: [Self; 2] = [Self::Question, Self::Answer];

    /// Numeric id used for role-based lookup.
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Question),
            2 => Some(Self::Answer),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        FIELDS
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.field)
    }

    /// Read this field from a card.
    pub fn read(self, card: &Flashcard) -> &str {
        (self.entry().accessor)(card)
    }

    fn entry(self) -> &'static FieldEntry {
        match self {
            Self::Question => &FIELDS[0],
            Self::Answer => &FIELDS[1],
        }
    }
}

/// One row of the field table.
pub struct FieldEntry {
    pub field: FlashcardField,
    pub name: &'static str,
    pub accessor: fn(&Flashcard) -> &str,
}

impl fmt::Debug for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("field", &self.field)
            .field("name", &self.name)
            .finish()
    }
}

static FIELDS: [FieldEntry; 2] = [
    FieldEntry {
        field: FlashcardField::Question,
        name: "question",
        accessor: question_of,
    },
    FieldEntry {
        field: FlashcardField::Answer,
        name: "answer",
        accessor: answer_of,
    },
];

fn question_of(card: &Flashcard) -> &str {
    &card.question
}

fn answer_of(card: &Flashcard) -> &str {
    &card.answer
}

/// Change notification fired after the list contents are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// The whole sequence was replaced.
    Reset,
    /// The number of cards differs from before the reset.
    CountChanged(usize),
}

/// Ordered flashcard sequence. Insertion order is display order.
///
/// Contents are only ever replaced wholesale via [`FlashcardList::replace_all`].
#[derive(Debug, Default)]
pub struct FlashcardList {
    cards: Vec<Flashcard>,
    changed: Signal<ListEvent>,
}

impl FlashcardList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stable field table. Never changes for the lifetime of the process.
    pub fn fields() -> &'static [FieldEntry] {
        &FIELDS
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Flashcard> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flashcard> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[Flashcard] {
        &self.cards
    }

    /// Field text at `index`, or an empty string when the index is out of range.
    pub fn field_at(&self, index: i64, field: FlashcardField) -> &str {
        self.card_at(index).map(|card| field.read(card)).unwrap_or("")
    }

    pub fn question_at(&self, index: i64) -> &str {
        self.field_at(index, FlashcardField::Question)
    }

    pub fn answer_at(&self, index: i64) -> &str {
        self.field_at(index, FlashcardField::Answer)
    }

    /// Role-based lookup: `None` for an unknown field id or an out-of-range index.
    pub fn data(&self, index: i64, field_id: u32) -> Option<&str> {
        let field = FlashcardField::from_id(field_id)?;
        self.card_at(index).map(|card| field.read(card))
    }

    /// Swap in a new sequence, then notify observers.
    ///
    /// Emits one `Reset`, followed by one `CountChanged` only when the count differs.
    pub fn replace_all(&mut self, cards: Vec<Flashcard>) {
        let previous = self.cards.len();
        self.cards = cards;
        let current = self.cards.len();

        self.changed.emit(&ListEvent::Reset);
        if previous != current {
            self.changed.emit(&ListEvent::CountChanged(current));
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ListEvent) + 'static,
    {
        self.changed.connect(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.disconnect(id)
    }

    fn card_at(&self, index: i64) -> Option<&Flashcard> {
        usize::try_from(index).ok().and_then(|i| self.cards.get(i))
    }
}
