//! Core flashcard library shared by the study applications.
//!
//! Provides:
//! - Shared types (Flashcard)
//! - An index-addressable flashcard list with a stable field table for UI binding
//! - Observer registration (`Signal`) used for change notifications
//! - Q/A markup parser for notes
//! - Local (offline) flashcard generator

pub mod error;
pub mod generator;
pub mod list;
pub mod parser;
pub mod signal;
pub mod types;

pub use error::{ParseError, Result};
pub use generator::{GeneratorOptions, LocalGenerator};
pub use list::{FieldEntry, FlashcardField, FlashcardList, ListEvent, FIELD_TABLE_VERSION};
pub use parser::parse;
pub use signal::{Signal, SubscriptionId};
pub use types::Flashcard;
