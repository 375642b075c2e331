//! Core types for the flashcard study feature.

use serde::{Deserialize, Serialize};

/// A question/answer pair derived from board notes.
///
/// Cards have no identity beyond their position in the list that holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
