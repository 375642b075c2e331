//! Local flashcard generator.
//!
//! Turns free-form notes into flashcards without any network access.
//! Explicit `Q:`/`A:` markup wins when present; otherwise cards are derived
//! from headings, `Term: definition` lines and simple "X is Y." sentences.

use crate::parser;
use crate::types::Flashcard;
use std::collections::HashSet;

/// Tuning knobs for [`LocalGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Upper bound on the number of cards produced.
    pub max_cards: usize,
    /// Longest term (in words) accepted as a definition or sentence subject.
    pub max_term_words: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_cards: 20,
            max_term_words: 6,
        }
    }
}

/// Subjects that refer back to earlier text and make useless questions.
const VAGUE_SUBJECTS: &[&str] = &[
    "it", "this", "that", "there", "they", "these", "those", "he", "she", "we", "which",
];

#[derive(Debug, Clone, Default)]
pub struct LocalGenerator {
    options: GeneratorOptions,
}

impl LocalGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generate flashcards from notes. Pure function of `notes` and the options.
    pub fn generate_from_text(&self, notes: &str) -> Vec<Flashcard> {
        if notes.trim().is_empty() {
            return vec![];
        }

        let cards = match parser::parse(notes) {
            Ok(cards) if !cards.is_empty() => cards,
            _ => self.derive_cards(notes),
        };
        self.finalize(cards)
    }

    fn derive_cards(&self, notes: &str) -> Vec<Flashcard> {
        let mut cards = Vec::new();

        for block in blocks(notes) {
            let mut lines = block.iter().copied().map(strip_bullet).peekable();

            if let Some(heading) = lines.peek().copied().and_then(heading_text) {
                lines.next();
                let body: Vec<&str> = lines.clone().collect();
                if !body.is_empty() {
                    cards.push(Flashcard::new(
                        format!("What do your notes say about {}?", heading),
                        body.join(" "),
                    ));
                }
            }

            for line in lines {
                if let Some(card) = self.definition(line) {
                    cards.push(card);
                    continue;
                }
                cards.extend(sentences(line).filter_map(|s| self.statement(s)));
            }
        }

        cards
    }

    /// `Term: definition` or `Term - definition`.
    fn definition(&self, line: &str) -> Option<Flashcard> {
        // Leftovers of malformed Q/A markup.
        if line.starts_with("Q:") || line.starts_with("A:") {
            return None;
        }

        let (term, definition) = line
            .split_once(':')
            .filter(|(_, rest)| !rest.starts_with("//"))
            .or_else(|| line.split_once(" - "))?;

        let term = term.trim().trim_matches(|c: char| c == '*' || c == '_' || c == '`');
        let definition = definition.trim();
        if term.is_empty() || definition.is_empty() || !self.short_enough(term) {
            return None;
        }

        Some(Flashcard::new(format!("What is {}?", term), definition))
    }

    /// `X is Y.` / `X are Y.`
    fn statement(&self, sentence: &str) -> Option<Flashcard> {
        if !sentence.ends_with('.') {
            return None;
        }

        let (subject, verb) = [" is ", " are "]
            .into_iter()
            .filter_map(|verb| sentence.find(verb).map(|pos| (pos, verb.trim())))
            .min_by_key(|(pos, _)| *pos)
            .map(|(pos, verb)| (sentence[..pos].trim(), verb))?;

        if subject.is_empty()
            || !self.short_enough(subject)
            || VAGUE_SUBJECTS.contains(&subject.to_lowercase().as_str())
        {
            return None;
        }

        Some(Flashcard::new(
            format!("What {} {}?", verb, subject),
            sentence.trim(),
        ))
    }

    fn short_enough(&self, term: &str) -> bool {
        let words = term.split_whitespace().count();
        words > 0 && words <= self.options.max_term_words
    }

    fn finalize(&self, cards: Vec<Flashcard>) -> Vec<Flashcard> {
        let mut seen = HashSet::new();
        cards
            .into_iter()
            .filter(|card| seen.insert(card.question.to_lowercase()))
            .take(self.options.max_cards)
            .collect()
    }
}

/// Split notes into blank-line separated blocks of trimmed, non-empty lines.
fn blocks(notes: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in notes.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn heading_text(line: &str) -> Option<&str> {
    let text = line.strip_prefix('#')?.trim_start_matches('#').trim();
    (!text.is_empty()).then_some(text)
}

fn strip_bullet(line: &str) -> &str {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }

    // Numbered list: "1. " / "12) "
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim_start();
        }
    }
    line
}

/// Split a line into sentences, keeping the terminating punctuation.
fn sentences(line: &str) -> impl Iterator<Item = &str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                let end = idx + c.len_utf8();
                let sentence = line[start..end].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = line[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out.into_iter()
}
