//! Command-line interface of the headless driver.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "study-desktop",
    version,
    about = "Generate flashcards from board notes and ask questions about them"
)]
pub struct Cli {
    /// Directory holding one sub-directory of notes per board.
    #[arg(long, global = true)]
    pub notes_dir: Option<PathBuf>,

    /// Chat-completions endpoint override.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API key override.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Always use the local generator for flashcards.
    #[arg(long, global = true)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available boards.
    Boards,
    /// Generate flashcards for a board and print them.
    Generate { board: String },
    /// Ask a question about a board's notes.
    Ask { board: String, question: String },
}
