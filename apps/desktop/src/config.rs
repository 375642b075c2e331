//! Configuration read from the environment (and `.env`, loaded by the caller).

use std::path::PathBuf;

use thiserror::Error;

use crate::ai::AiSettings;

pub const ENV_NOTES_DIR: &str = "STUDY_NOTES_DIR";
pub const ENV_AI_ENDPOINT: &str = "STUDY_AI_ENDPOINT";
pub const ENV_AI_API_KEY: &str = "STUDY_AI_API_KEY";
pub const ENV_AI_MODEL: &str = "STUDY_AI_MODEL";
pub const ENV_AI_DISABLED: &str = "STUDY_AI_DISABLED";
pub const ENV_USE_LOCAL: &str = "STUDY_USE_LOCAL_FLASHCARDS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} (expected true/false)")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyConfig {
    pub notes_dir: PathBuf,
    /// `None` when the AI client is disabled.
    pub ai: Option<AiSettings>,
    pub use_local_flashcards: bool,
}

impl StudyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let notes_dir = get(ENV_NOTES_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_notes_dir);

        let ai_disabled = parse_bool(ENV_AI_DISABLED, get(ENV_AI_DISABLED))?;
        let ai = (!ai_disabled).then(|| {
            let defaults = AiSettings::default();
            AiSettings {
                endpoint: get(ENV_AI_ENDPOINT).unwrap_or(defaults.endpoint),
                api_key: get(ENV_AI_API_KEY),
                model: get(ENV_AI_MODEL).unwrap_or(defaults.model),
            }
        });

        Ok(Self {
            notes_dir,
            ai,
            use_local_flashcards: parse_bool(ENV_USE_LOCAL, get(ENV_USE_LOCAL))?,
        })
    }
}

fn default_notes_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("study-flashcards")
        .join("boards")
}

fn parse_bool(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}
