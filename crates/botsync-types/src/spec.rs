//! Sync-file definitions: the YAML-facing view of bots and intents.
//!
//! Field names follow the sync file's kebab-case convention
//! (`sample-utterances`, `clarification-prompt`, `content-type`). These types
//! are immutable input -- loaded once per run and projected into the wire
//! types in [`crate::remote`] when talking to the service.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Top-level sync file: a list of declared bots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFile {
    pub bots: Vec<BotSpec>,
}

/// One declared bot: identity, intents, and the two built-in prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Remote version or alias to reconcile against.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub intents: Vec<IntentSpec>,
    pub clarification_prompt: PromptSpec,
    pub abort_statement: StatementSpec,
}

/// A declared intent: a name plus its sample utterances, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntentSpec {
    pub name: String,
    #[serde(default)]
    pub sample_utterances: Vec<String>,
}

/// A prompt that re-asks the user up to `max-attempts` times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PromptSpec {
    pub max_attempts: u8,
    pub messages: Vec<MessageSpec>,
}

/// A terminal statement (no re-ask).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementSpec {
    pub messages: Vec<MessageSpec>,
}

/// One message within a prompt or statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MessageSpec {
    pub content_type: ContentType,
    pub content: String,
}

/// Message content types recognized by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
    #[serde(rename = "SSML")]
    Ssml,
    CustomPayload,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::PlainText => write!(f, "PlainText"),
            ContentType::Ssml => write!(f, "SSML"),
            ContentType::CustomPayload => write!(f, "CustomPayload"),
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PlainText" => Ok(ContentType::PlainText),
            "SSML" => Ok(ContentType::Ssml),
            "CustomPayload" => Ok(ContentType::CustomPayload),
            other => Err(format!("invalid content type: '{other}'")),
        }
    }
}

fn default_version() -> String {
    crate::remote::LATEST_VERSION.to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl SyncFile {
    /// Structural validation of a parsed sync file.
    ///
    /// Checks:
    /// - every bot and intent has a non-empty name
    /// - intent names are unique within a bot
    /// - every intent declares at least one sample utterance
    /// - `max-attempts` is at least 1
    /// - clarification prompt and abort statement each carry at least one message
    pub fn validate(&self) -> Result<(), ConfigError> {
        for bot in &self.bots {
            if bot.name.trim().is_empty() {
                return Err(ConfigError::Invalid("bot name must not be empty".to_string()));
            }

            let mut seen = std::collections::HashSet::new();
            for intent in &bot.intents {
                if intent.name.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "bot '{}' has an intent with an empty name",
                        bot.name
                    )));
                }
                if !seen.insert(intent.name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "bot '{}' declares intent '{}' more than once",
                        bot.name, intent.name
                    )));
                }
                if intent.sample_utterances.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "intent '{}' has no sample utterances",
                        intent.name
                    )));
                }
            }

            if bot.clarification_prompt.max_attempts == 0 {
                return Err(ConfigError::Invalid(format!(
                    "bot '{}': clarification-prompt max-attempts must be at least 1",
                    bot.name
                )));
            }
            if bot.clarification_prompt.messages.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "bot '{}': clarification-prompt has no messages",
                    bot.name
                )));
            }
            if bot.abort_statement.messages.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "bot '{}': abort-statement has no messages",
                    bot.name
                )));
            }
        }

        Ok(())
    }
}
