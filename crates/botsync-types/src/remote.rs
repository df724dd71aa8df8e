//! Wire-side payloads and snapshots for the model-building service.
//!
//! Everything here serializes as camelCase JSON, matching the service API.
//! Projections from the spec types are pure field renames -- message order
//! and content are never changed.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::spec::{ContentType, MessageSpec, PromptSpec, StatementSpec};

/// Version alias for the most recent revision of a remote object.
pub const LATEST_VERSION: &str = "$LATEST";

/// One message as the service sees it (`contentType` instead of the sync
/// file's `content-type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

impl From<&MessageSpec> for Message {
    fn from(spec: &MessageSpec) -> Self {
        Self {
            content_type: spec.content_type.clone(),
            content: spec.content.clone(),
        }
    }
}

/// A prompt payload: ordered messages plus the re-ask limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub messages: Vec<Message>,
    pub max_attempts: u8,
}

impl From<&PromptSpec> for Prompt {
    fn from(spec: &PromptSpec) -> Self {
        Self {
            messages: spec.messages.iter().map(Message::from).collect(),
            max_attempts: spec.max_attempts,
        }
    }
}

/// A statement payload: ordered messages, no re-ask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub messages: Vec<Message>,
}

impl From<&StatementSpec> for Statement {
    fn from(spec: &StatementSpec) -> Self {
        Self {
            messages: spec.messages.iter().map(Message::from).collect(),
        }
    }
}

/// Reference to an intent version within a bot definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummary {
    pub intent_name: String,
    pub intent_version: String,
}

/// Last-observed snapshot of a remote intent.
///
/// `checksum` is the opaque optimistic-concurrency token; an upsert must echo
/// it back to update this revision. Never cached across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteIntent {
    pub name: String,
    pub version: String,
    pub checksum: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sample_utterances: Vec<String>,
}

/// Last-observed snapshot of a remote bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBot {
    pub name: String,
    pub version: String,
    pub checksum: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub intents: Vec<IntentSummary>,
    /// Server-side build status (e.g. "READY", "BUILDING"), when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// What the service does with an accepted bot definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessBehavior {
    #[serde(rename = "SAVE")]
    Save,
    #[serde(rename = "BUILD")]
    Build,
}

impl Default for ProcessBehavior {
    fn default() -> Self {
        ProcessBehavior::Save
    }
}

impl fmt::Display for ProcessBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessBehavior::Save => write!(f, "SAVE"),
            ProcessBehavior::Build => write!(f, "BUILD"),
        }
    }
}

impl FromStr for ProcessBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SAVE" => Ok(ProcessBehavior::Save),
            "BUILD" => Ok(ProcessBehavior::Build),
            other => Err(format!("invalid process behavior: '{other}'")),
        }
    }
}

/// How an intent is fulfilled once slots are gathered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentActivity {
    #[serde(rename = "type")]
    pub activity_type: FulfillmentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_hook: Option<CodeHook>,
}

impl Default for FulfillmentActivity {
    fn default() -> Self {
        Self {
            activity_type: FulfillmentType::ReturnIntent,
            code_hook: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentType {
    ReturnIntent,
    CodeHook,
}

/// An external hook invoked during dialog or fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHook {
    pub uri: String,
    pub message_version: String,
}

/// Minimal slot definition.
///
/// The sync file does not declare slots today; upserts send an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,
    pub slot_type: String,
    pub slot_constraint: SlotConstraint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotConstraint {
    Required,
    Optional,
}
