//! Tool settings for botsync.
//!
//! `SyncSettings` represents the optional `botsync.toml` that controls the
//! service endpoint, retry behavior, and upsert defaults. All fields have
//! sensible defaults so the file can be omitted entirely.

use serde::{Deserialize, Serialize};

use crate::remote::ProcessBehavior;

/// Settings for a sync run. Loaded from `botsync.toml` next to the sync file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Base URL of the model-building service API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sync file read when `--file` is not given.
    #[serde(default = "default_sync_file")]
    pub sync_file: String,

    /// Maximum lookup attempts before treating an object as absent.
    #[serde(default = "default_max_retry")]
    pub max_retry: u32,

    /// Linear backoff unit between lookup attempts, in seconds.
    #[serde(default = "default_backoff_unit_secs")]
    pub backoff_unit_secs: u64,

    /// Continue past a failed bot instead of aborting the run.
    #[serde(default)]
    pub keep_going: bool,

    /// Whether the service should save or build accepted definitions.
    #[serde(default)]
    pub process_behavior: ProcessBehavior,

    /// Idle session TTL sent with bot upserts, in seconds.
    #[serde(default = "default_idle_session_ttl_secs")]
    pub idle_session_ttl_secs: u32,

    /// Name of the environment variable holding the API token.
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_sync_file() -> String {
    "bots.yml".to_string()
}

fn default_max_retry() -> u32 {
    2
}

fn default_backoff_unit_secs() -> u64 {
    2
}

fn default_idle_session_ttl_secs() -> u32 {
    300
}

fn default_api_token_env() -> String {
    "BOTSYNC_API_TOKEN".to_string()
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            sync_file: default_sync_file(),
            max_retry: default_max_retry(),
            backoff_unit_secs: default_backoff_unit_secs(),
            keep_going: false,
            process_behavior: ProcessBehavior::default(),
            idle_session_ttl_secs: default_idle_session_ttl_secs(),
            api_token_env: default_api_token_env(),
        }
    }
}
