//! Settings and sync-file loaders for botsync.
//!
//! The settings file (`botsync.toml`) is optional: missing or malformed
//! settings fall back to defaults with a warning. The sync file is the
//! primary input, so its failures are hard errors.

use std::path::Path;

use botsync_types::error::ConfigError;
use botsync_types::settings::SyncSettings;
use botsync_types::spec::SyncFile;

/// Load settings from `{dir}/botsync.toml`.
///
/// - Missing file: returns [`SyncSettings::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the default.
pub async fn load_settings(dir: &Path) -> SyncSettings {
    let settings_path = dir.join("botsync.toml");

    let content = match tokio::fs::read_to_string(&settings_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No botsync.toml found at {}, using defaults",
                settings_path.display()
            );
            return SyncSettings::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                settings_path.display()
            );
            return SyncSettings::default();
        }
    };

    match toml::from_str::<SyncSettings>(&content) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                settings_path.display()
            );
            SyncSettings::default()
        }
    }
}

/// Load and parse the YAML sync file at `path`.
pub async fn load_sync_file(path: &Path) -> Result<SyncFile, ConfigError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ConfigError::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;

    serde_yaml_ng::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}
