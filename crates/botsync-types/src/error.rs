use thiserror::Error;

/// Errors from remote model-service calls.
///
/// Not-found is deliberately not a variant here: lookups signal absence as
/// `Ok(None)`, which drives the create path of an upsert. Only genuine
/// failures travel this channel.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The object was modified concurrently (stale checksum on upsert).
    #[error("concurrent modification: {0}")]
    Conflict(String),

    #[error("service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Errors from a sync run over a batch of bots.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("bot '{bot}': {source}")]
    Bot {
        bot: String,
        #[source]
        source: RemoteError,
    },
}

/// Errors from loading or validating the sync file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid sync file: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Api {
            status: 500,
            message: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "service error (500): internal error");
    }

    #[test]
    fn test_conflict_display() {
        let err = RemoteError::Conflict("checksum mismatch".to_string());
        assert!(err.to_string().contains("concurrent modification"));
    }

    #[test]
    fn test_sync_error_carries_bot_name_and_source() {
        let err = SyncError::Bot {
            bot: "Greeting".to_string(),
            source: RemoteError::Transport("connection refused".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "bot 'Greeting': transport error: connection refused"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Parse {
            path: "bots.yml".to_string(),
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse bots.yml: bad indent");
    }
}
