//! HTTP implementation of the `ModelStore` port.
//!
//! Talks to the model-building service's REST API. A 404 on a lookup is
//! translated to `Ok(None)` (the create-path signal); 409 and 412 on an
//! upsert become [`RemoteError::Conflict`]; every other non-success status
//! becomes [`RemoteError::Api`].
//!
//! The API token is wrapped in [`secrecy::SecretString`] and only exposed
//! when building the authorization header.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use botsync_core::store::{ModelStore, PutBotRequest, PutIntentRequest};
use botsync_types::error::RemoteError;
use botsync_types::remote::{RemoteBot, RemoteIntent};

/// Cap on error-body text carried into error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Request timeout for individual service calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the model-building service.
pub struct HttpModelStore {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl HttpModelStore {
    /// Create a new store client for `base_url` (trailing slash tolerated).
    pub fn new(base_url: String, api_token: Option<SecretString>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("botsync/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    fn bot_version_url(&self, name: &str, version: &str) -> String {
        format!("{}/bots/{}/versions/{}", self.base_url, name, version)
    }

    fn bot_url(&self, name: &str) -> String {
        format!("{}/bots/{}", self.base_url, name)
    }

    fn intent_version_url(&self, name: &str, version: &str) -> String {
        format!("{}/intents/{}/versions/{}", self.base_url, name, version)
    }

    fn intent_url(&self, name: &str) -> String {
        format!("{}/intents/{}", self.base_url, name)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// GET a snapshot, translating 404 to absence.
    async fn lookup<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, RemoteError> {
        debug!(%url, "lookup");
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// PUT an upsert request and decode the resulting snapshot.
    async fn upsert<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        request: &B,
    ) -> Result<T, RemoteError> {
        debug!(%url, "upsert");
        let response = self
            .authorize(self.http.put(url))
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl ModelStore for HttpModelStore {
    async fn get_bot(&self, name: &str, version: &str) -> Result<Option<RemoteBot>, RemoteError> {
        self.lookup(&self.bot_version_url(name, version)).await
    }

    async fn get_intent(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<RemoteIntent>, RemoteError> {
        self.lookup(&self.intent_version_url(name, version)).await
    }

    async fn put_bot(&self, request: &PutBotRequest) -> Result<RemoteBot, RemoteError> {
        self.upsert(&self.bot_url(&request.name), request).await
    }

    async fn put_intent(&self, request: &PutIntentRequest) -> Result<RemoteIntent, RemoteError> {
        self.upsert(&self.intent_url(&request.name), request).await
    }
}

/// Map a non-success status to the right error channel.
fn error_for_status(status: StatusCode, body: &str) -> RemoteError {
    let message = truncate(body);
    match status.as_u16() {
        409 | 412 => RemoteError::Conflict(message),
        code => RemoteError::Api {
            status: code,
            message,
        },
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= ERROR_BODY_LIMIT {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < ERROR_BODY_LIMIT)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &trimmed[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpModelStore {
        HttpModelStore::new("https://models.example.com/v1/".to_string(), None)
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        assert_eq!(store().base_url, "https://models.example.com/v1");
    }

    #[test]
    fn test_lookup_urls() {
        let store = store();
        assert_eq!(
            store.bot_version_url("Greeting", "$LATEST"),
            "https://models.example.com/v1/bots/Greeting/versions/$LATEST"
        );
        assert_eq!(
            store.intent_version_url("SayHello", "2"),
            "https://models.example.com/v1/intents/SayHello/versions/2"
        );
    }

    #[test]
    fn test_upsert_urls() {
        let store = store();
        assert_eq!(
            store.bot_url("Greeting"),
            "https://models.example.com/v1/bots/Greeting"
        );
        assert_eq!(
            store.intent_url("SayHello"),
            "https://models.example.com/v1/intents/SayHello"
        );
    }

    #[test]
    fn test_conflict_statuses_map_to_conflict() {
        for code in [409u16, 412] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = error_for_status(status, "checksum mismatch");
            assert!(matches!(err, RemoteError::Conflict(_)), "status {code}");
        }
    }

    #[test]
    fn test_other_statuses_map_to_api_error() {
        let err = error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            RemoteError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_truncate_caps_long_bodies() {
        let long = "x".repeat(500);
        let message = truncate(&long);
        assert!(message.len() <= ERROR_BODY_LIMIT + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_truncate_keeps_short_bodies() {
        assert_eq!(truncate("  not found  "), "not found");
    }
}
