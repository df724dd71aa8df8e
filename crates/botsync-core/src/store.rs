//! Model-service accessor trait and upsert request types.

use std::future::Future;

use serde::Serialize;

use botsync_types::error::RemoteError;
use botsync_types::remote::{
    CodeHook, FulfillmentActivity, IntentSummary, ProcessBehavior, Prompt, RemoteBot, RemoteIntent,
    Slot, Statement,
};

// ---------------------------------------------------------------------------
// Upsert requests
// ---------------------------------------------------------------------------

/// Full parameter set for an intent upsert.
///
/// `checksum` carries the token of the most recently observed remote intent;
/// leaving it `None` is the create-path signal. Optional fields are omitted
/// from the serialized request entirely.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutIntentRequest {
    pub name: String,
    pub description: String,
    pub slots: Vec<Slot>,
    pub sample_utterances: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_prompt: Option<Prompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_statement: Option<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_prompt: Option<Prompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion_statement: Option<Statement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_code_hook: Option<CodeHook>,
    pub fulfillment_activity: FulfillmentActivity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_intent_signature: Option<String>,
}

/// Full parameter set for a bot upsert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PutBotRequest {
    pub name: String,
    pub description: String,
    pub intents: Vec<IntentSummary>,
    pub clarification_prompt: Prompt,
    pub abort_statement: Statement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    pub process_behavior: ProcessBehavior,
    #[serde(rename = "idleSessionTTLInSeconds")]
    pub idle_session_ttl_in_seconds: u32,
    pub locale: String,
    pub child_directed: bool,
}

// ---------------------------------------------------------------------------
// ModelStore
// ---------------------------------------------------------------------------

/// Remote accessor for the model-building service.
///
/// Implementations live in botsync-infra (e.g., `HttpModelStore`). Lookups
/// translate the service's not-found condition into `Ok(None)` -- absence is
/// the create-path signal, never an error. Uses native async fn in traits
/// (Rust 2024 edition, no async_trait macro).
pub trait ModelStore: Send + Sync {
    /// Fetch a bot snapshot by name and version, or `None` if absent.
    fn get_bot(
        &self,
        name: &str,
        version: &str,
    ) -> impl Future<Output = Result<Option<RemoteBot>, RemoteError>> + Send;

    /// Fetch an intent snapshot by name and version, or `None` if absent.
    fn get_intent(
        &self,
        name: &str,
        version: &str,
    ) -> impl Future<Output = Result<Option<RemoteIntent>, RemoteError>> + Send;

    /// Create or update a bot. The request's checksum decides the path.
    fn put_bot(
        &self,
        request: &PutBotRequest,
    ) -> impl Future<Output = Result<RemoteBot, RemoteError>> + Send;

    /// Create or update an intent. The request's checksum decides the path.
    fn put_intent(
        &self,
        request: &PutIntentRequest,
    ) -> impl Future<Output = Result<RemoteIntent, RemoteError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use botsync_types::remote::FulfillmentType;
    use botsync_types::spec::ContentType;

    #[test]
    fn test_put_intent_defaults() {
        let request = PutIntentRequest {
            name: "Greeting".to_string(),
            description: "Greeting".to_string(),
            sample_utterances: vec!["hi".to_string()],
            ..Default::default()
        };

        assert!(request.slots.is_empty());
        assert!(request.checksum.is_none());
        assert_eq!(
            request.fulfillment_activity.activity_type,
            FulfillmentType::ReturnIntent
        );
    }

    #[test]
    fn test_put_intent_create_path_omits_checksum() {
        let request = PutIntentRequest {
            name: "Greeting".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("checksum"));
        assert!(!json.contains("confirmationPrompt"));
        assert!(json.contains("\"fulfillmentActivity\""));
    }

    #[test]
    fn test_put_intent_update_path_carries_checksum() {
        let request = PutIntentRequest {
            name: "Greeting".to_string(),
            checksum: Some("abc123".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"checksum\":\"abc123\""));
    }

    #[test]
    fn test_put_bot_serializes_camel_case() {
        let request = PutBotRequest {
            name: "Greeting".to_string(),
            description: "A greeter".to_string(),
            intents: vec![IntentSummary {
                intent_name: "SayHello".to_string(),
                intent_version: "1".to_string(),
            }],
            clarification_prompt: Prompt {
                messages: vec![botsync_types::remote::Message {
                    content_type: ContentType::PlainText,
                    content: "What was that?".to_string(),
                }],
                max_attempts: 2,
            },
            abort_statement: Statement { messages: vec![] },
            checksum: None,
            process_behavior: ProcessBehavior::Save,
            idle_session_ttl_in_seconds: 300,
            locale: "en-US".to_string(),
            child_directed: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"clarificationPrompt\""));
        assert!(json.contains("\"abortStatement\""));
        assert!(json.contains("\"processBehavior\":\"SAVE\""));
        assert!(json.contains("\"idleSessionTTLInSeconds\":300"));
        assert!(json.contains("\"childDirected\":false"));
        assert!(!json.contains("checksum"));
    }
}
