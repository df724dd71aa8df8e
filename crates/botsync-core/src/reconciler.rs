//! Read-modify-write reconciliation of declared bots against the service.
//!
//! The reconciler drives remote state toward the sync file with upserts keyed
//! by optimistic-concurrency checksums: look up the current remote object,
//! capture its checksum, and write the declared definition back with that
//! checksum (or without one, which creates). Lookups that come back not-found
//! are retried a bounded number of times with linear backoff before the
//! object is treated as absent; every other remote failure propagates
//! immediately.

use std::future::Future;

use tracing::{debug, info, warn};

use botsync_types::error::{RemoteError, SyncError};
use botsync_types::remote::{
    IntentSummary, LATEST_VERSION, ProcessBehavior, Prompt, RemoteBot, Statement,
};
use botsync_types::spec::BotSpec;

use crate::retry::RetryPolicy;
use crate::store::{ModelStore, PutBotRequest, PutIntentRequest};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Lookup retry policy (not-found only; real errors are never retried).
    pub retry: RetryPolicy,
    /// Sent with every bot upsert.
    pub process_behavior: ProcessBehavior,
    /// Idle session TTL sent with every bot upsert, in seconds.
    pub idle_session_ttl_secs: u32,
    /// In a batch, record a failed bot and continue instead of aborting.
    pub keep_going: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            process_behavior: ProcessBehavior::default(),
            idle_session_ttl_secs: 300,
            keep_going: false,
        }
    }
}

/// Result of reconciling one declared bot within a batch.
#[derive(Debug)]
pub struct BotOutcome {
    pub name: String,
    pub result: Result<RemoteBot, RemoteError>,
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Drives the remote service toward the declared state, one bot at a time.
///
/// Generic over [`ModelStore`] so the core never depends on the HTTP layer;
/// tests run against an in-memory recording store.
pub struct Reconciler<S: ModelStore> {
    store: S,
    config: ReconcilerConfig,
}

impl<S: ModelStore> Reconciler<S> {
    pub fn new(store: S, config: ReconcilerConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reconcile one declared bot: each intent in input order, then the bot.
    ///
    /// Returns the snapshot the service reported for the final bot upsert.
    /// A concurrent-modification conflict is surfaced unchanged -- callers
    /// decide whether to re-run; nothing already upserted is rolled back.
    pub async fn reconcile(&self, spec: &BotSpec) -> Result<RemoteBot, RemoteError> {
        let mut intents = Vec::with_capacity(spec.intents.len());

        for intent in &spec.intents {
            let existing = self
                .find_with_retry(|| self.store.get_intent(&intent.name, LATEST_VERSION))
                .await?;
            let checksum = existing.map(|found| found.checksum);

            debug!(
                intent = %intent.name,
                update = checksum.is_some(),
                utterances = intent.sample_utterances.len(),
                "upserting intent"
            );

            let request = PutIntentRequest {
                name: intent.name.clone(),
                description: intent.name.clone(),
                sample_utterances: intent.sample_utterances.clone(),
                checksum,
                ..Default::default()
            };

            let saved = self.store.put_intent(&request).await?;
            intents.push(IntentSummary {
                intent_name: saved.name,
                intent_version: saved.version,
            });
        }

        let existing = self
            .find_with_retry(|| self.store.get_bot(&spec.name, &spec.version))
            .await?;
        let checksum = existing.map(|found| found.checksum);

        info!(
            bot = %spec.name,
            update = checksum.is_some(),
            intents = intents.len(),
            "upserting bot"
        );

        let request = PutBotRequest {
            name: spec.name.clone(),
            description: spec.description.clone(),
            intents,
            clarification_prompt: Prompt::from(&spec.clarification_prompt),
            abort_statement: Statement::from(&spec.abort_statement),
            checksum,
            process_behavior: self.config.process_behavior.clone(),
            idle_session_ttl_in_seconds: self.config.idle_session_ttl_secs,
            locale: spec.locale.clone(),
            child_directed: false,
        };

        self.store.put_bot(&request).await
    }

    /// Reconcile a batch of declared bots sequentially.
    ///
    /// By default the first fatal error aborts the run (bots already
    /// reconciled stay reconciled). With `keep_going` set, failures are
    /// recorded per bot and the run continues.
    pub async fn reconcile_all(&self, specs: &[BotSpec]) -> Result<Vec<BotOutcome>, SyncError> {
        let mut outcomes = Vec::with_capacity(specs.len());

        for spec in specs {
            match self.reconcile(spec).await {
                Ok(bot) => outcomes.push(BotOutcome {
                    name: spec.name.clone(),
                    result: Ok(bot),
                }),
                Err(err) if self.config.keep_going => {
                    warn!(bot = %spec.name, error = %err, "bot failed, continuing");
                    outcomes.push(BotOutcome {
                        name: spec.name.clone(),
                        result: Err(err),
                    });
                }
                Err(err) => {
                    return Err(SyncError::Bot {
                        bot: spec.name.clone(),
                        source: err,
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// Run a lookup with bounded retry on not-found.
    ///
    /// Not-found after exhausting all attempts is `Ok(None)` -- the create
    /// path, not a failure. Any lookup error short-circuits without retry.
    async fn find_with_retry<T, F, Fut>(&self, mut lookup: F) -> Result<Option<T>, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, RemoteError>>,
    {
        let retry = &self.config.retry;
        for attempt in 1..=retry.max_attempts {
            if let Some(found) = lookup().await? {
                return Ok(Some(found));
            }
            if retry.should_retry(attempt) {
                debug!(attempt, "not found yet, backing off");
                tokio::time::sleep(retry.delay_for(attempt)).await;
            }
        }
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
