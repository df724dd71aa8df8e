//! The `bsync sync` command: reconcile the sync file against the service.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use botsync_core::reconciler::{BotOutcome, Reconciler, ReconcilerConfig};
use botsync_core::retry::RetryPolicy;
use botsync_infra::config::{load_settings, load_sync_file};
use botsync_infra::http::HttpModelStore;
use botsync_types::spec::SyncFile;

pub async fn run(
    file: Option<PathBuf>,
    keep_going: bool,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let settings = load_settings(Path::new(".")).await;
    let path = file.unwrap_or_else(|| PathBuf::from(&settings.sync_file));
    let sync_file = load_sync_file(&path).await?;

    if dry_run {
        return print_plan(&sync_file, json);
    }

    let api_token = std::env::var(&settings.api_token_env)
        .ok()
        .map(SecretString::from);
    if api_token.is_none() {
        tracing::debug!(
            "No API token in ${}, sending unauthenticated requests",
            settings.api_token_env
        );
    }

    let store = HttpModelStore::new(settings.endpoint.clone(), api_token);
    let config = ReconcilerConfig {
        retry: RetryPolicy::new(
            settings.max_retry,
            Duration::from_secs(settings.backoff_unit_secs),
        ),
        process_behavior: settings.process_behavior.clone(),
        idle_session_ttl_secs: settings.idle_session_ttl_secs,
        keep_going: keep_going || settings.keep_going,
    };
    let reconciler = Reconciler::new(store, config);

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!(
            "Syncing {} bot(s) to {}...",
            sync_file.bots.len(),
            settings.endpoint
        ));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    };

    let outcomes = reconciler.reconcile_all(&sync_file.bots).await;
    spinner.finish_and_clear();

    let outcomes = outcomes?;

    if json {
        let report: Vec<serde_json::Value> = outcomes.iter().map(outcome_json).collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_outcomes(&outcomes);
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} bot(s) failed to sync", outcomes.len());
    }

    Ok(())
}

fn outcome_json(outcome: &BotOutcome) -> serde_json::Value {
    match &outcome.result {
        Ok(bot) => serde_json::json!({
            "name": outcome.name,
            "status": "synced",
            "version": bot.version,
            "checksum": bot.checksum,
        }),
        Err(err) => serde_json::json!({
            "name": outcome.name,
            "status": "failed",
            "error": err.to_string(),
        }),
    }
}

fn print_outcomes(outcomes: &[BotOutcome]) {
    println!();
    for outcome in outcomes {
        match &outcome.result {
            Ok(bot) => println!(
                "  {} {} {}",
                style("✓").green().bold(),
                style(&outcome.name).cyan(),
                style(format!("(version {})", bot.version)).dim()
            ),
            Err(err) => println!(
                "  {} {} {}",
                style("✗").red().bold(),
                style(&outcome.name).cyan(),
                style(err.to_string()).red()
            ),
        }
    }
    println!();
}

fn print_plan(sync_file: &SyncFile, json: bool) -> Result<()> {
    if json {
        let plan: Vec<serde_json::Value> = sync_file
            .bots
            .iter()
            .map(|bot| {
                serde_json::json!({
                    "name": bot.name,
                    "version": bot.version,
                    "intents": bot.intents.iter().map(|i| &i.name).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Would upsert {} bot(s):",
        style("→").bold(),
        sync_file.bots.len()
    );
    println!();
    for bot in &sync_file.bots {
        println!(
            "  {} {}",
            style(&bot.name).cyan().bold(),
            style(format!("({})", bot.version)).dim()
        );
        for intent in &bot.intents {
            println!(
                "    {} {} {}",
                style("•").dim(),
                intent.name,
                style(format!("{} utterance(s)", intent.sample_utterances.len())).dim()
            );
        }
    }
    println!();

    Ok(())
}
