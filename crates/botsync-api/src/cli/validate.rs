//! The `bsync validate` command: check a sync file without touching the
//! service.

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{ContentArrangement, Table, presets};
use console::style;

use botsync_infra::config::{load_settings, load_sync_file};

pub async fn run(file: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = load_settings(Path::new(".")).await;
    let path = file.unwrap_or_else(|| PathBuf::from(&settings.sync_file));
    let sync_file = load_sync_file(&path).await?;

    if let Err(err) = sync_file.validate() {
        if json {
            println!(
                "{}",
                serde_json::json!({ "valid": false, "error": err.to_string() })
            );
        } else {
            println!();
            println!("  {} {}", style("✗").red().bold(), err);
            println!();
        }
        anyhow::bail!("validation failed for {}", path.display());
    }

    if json {
        let bots: Vec<serde_json::Value> = sync_file
            .bots
            .iter()
            .map(|bot| {
                serde_json::json!({
                    "name": bot.name,
                    "version": bot.version,
                    "locale": bot.locale,
                    "intents": bot.intents.len(),
                    "utterances": bot
                        .intents
                        .iter()
                        .map(|i| i.sample_utterances.len())
                        .sum::<usize>(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "valid": true, "bots": bots }))?
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Bot", "Version", "Locale", "Intents", "Utterances"]);

    for bot in &sync_file.bots {
        let utterances: usize = bot
            .intents
            .iter()
            .map(|i| i.sample_utterances.len())
            .sum();
        table.add_row(vec![
            bot.name.clone(),
            bot.version.clone(),
            bot.locale.clone(),
            bot.intents.len().to_string(),
            utterances.to_string(),
        ]);
    }

    println!();
    println!(
        "  {} {} is valid",
        style("✓").green().bold(),
        style(path.display().to_string()).cyan()
    );
    println!();
    println!("{table}");
    println!();

    Ok(())
}
