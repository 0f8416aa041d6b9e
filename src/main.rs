use homework_watch::core::config::{Credentials, WatchConfig};
use homework_watch::core::error::ConfigError;
use homework_watch::core::{CycleOutcome, KnownVerdicts, PollLoop};
use homework_watch::io::practicum::PracticumClient;
use homework_watch::io::telegram::TelegramClient;

use anyhow::{Context, Result};
use colored::*;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env").ok();

    let config_path = WatchConfig::default_path();

    if env::args().any(|a| a == "init") {
        return init_config(&config_path);
    }

    let config = WatchConfig::load(&config_path).context("Failed to load config")?;
    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_target(false)
        .init();

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(ConfigError::MissingVariables(_)) => {
            error!(
                "Программа принудительно остановлена. \
                 Отсутствуют обязательные переменные окружения."
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Invalid startup configuration"),
    };

    let fetcher = PracticumClient::new(
        &config.endpoint,
        credentials.practicum_token.clone(),
        config.fetch_timeout(),
    )?;
    let notifier = TelegramClient::new(
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id,
        config.deliver_timeout(),
    )?;

    let mut poll = PollLoop::new(fetcher, notifier, KnownVerdicts::default(), config.retry_period());

    if env::args().any(|a| a == "once") {
        return match poll.run_once().await {
            CycleOutcome::Succeeded { delivered } => {
                info!(delivered, cursor = poll.cursor().value(), "cycle complete");
                Ok(())
            }
            CycleOutcome::Failed(e) => Err(e).context("Poll cycle failed"),
        };
    }

    println!("{}", "👁️  Homework watch online".green().bold());
    info!(endpoint = %config.endpoint, chat_id = credentials.telegram_chat_id, "starting poll loop");
    poll.run().await;

    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} {} already exists.", "✅".green(), path.display());
        return Ok(());
    }
    let toml = toml::to_string_pretty(&WatchConfig::default())?;
    fs::write(path, toml).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Wrote default config to {}", "🧬".green(), path.display());
    Ok(())
}
