use anyhow::{Context, Result};
use chatbox_core::{ChatController, FileStore, KeyValueStore, MemoryStore, Settings};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;

mod app;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "chatbox")]
#[command(about = "Chatbox - terminal AI chat client with simulated replies")]
#[command(version)]
struct Cli {
    /// Send a single message, print the reply and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Model to start with (see /models)
    #[arg(short, long)]
    model: Option<String>,

    /// Directory holding saved keys and conversations
    #[arg(long, conflicts_with = "ephemeral")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings (including --model and --data-dir) back
    /// to the config file
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if let Some(model) = cli.model {
        settings.chat.default_model = model;
    }
    if let Some(dir) = &cli.data_dir {
        settings.storage.data_dir = Some(dir.clone());
    }
    let storage: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        let dir = settings.data_dir()?;
        let store = FileStore::with_dir(dir.clone())
            .with_context(|| format!("cannot open data directory {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "using file store");
        Arc::new(store)
    };

    let controller = ChatController::from_settings(&settings, storage)?;

    if cli.save_config {
        match &cli.config {
            Some(path) => settings.save_to(path)?,
            None => settings.save()?,
        }
        tracing::info!("settings saved");
    }

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(&controller, &prompt).await?;
    } else {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let printer = app::spawn_event_printer(event_rx);
        let controller = Arc::new(controller.with_events(event_tx));
        app::run_repl(controller, BufReader::new(tokio::io::stdin())).await?;
        // The controller is gone, so the event channel is closed.
        let _ = printer.await;
    }

    Ok(())
}
