// src/main.rs

//! farewatch: flight fare watcher CLI
//!
//! An external scheduler invokes one subcommand per run. The process exits
//! non-zero on unexpected orchestration errors so the scheduler can flag a
//! failed run; expected degradations (failed fetch, missing notification
//! transport) are logged and never fail the run.

use clap::{Parser, Subcommand};
use env_logger::Env;

use farewatch::error::Result;
use farewatch::models::Config;
use farewatch::notify::{ConsoleNotifier, MailRelayNotifier, Notifier};
use farewatch::pipeline::{RunMode, run_watch};
use farewatch::storage::{HistoryStore, JsonFileStore};
use farewatch::utils::http::create_client;

#[derive(Parser, Debug)]
#[command(name = "farewatch", version = "0.1.0", about = "Flight fare watcher")]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    /// Print notifications instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Routine price check with drop detection
    Check,
    /// Daily summary run (resets the day's baselines)
    Summary,
    /// Print the stored price history
    History,
    /// Validate configuration
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);

    env_logger::Builder::from_env(Env::default().default_filter_or(&config.logging.level)).init();

    match cli.command {
        Command::Check => run(&config, RunMode::RoutineCheck, cli.dry_run).await?,
        Command::Summary => run(&config, RunMode::DailySummary, cli.dry_run).await?,
        Command::History => show_history(&config).await?,
        Command::Validate => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            log::info!("Configuration OK");
        }
    }

    Ok(())
}

/// Run one watch pass in the given mode.
async fn run(config: &Config, mode: RunMode, dry_run: bool) -> Result<()> {
    config.validate()?;

    let store = JsonFileStore::new(&config.history.path);

    let notifier: Option<Box<dyn Notifier>> = if dry_run {
        Some(Box::new(ConsoleNotifier::new()))
    } else {
        MailRelayNotifier::from_config(&config.notify, create_client(&config.http)?)
            .map(|notifier| Box::new(notifier) as Box<dyn Notifier>)
    };
    if notifier.is_none() {
        log::warn!("Notification transport not configured; alerts will be logged only");
    }

    let outcome = run_watch(config, mode, &store, notifier.as_deref()).await?;
    log::info!(
        "Run complete: {} offers fetched, {} kept, {} alert(s)",
        outcome.offers_fetched,
        outcome.offers_kept,
        outcome.events.len()
    );

    Ok(())
}

/// Print the stored ledger.
async fn show_history(config: &Config) -> Result<()> {
    let store = JsonFileStore::new(&config.history.path);
    let history = store.load().await?;

    match history.last_checked {
        Some(instant) => println!("Last checked: {instant}"),
        None => println!("Last checked: never"),
    }
    for entry in &history.daily {
        let best_one_stop = entry
            .best_one_stop
            .map_or("-".to_string(), |price| price.to_string());
        println!(
            "{}  fastest {:>6}  cheapest {:>6}  best one-stop {:>6}",
            entry.date, entry.fastest, entry.cheapest, best_one_stop
        );
    }

    Ok(())
}
