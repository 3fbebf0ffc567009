//! Rollbook CLI - interactive in-memory student records.

mod console;
mod menu;
mod prompt;

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rollbook_storage::StudentStore;
use rollbook_work::{InterruptHandle, Loader, LoaderConfig, ProgressSink, TracingProgress};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use console::ConsoleProgress;
use menu::Menu;

#[derive(Parser)]
#[command(name = "rollbook")]
#[command(about = "Interactive in-memory student records", long_about = None)]
struct Cli {
    /// Progress ticks run before each add/update
    #[arg(long, default_value = "5")]
    ticks: u32,

    /// Length of one progress tick in milliseconds
    #[arg(long, default_value = "300")]
    tick_ms: u64,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Hide the progress indicator
    #[arg(long)]
    no_progress: bool,

    /// Print "Display All" as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(level: &str) {
    // stdout belongs to the menu
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Forward stdin lines over a channel from a dedicated thread.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let progress: Arc<dyn ProgressSink> = if cli.no_progress {
        Arc::new(TracingProgress)
    } else {
        Arc::new(ConsoleProgress::stdout())
    };

    let shutdown = InterruptHandle::new();
    let loader = Loader::new()
        .with_config(LoaderConfig {
            ticks: cli.ticks,
            tick_interval: Duration::from_millis(cli.tick_ms),
        })
        .with_progress(progress)
        .with_interrupt(shutdown.clone());
    let store = Arc::new(StudentStore::new(loader));

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("interrupt received, finishing current operation");
                    shutdown.interrupt();
                }
                Err(e) => warn!("cannot listen for ctrl-c: {}", e),
            }
        });
    }

    info!(ticks = cli.ticks, tick_ms = cli.tick_ms, "starting menu");
    let mut menu = Menu::new(store, spawn_stdin_reader(), std::io::stdout(), shutdown)
        .with_json(cli.json);
    menu.run().await
}
