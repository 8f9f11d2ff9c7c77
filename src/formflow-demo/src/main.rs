//! Formflow demo - every widget composed into one terminal form page.

mod config;
mod page;
mod terminal;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::DemoConfig;
use crate::page::FormPage;

/// Terminal form demo built on the Formflow widget library.
#[derive(Debug, Parser)]
#[command(name = "formflow", version, about)]
struct Cli {
    /// Path to the demo configuration file.
    #[arg(long, default_value = "formflow.toml")]
    config: PathBuf,

    /// Write trace logs to this file (the UI owns the terminal, so
    /// logs never go to stdout).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the submitted payload as JSON on exit.
    #[arg(long, default_value_t = true)]
    print_payload: bool,
}

/// Keeps the non-blocking log writer alive for the process lifetime.
struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

fn setup_file_logging(path: &std::path::Path) -> Result<LogGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let file = std::fs::File::create(path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("info")
        }))
        .with(file_layer)
        .try_init()
        .ok();

    Ok(LogGuard { _guard: guard })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match &cli.log_file {
        Some(path) => Some(setup_file_logging(path)?),
        None => None,
    };

    let config = DemoConfig::load(&cli.config)?;
    tracing::info!(?config, "starting formflow demo");

    let today = chrono::Local::now().date_naive();
    let mut page = FormPage::new(&config, today);

    let payload = ui::run(&mut page)?;

    // The terminal is restored by now; stdout is safe again.
    if cli.print_payload
        && let Some(payload) = payload
    {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    Ok(())
}
