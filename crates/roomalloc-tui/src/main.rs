//! Binary entry point for the room allocation TUI.

use std::sync::{Arc, Mutex, PoisonError};

use clap::Parser;
use roomalloc_core::AllocationSnapshot;
use roomalloc_tui::{App, Config, Runtime, TerminalDriver};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config)?;

    let app = App::new(config.guests, config.rooms)?;
    let driver = TerminalDriver::new()?;
    let last_report = driver.last_report();

    Runtime::new(app, driver).run().await?;

    emit_final_report(&last_report)?;
    Ok(())
}

/// Send structured logs to the configured file; the terminal owns the
/// screen, so there is no console logging.
fn init_tracing(config: &Config) -> std::io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ROOMALLOC_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Print the last reported allocation as JSON once the terminal is
/// restored, for the external consumer.
#[allow(clippy::print_stdout)]
fn emit_final_report(
    last_report: &Arc<Mutex<Option<AllocationSnapshot>>>,
) -> Result<(), serde_json::Error> {
    let snapshot = last_report.lock().unwrap_or_else(PoisonError::into_inner).clone();
    if let Some(snapshot) = snapshot {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
