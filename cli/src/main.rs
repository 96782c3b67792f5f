//! CLI entrypoint for droidmind
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod output;
mod repl;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use droidmind_infrastructure::ConfigLoader;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(verbose: u8) -> EnvFilter {
    if verbose == 0
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Console logging on stderr, plus a daily-rolling file when a log
/// directory is known. The guard must live until exit.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let appender = tracing_appender::rolling::daily(dir, "droidmind.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_deref())?;
    let log_dir = cli.log_dir.clone().or_else(|| config.logging.log_dir.clone());
    let _guard = init_tracing(cli.verbose, log_dir.as_deref());

    info!("Starting droidmind");

    let session_id = cli
        .session
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string());
    let cancellation = CancellationToken::new();
    let assistant = setup::build(&config, session_id, log_dir.as_deref(), cancellation.clone())?;

    if let Some(raw) = &cli.screen {
        assistant.set_screen(Some(setup::parse_screen(raw)?)).await;
    }

    match cli.command {
        Commands::Chat => repl::run(&assistant, cli.show_memory).await?,
        Commands::Ask { question } => {
            let interrupt = cancellation.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    interrupt.cancel();
                }
            });

            let answer = assistant.ask(&question).await;
            output::print_answer(&answer);
            if cli.show_memory {
                let (memory, summaries) = assistant.memory_snapshot().await;
                output::print_memory(&memory, summaries);
            }
        }
    }

    Ok(())
}
