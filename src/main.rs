//! Escape Scheduler CLI

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use escape_scheduler::cli::{Cli, Command};
use escape_scheduler::config::Config;
use escape_scheduler::handlers::{self, check::CheckOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "escape-scheduler.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,escape_scheduler=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let config = Config::from_env()?;
    let missing = config.missing_keys();
    if !missing.is_empty() {
        info!("Not configured: {} (travel times will be estimated)", missing.join(", "));
    }

    match cli.command {
        Command::Matrix { reservations, json } => {
            handlers::matrix::run(&config, &reservations, json).await
        }
        Command::Check {
            reservations,
            participants,
            scenarios,
            with_travel,
            strict_capacity,
            json,
        } => {
            handlers::check::run(
                &config,
                CheckOptions {
                    reservations: &reservations,
                    participants: &participants,
                    scenarios: &scenarios,
                    with_travel,
                    strict_capacity,
                    json,
                },
            )
            .await
        }
        Command::Context {
            reservations,
            participants,
        } => handlers::context::run(&config, &reservations, &participants).await,
        Command::Export {
            scenarios,
            scenario_id,
            out,
        } => handlers::export::run(&scenarios, scenario_id, out.as_deref()),
    }
}
