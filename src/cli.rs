//! CLI argument parsing for the escape-scheduler binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "escape-scheduler", about = "Escape room meetup travel matrix and schedule checker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the travel-time matrix between all reservation addresses
    Matrix {
        /// Reservations CSV
        #[arg(long)]
        reservations: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check optimizer scenarios against reservations and participants
    Check {
        #[arg(long)]
        reservations: PathBuf,
        #[arg(long)]
        participants: PathBuf,
        /// Optimizer reply containing {"scenarios": [...]}
        #[arg(long)]
        scenarios: PathBuf,
        /// Check travel against a freshly built matrix instead of the
        /// scenario's own travel minutes
        #[arg(long)]
        with_travel: bool,
        /// Require min <= members <= max without the ±1 slack
        #[arg(long)]
        strict_capacity: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the reservation, roster and travel-time text fed to the optimizer
    Context {
        #[arg(long)]
        reservations: PathBuf,
        #[arg(long)]
        participants: PathBuf,
    },
    /// Export one scenario as CSV, one row per assignment
    Export {
        #[arg(long)]
        scenarios: PathBuf,
        #[arg(long)]
        scenario_id: u32,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
