//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod commute;
pub mod config;
pub mod distance;
pub mod geocode;
pub mod nearby;
pub mod serve;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{get_formatter, Report};
use crate::geo::cancel::CancelToken;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Geocoding, commute and proximity search for career services
#[derive(Parser)]
#[command(name = "career-geo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a place name to coordinates
    Geocode(geocode::GeocodeArgs),

    /// Resolve coordinates to a place name
    Reverse(geocode::ReverseArgs),

    /// Great-circle distance between two points
    Distance(distance::DistanceArgs),

    /// Route distance and duration between two places
    Commute(commute::CommuteArgs),

    /// Find candidates near a point or place
    Nearby(nearby::NearbyArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    });

    match cli.command {
        Commands::Geocode(args) => geocode::run(args).await,
        Commands::Reverse(args) => geocode::run_reverse(args).await,
        Commands::Distance(args) => distance::run(args),
        Commands::Commute(args) => commute::run(args).await,
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize tracing; RUST_LOG overrides `default_level`
fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// A token that is cancelled when the user presses Ctrl-C
fn cancel_on_ctrl_c() -> CancelToken {
    let (handle, token) = CancelToken::pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });
    token
}

/// Format a report and print it, or write it to `output`
fn emit(
    report: &Report,
    format: Option<String>,
    output: Option<String>,
    config: &Config,
) -> Result<()> {
    let format = format.unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;
    let rendered = formatter.format(report)?;

    if let Some(path) = output {
        std::fs::write(&path, &rendered)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
