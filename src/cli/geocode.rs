//! Geocode and reverse command handlers

use crate::cli::{cancel_on_ctrl_c, emit};
use crate::config::Config;
use crate::coord::Coordinate;
use crate::error::Result;
use crate::format::Report;
use clap::Args;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Place name or address
    pub query: String,

    /// Maximum number of matches
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Longitude
    #[arg(allow_hyphen_values = true)]
    pub lng: f64,

    /// Latitude
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the geocode command
pub async fn run(args: GeocodeArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = config.geocoder()?;
    let limit = args.limit.unwrap_or(config.defaults.max_results);

    let places = geocoder
        .forward_geocode(&args.query, limit, &cancel_on_ctrl_c())
        .await?;

    emit(&Report::Places { places }, args.format, args.output, &config)
}

/// Run the reverse command
pub async fn run_reverse(args: ReverseArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = config.geocoder()?;

    let place = geocoder
        .reverse_geocode(Coordinate::new(args.lng, args.lat), &cancel_on_ctrl_c())
        .await?;

    emit(
        &Report::Places {
            places: vec![place],
        },
        args.format,
        args.output,
        &config,
    )
}
