//! Commute command handler

use crate::cli::{cancel_on_ctrl_c, emit};
use crate::commute::{analyze_commute, Endpoint};
use crate::config::Config;
use crate::coord::TravelMode;
use crate::error::{Error, Result};
use crate::format::Report;
use clap::Args;
use std::str::FromStr;

/// Commute command arguments
#[derive(Args)]
pub struct CommuteArgs {
    /// Origin: place name or "lng,lat"
    #[arg(allow_hyphen_values = true)]
    pub from: String,

    /// Destination: place name or "lng,lat"
    #[arg(allow_hyphen_values = true)]
    pub to: String,

    /// Travel mode: driving, walking or cycling
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the commute command
pub async fn run(args: CommuteArgs) -> Result<()> {
    let config = Config::load()?;
    let geocoder = config.geocoder()?;

    let mode_str = args.mode.unwrap_or_else(|| config.defaults.mode.clone());
    let mode = TravelMode::from_str(&mode_str).map_err(Error::InvalidInput)?;

    let route = analyze_commute(
        &geocoder,
        &Endpoint::parse(&args.from),
        &Endpoint::parse(&args.to),
        mode,
        &cancel_on_ctrl_c(),
    )
    .await?;

    emit(&Report::Route { route }, args.format, args.output, &config)
}
