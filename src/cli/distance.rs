//! Distance command handler
//!
//! Pure computation; no network access.

use crate::cli::emit;
use crate::config::Config;
use crate::coord::distance::haversine_distance;
use crate::coord::Coordinate;
use crate::error::Result;
use crate::format::Report;
use clap::Args;

/// Distance command arguments
#[derive(Args)]
pub struct DistanceArgs {
    /// First point as "lng,lat"
    #[arg(allow_hyphen_values = true)]
    pub from: Coordinate,

    /// Second point as "lng,lat"
    #[arg(allow_hyphen_values = true)]
    pub to: Coordinate,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the distance command
pub fn run(args: DistanceArgs) -> Result<()> {
    let config = Config::load()?;

    let report = Report::Distance {
        from: args.from,
        to: args.to,
        distance: haversine_distance(args.from, args.to),
    };

    emit(&report, args.format, args.output, &config)
}
