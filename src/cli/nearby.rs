//! Nearby command handler
//!
//! Candidates come from a JSON file of `{id, coordinate: {lng, lat}, name, category}`.

use crate::cli::{cancel_on_ctrl_c, emit};
use crate::config::Config;
use crate::coord::Coordinate;
use crate::error::Result;
use crate::format::Report;
use crate::proximity::{
    category_filter, find_nearby, find_nearby_by_query, CandidateFile,
    CandidateProvider,
};
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// JSON file holding the candidate list
    #[arg(long, short = 'c')]
    pub candidates: String,

    /// Search origin as "lng,lat"
    #[arg(long, allow_hyphen_values = true, conflicts_with = "query")]
    pub at: Option<Coordinate>,

    /// Search origin as a place name (geocoded)
    #[arg(long, short = 'q', required_unless_present = "at")]
    pub query: Option<String>,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Only candidates in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    let config = Config::load()?;
    let radius = args.radius.unwrap_or(config.defaults.radius);
    let limit = args.limit.unwrap_or(config.defaults.max_results);

    let mut candidates = CandidateFile::new(&args.candidates).candidates()?;
    if let Some(category) = &args.category {
        let keep = category_filter(category);
        candidates.retain(|c| keep(c));
    }

    let report = if let Some(origin) = args.at {
        Report::Nearby {
            origin,
            origin_name: None,
            radius_meters: radius,
            results: find_nearby(origin, radius, &candidates, limit),
        }
    } else {
        let query = args.query.unwrap_or_default();
        let geocoder = config.geocoder()?;
        let search =
            find_nearby_by_query(&geocoder, &query, radius, &candidates, limit, &cancel_on_ctrl_c())
                .await?;
        eprintln!("Geocoded to: {}", search.origin.display_name);
        Report::Nearby {
            origin: search.origin.coordinate,
            origin_name: Some(search.origin.display_name),
            radius_meters: radius,
            results: search.results,
        }
    };

    emit(&report, args.format, args.output, &config)
}
