//! career-geo CLI entry point
//!
//! Geocoding, commute and proximity search - CLI + web API

use career_geo::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
