//! Output formatters
//!
//! Provides trait-based output formatting for CLI reports.

pub mod gpx;
pub mod json;
pub mod text;

use crate::commute::RouteResult;
use crate::coord::{Coordinate, DistanceMeasurement, NamedPlace};
use crate::error::Result;
use crate::proximity::ProximityResult;
use serde::{Deserialize, Serialize};

/// Anything a command can print
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// Geocoding matches, best first
    Places { places: Vec<NamedPlace> },
    /// Straight-line distance between two points
    Distance {
        from: Coordinate,
        to: Coordinate,
        distance: DistanceMeasurement,
    },
    /// A resolved commute
    Route { route: RouteResult },
    /// Proximity search results
    Nearby {
        origin: Coordinate,
        #[serde(skip_serializing_if = "Option::is_none")]
        origin_name: Option<String>,
        radius_meters: f64,
        results: Vec<ProximityResult>,
    },
}

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a report
    fn format(&self, report: &Report) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &gpx::GpxFormatter,
    ]
    .iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}
