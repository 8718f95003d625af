//! Commute analysis
//!
//! Resolves two endpoints (free text or coordinates) concurrently, then asks
//! the routing service for the primary route between them.

use crate::coord::{Coordinate, DistanceMeasurement, NamedPlace, TravelMode};
use crate::error::{Error, Result};
use crate::geo::cancel::CancelToken;
use crate::geo::{Geocoder, MapService};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// One end of a commute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Coordinate(Coordinate),
    Place(String),
}

impl Endpoint {
    /// Interpret "lng,lat" text as a coordinate, anything else as a place query
    pub fn parse(input: &str) -> Self {
        match Coordinate::from_str(input) {
            Ok(coord) => Self::Coordinate(coord),
            Err(_) => Self::Place(input.to_string()),
        }
    }
}

impl From<Coordinate> for Endpoint {
    fn from(coord: Coordinate) -> Self {
        Self::Coordinate(coord)
    }
}

impl From<&str> for Endpoint {
    fn from(query: &str) -> Self {
        Self::Place(query.to_string())
    }
}

/// Outcome of a commute query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub origin: NamedPlace,
    pub destination: NamedPlace,
    pub mode: TravelMode,
    pub distance: DistanceMeasurement,
    /// Seconds
    pub duration_secs: f64,
    pub geometry: Vec<Coordinate>,
}

impl RouteResult {
    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs / 60.0
    }
}

/// Analyze the commute between two endpoints for a travel mode
///
/// Text endpoints take the top-ranked geocoding hit; coordinate endpoints are
/// used as-is and only reverse geocoded for their display name. The routing
/// call starts once both endpoints are resolved.
pub async fn analyze_commute<S: MapService>(
    geocoder: &Geocoder<S>,
    origin: &Endpoint,
    destination: &Endpoint,
    mode: TravelMode,
    cancel: &CancelToken,
) -> Result<RouteResult> {
    let (origin, destination) = tokio::try_join!(
        resolve_endpoint(geocoder, origin, cancel),
        resolve_endpoint(geocoder, destination, cancel),
    )?;

    let routes = geocoder
        .fetch_routes(origin.coordinate, destination.coordinate, mode, cancel)
        .await?;

    let primary = routes.into_iter().next().ok_or_else(|| {
        Error::NoRouteFound(format!(
            "No {} route from {} to {}",
            mode, origin.display_name, destination.display_name
        ))
    })?;

    if !primary.distance_meters.is_finite()
        || primary.distance_meters < 0.0
        || !primary.duration_secs.is_finite()
        || primary.duration_secs < 0.0
    {
        return Err(Error::RoutingUnavailable(format!(
            "Malformed route: distance {} duration {}",
            primary.distance_meters, primary.duration_secs
        )));
    }

    debug!(
        distance = primary.distance_meters,
        duration = primary.duration_secs,
        "commute resolved"
    );

    Ok(RouteResult {
        origin,
        destination,
        mode,
        distance: DistanceMeasurement::from_meters(primary.distance_meters),
        duration_secs: primary.duration_secs,
        geometry: primary.geometry,
    })
}

/// Resolve one endpoint to a named place
async fn resolve_endpoint<S: MapService>(
    geocoder: &Geocoder<S>,
    endpoint: &Endpoint,
    cancel: &CancelToken,
) -> Result<NamedPlace> {
    match endpoint {
        Endpoint::Place(query) => geocoder
            .forward_geocode(query, 1, cancel)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("No place matches '{}'", query))),
        Endpoint::Coordinate(coord) => {
            let named = geocoder.reverse_geocode(*coord, cancel).await?;
            Ok(NamedPlace {
                coordinate: *coord,
                ..named
            })
        }
    }
}
