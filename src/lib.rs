//! career-geo: geocoding, commute analysis and proximity search
//!
//! A library and CLI tool backing the location features of a career-services
//! platform: finding jobs and campuses near a user, and estimating commutes.
//!
//! ## Features
//!
//! - Forward/reverse geocoding through a pluggable `MapService` (Mapbox included)
//! - Haversine great-circle distance
//! - Commute analysis for driving, walking and cycling
//! - Radius search over caller-supplied candidates, closest first
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use career_geo::coord::Coordinate;
//! use career_geo::coord::distance::haversine_distance;
//! use career_geo::proximity::{find_nearby, ProximityCandidate};
//!
//! let origin = Coordinate::new(55.2708, 25.2048); // Downtown Dubai (lng, lat)
//! let jobs = vec![
//!     ProximityCandidate::new("job1", Coordinate::new(55.3708, 25.2548)),
//!     ProximityCandidate::new("edu1", Coordinate::new(55.4708, 25.1548)),
//! ];
//!
//! let nearby = find_nearby(origin, 15_000.0, &jobs, 5);
//! assert_eq!(nearby.len(), 1);
//! println!("{} is {}", nearby[0].candidate.id, nearby[0].distance.display_km());
//!
//! let d = haversine_distance(origin, jobs[1].coordinate);
//! assert!(d.meters > 15_000.0);
//! ```

pub mod cli;
pub mod commute;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod proximity;
pub mod server;

// Re-export commonly used types
pub use commute::{analyze_commute, Endpoint, RouteResult};
pub use config::Config;
pub use coord::{Coordinate, DistanceMeasurement, NamedPlace, TravelMode};
pub use error::{Error, Result};
pub use geo::cancel::{CancelHandle, CancelToken};
pub use geo::{Geocoder, MapService};
pub use proximity::{find_nearby, find_nearby_by_query, ProximityCandidate, ProximityResult};
