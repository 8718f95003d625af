//! Centralized constants for the career-geo crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Valid latitude range in degrees
    pub const MAX_LATITUDE: f64 = 90.0;

    /// Valid longitude range in degrees
    pub const MAX_LONGITUDE: f64 = 180.0;
}

/// External API endpoints
pub mod api {
    /// Mapbox REST API base URL
    pub const MAPBOX_BASE_URL: &str = "https://api.mapbox.com";

    /// Mapbox geocoding v5 path (relative to base URL)
    pub const MAPBOX_GEOCODING_PATH: &str = "/geocoding/v5/mapbox.places";

    /// Mapbox directions v5 path (relative to base URL)
    pub const MAPBOX_DIRECTIONS_PATH: &str = "/directions/v5/mapbox";

    /// Largest `limit` the geocoding endpoint accepts
    pub const MAPBOX_MAX_LIMIT: usize = 10;

    /// Environment variable that overrides the configured access token
    pub const TOKEN_ENV_VAR: &str = "CAREER_GEO_MAPBOX_TOKEN";
}
