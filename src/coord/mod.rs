//! Geographic value types
//!
//! This module handles:
//! - Coordinates in (longitude, latitude) order
//! - Named places produced by geocoding
//! - Distance measurements and travel modes

pub mod distance;

use crate::constants::geo::{MAX_LATITUDE, MAX_LONGITUDE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A geographic coordinate (longitude, latitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Create a new coordinate. Arguments are in (longitude, latitude) order.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Validate that the coordinate is finite and within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || self.lat.abs() > MAX_LATITUDE {
            return Err(Error::InvalidInput(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || self.lng.abs() > MAX_LONGITUDE {
            return Err(Error::InvalidInput(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Shorthand for `validate().is_ok()`
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lng, self.lat)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = Error;

    /// Parse "lng,lat" text. The result is range-checked.
    fn from_str(s: &str) -> Result<Self> {
        let (lng, lat) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidInput(format!("Expected \"lng,lat\", got: {}", s)))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("Invalid longitude: {}", lng.trim())))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("Invalid latitude: {}", lat.trim())))?;
        let coord = Self::new(lng, lat);
        coord.validate()?;
        Ok(coord)
    }
}

/// A coordinate with a display name, as produced by geocoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPlace {
    pub coordinate: Coordinate,
    pub display_name: String,

    /// Place-type tags reported by the service (e.g. "address", "locality")
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub place_types: BTreeSet<String>,
}

impl NamedPlace {
    /// Create a place without type tags
    pub fn new(coordinate: Coordinate, display_name: impl Into<String>) -> Self {
        Self {
            coordinate,
            display_name: display_name.into(),
            place_types: BTreeSet::new(),
        }
    }

    /// Attach place-type tags
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.place_types = types.into_iter().map(Into::into).collect();
        self
    }
}

/// A non-negative distance in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceMeasurement {
    pub meters: f64,
}

impl DistanceMeasurement {
    /// Create a measurement, clamping negative input to zero
    pub fn from_meters(meters: f64) -> Self {
        Self {
            meters: meters.max(0.0),
        }
    }

    pub fn kilometers(&self) -> f64 {
        self.meters / 1000.0
    }

    /// Kilometers rounded to one decimal, e.g. "11.9 km"
    pub fn display_km(&self) -> String {
        format!("{:.1} km", self.kilometers())
    }
}

/// Travel mode passed through to the routing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    /// Routing profile name for this mode
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl Default for TravelMode {
    fn default() -> Self {
        Self::Driving
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile())
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(Self::Driving),
            "walking" | "walk" => Ok(Self::Walking),
            "cycling" | "cycle" | "bike" => Ok(Self::Cycling),
            _ => Err(format!("Unknown travel mode: {}", s)),
        }
    }
}

/// List all travel modes
pub fn available_modes() -> Vec<TravelMode> {
    vec![TravelMode::Driving, TravelMode::Walking, TravelMode::Cycling]
}
