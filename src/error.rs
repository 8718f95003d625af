//! Error types for career-geo

use thiserror::Error;

/// Main error type for career-geo operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Geocoding unavailable: {0}")]
    GeocodingUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Routing unavailable: {0}")]
    RoutingUnavailable(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Stable machine-readable code for this error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GeocodingUnavailable(_) => "GEOCODING_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::RoutingUnavailable(_) => "ROUTING_UNAVAILABLE",
            Self::NoRouteFound(_) => "NO_ROUTE_FOUND",
            Self::Cancelled => "CANCELLED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) | Self::Json(_) | Self::Server(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for career-geo operations
pub type Result<T> = std::result::Result<T, Error>;
