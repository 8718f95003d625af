//! Server shared state
//!
//! Holds configuration and the geocoder shared by all handlers.

use crate::config::Config;
use crate::geo::{Geocoder, MapService};
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState<S> {
    /// Configuration
    pub config: Config,

    /// Geocoder over the configured mapping service
    pub geocoder: Geocoder<S>,

    started: Instant,
}

impl<S: MapService> AppState<S> {
    /// Create new application state
    pub fn new(config: Config, geocoder: Geocoder<S>) -> Self {
        Self {
            config,
            geocoder,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
