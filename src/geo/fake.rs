//! In-memory `MapService` for tests

use crate::coord::distance::haversine_distance;
use crate::coord::{Coordinate, NamedPlace, TravelMode};
use crate::error::{Error, Result};
use crate::geo::{MapService, RouteCandidate};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted mapping service; records every call it receives
#[derive(Debug, Default)]
pub struct FakeMapService {
    forward: HashMap<String, Vec<NamedPlace>>,
    reverse_name: Option<String>,
    routes: Option<Vec<RouteCandidate>>,
    fail_geocoding: bool,
    fail_routing: bool,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeMapService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forward(mut self, query: &str, places: Vec<NamedPlace>) -> Self {
        self.forward.insert(query.to_string(), places);
        self
    }

    pub fn with_reverse_name(mut self, name: &str) -> Self {
        self.reverse_name = Some(name.to_string());
        self
    }

    /// Fixed routes; without this a straight-line route is returned
    pub fn with_routes(mut self, routes: Vec<RouteCandidate>) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn failing_geocoding(mut self) -> Self {
        self.fail_geocoding = true;
        self
    }

    pub fn failing_routing(mut self) -> Self {
        self.fail_routing = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl MapService for FakeMapService {
    async fn forward(&self, query: &str, limit: usize) -> Result<Vec<NamedPlace>> {
        self.record(format!("forward:{}:{}", query, limit));
        self.pause().await;
        if self.fail_geocoding {
            return Err(Error::GeocodingUnavailable("fake outage".to_string()));
        }
        Ok(self
            .forward
            .get(query)
            .map(|places| places.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn reverse(&self, coord: Coordinate) -> Result<Vec<NamedPlace>> {
        self.record(format!("reverse:{}", coord));
        self.pause().await;
        if self.fail_geocoding {
            return Err(Error::GeocodingUnavailable("fake outage".to_string()));
        }
        Ok(self
            .reverse_name
            .iter()
            .map(|name| NamedPlace::new(coord, name.clone()))
            .collect())
    }

    async fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>> {
        self.record(format!("directions:{}:{}:{}", from, to, mode));
        self.pause().await;
        if self.fail_routing {
            return Err(Error::RoutingUnavailable("fake outage".to_string()));
        }
        if let Some(routes) = &self.routes {
            return Ok(routes.clone());
        }
        let distance = haversine_distance(from, to).meters;
        Ok(vec![RouteCandidate {
            distance_meters: distance,
            duration_secs: distance / 10.0,
            geometry: vec![from, to],
        }])
    }
}
