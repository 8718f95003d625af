//! Geocoding module
//!
//! Provides the `MapService` boundary to the external mapping service and the
//! `Geocoder` adapter that every higher-level operation goes through.

pub mod cancel;
#[cfg(test)]
pub mod fake;
pub mod mapbox;

use crate::constants::api::MAPBOX_MAX_LIMIT;
use crate::coord::{Coordinate, NamedPlace, TravelMode};
use crate::error::{Error, Result};
use cancel::{guarded, CancelToken};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// One candidate route returned by the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total duration in seconds
    pub duration_secs: f64,
    /// Path geometry in travel order
    pub geometry: Vec<Coordinate>,
}

/// Trait for mapping-service backends
///
/// Implementations perform exactly one outbound request per call and return
/// results in the service's own ranking order. Timeouts and cancellation are
/// applied by `Geocoder`, not here.
pub trait MapService: Send + Sync {
    /// Forward geocode a query, returning at most `limit` features
    fn forward(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<NamedPlace>>> + Send;

    /// Reverse geocode a coordinate, best match first
    fn reverse(&self, coord: Coordinate) -> impl Future<Output = Result<Vec<NamedPlace>>> + Send;

    /// Request routes between two points; an empty vec means no route exists
    fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> impl Future<Output = Result<Vec<RouteCandidate>>> + Send;
}

/// Geocoder adapter
///
/// Wraps a `MapService` with input validation, range checking of returned
/// coordinates, per-call timeouts and cancellation.
#[derive(Debug, Clone)]
pub struct Geocoder<S> {
    service: S,
    timeout: Duration,
}

impl<S: MapService> Geocoder<S> {
    /// Create a geocoder with a per-call timeout
    pub fn new(service: S, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve free text to up to `max_results` places
    ///
    /// Order is the service's relevance ranking. Zero matches is an empty vec,
    /// not an error.
    pub async fn forward_geocode(
        &self,
        query: &str,
        max_results: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<NamedPlace>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("Query must not be empty".to_string()));
        }
        if max_results == 0 {
            return Err(Error::InvalidInput(
                "max_results must be positive".to_string(),
            ));
        }

        let limit = max_results.min(MAPBOX_MAX_LIMIT);
        debug!(query, limit, "forward geocode");

        let places = guarded(self.service.forward(query, limit), self.timeout, cancel, || {
            Error::GeocodingUnavailable(format!(
                "Forward geocode timed out after {:?}",
                self.timeout
            ))
        })
        .await?;

        Ok(keep_valid(places).into_iter().take(max_results).collect())
    }

    /// Resolve a coordinate to its best-matching display name
    pub async fn reverse_geocode(
        &self,
        coord: Coordinate,
        cancel: &CancelToken,
    ) -> Result<NamedPlace> {
        coord.validate()?;
        debug!(%coord, "reverse geocode");

        let places = guarded(self.service.reverse(coord), self.timeout, cancel, || {
            Error::GeocodingUnavailable(format!(
                "Reverse geocode timed out after {:?}",
                self.timeout
            ))
        })
        .await?;

        keep_valid(places)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("No place found at {}", coord)))
    }

    /// Fetch candidate routes between two validated points
    pub async fn fetch_routes(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
        cancel: &CancelToken,
    ) -> Result<Vec<RouteCandidate>> {
        from.validate()?;
        to.validate()?;
        debug!(%from, %to, %mode, "directions");

        guarded(
            self.service.directions(from, to, mode),
            self.timeout,
            cancel,
            || Error::RoutingUnavailable(format!("Routing timed out after {:?}", self.timeout)),
        )
        .await
    }
}

/// Drop features whose coordinates are out of range
fn keep_valid(places: Vec<NamedPlace>) -> Vec<NamedPlace> {
    places
        .into_iter()
        .filter(|place| {
            let ok = place.coordinate.is_valid();
            if !ok {
                warn!(
                    name = %place.display_name,
                    "dropping feature with out-of-range coordinate"
                );
            }
            ok
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::FakeMapService;

    fn place(name: &str, lng: f64, lat: f64) -> NamedPlace {
        NamedPlace::new(Coordinate::new(lng, lat), name)
    }

    fn geocoder(service: FakeMapService) -> Geocoder<FakeMapService> {
        Geocoder::new(service, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_forward_preserves_order_and_truncates() {
        let service = FakeMapService::new().with_forward(
            "marina",
            vec![
                place("Dubai Marina", 55.14, 25.08),
                place("Marina Mall", 54.32, 24.47),
                place("Marina Walk", 55.13, 25.07),
            ],
        );
        let geocoder = geocoder(service);

        let results = geocoder
            .forward_geocode("marina", 2, &CancelToken::none())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].display_name, "Dubai Marina");
        assert_eq!(results[1].display_name, "Marina Mall");
    }

    #[tokio::test]
    async fn test_forward_clamps_service_limit() {
        let geocoder = geocoder(FakeMapService::new());

        geocoder
            .forward_geocode("anything", 50, &CancelToken::none())
            .await
            .unwrap();

        assert_eq!(geocoder.service().calls(), vec!["forward:anything:10".to_string()]);
    }

    #[tokio::test]
    async fn test_forward_zero_features_is_empty() {
        let geocoder = geocoder(FakeMapService::new());

        let results = geocoder
            .forward_geocode("nowhere at all", 5, &CancelToken::none())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_forward_rejects_bad_input() {
        let geocoder = geocoder(FakeMapService::new());

        let empty = geocoder.forward_geocode("   ", 5, &CancelToken::none()).await;
        assert!(matches!(empty, Err(Error::InvalidInput(_))));

        let zero = geocoder.forward_geocode("dubai", 0, &CancelToken::none()).await;
        assert!(matches!(zero, Err(Error::InvalidInput(_))));
        assert!(geocoder.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_forward_drops_invalid_coordinates() {
        let service = FakeMapService::new().with_forward(
            "broken",
            vec![place("Bad", 200.0, 10.0), place("Good", 55.0, 25.0)],
        );
        let geocoder = geocoder(service);

        let results = geocoder
            .forward_geocode("broken", 5, &CancelToken::none())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Good");
    }

    #[tokio::test]
    async fn test_forward_service_failure() {
        let geocoder = geocoder(FakeMapService::new().failing_geocoding());

        let result = geocoder.forward_geocode("dubai", 1, &CancelToken::none()).await;
        assert!(matches!(result, Err(Error::GeocodingUnavailable(_))));
    }

    #[tokio::test]
    async fn test_forward_timeout() {
        let service = FakeMapService::new().with_delay(Duration::from_secs(30));
        let geocoder = Geocoder::new(service, Duration::from_millis(20));

        let result = geocoder.forward_geocode("dubai", 1, &CancelToken::none()).await;
        assert!(matches!(result, Err(Error::GeocodingUnavailable(_))));
    }

    #[tokio::test]
    async fn test_reverse_found() {
        let geocoder = geocoder(FakeMapService::new().with_reverse_name("Business Bay, Dubai"));

        let place = geocoder
            .reverse_geocode(Coordinate::new(55.26, 25.18), &CancelToken::none())
            .await
            .unwrap();
        assert_eq!(place.display_name, "Business Bay, Dubai");
        assert_eq!(place.coordinate, Coordinate::new(55.26, 25.18));
    }

    #[tokio::test]
    async fn test_reverse_not_found() {
        let geocoder = geocoder(FakeMapService::new());

        let result = geocoder
            .reverse_geocode(Coordinate::new(0.0, 0.0), &CancelToken::none())
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reverse_invalid_coordinate() {
        let geocoder = geocoder(FakeMapService::new().with_reverse_name("x"));

        let result = geocoder
            .reverse_geocode(Coordinate::new(0.0, 95.0), &CancelToken::none())
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reverse_cancelled() {
        let (handle, token) = CancelToken::pair();
        handle.cancel();
        let geocoder = geocoder(FakeMapService::new().with_reverse_name("x"));

        let result = geocoder.reverse_geocode(Coordinate::new(1.0, 1.0), &token).await;
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(geocoder.service().calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_routes_timeout_is_routing_error() {
        let service = FakeMapService::new().with_delay(Duration::from_secs(30));
        let geocoder = Geocoder::new(service, Duration::from_millis(20));

        let result = geocoder
            .fetch_routes(
                Coordinate::new(55.0, 25.0),
                Coordinate::new(55.1, 25.1),
                TravelMode::Walking,
                &CancelToken::none(),
            )
            .await;
        assert!(matches!(result, Err(Error::RoutingUnavailable(_))));
    }
}
