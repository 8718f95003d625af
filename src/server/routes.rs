//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::commute::{analyze_commute, Endpoint, RouteResult};
use crate::coord::distance::haversine_distance;
use crate::coord::{available_modes, Coordinate, DistanceMeasurement, NamedPlace, TravelMode};
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::cancel::CancelToken;
use crate::geo::MapService;
use crate::proximity::{
    category_filter, find_nearby, find_nearby_by_query, find_nearby_filtered, NearbySearch,
    ProximityCandidate, ProximityResult,
};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Create the API router
pub fn create_router<S: MapService + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler::<S>))
        .route("/api/geocode", get(geocode_handler::<S>))
        .route("/api/reverse", get(reverse_handler::<S>))
        .route("/api/distance", post(distance_handler))
        .route("/api/commute", post(commute_handler::<S>))
        .route("/api/nearby", post(nearby_handler::<S>))
        .route("/api/nearby/search", post(nearby_search_handler::<S>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_INPUT" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" | "NO_ROUTE_FOUND" => StatusCode::NOT_FOUND,
            "GEOCODING_UNAVAILABLE" | "ROUTING_UNAVAILABLE" => StatusCode::BAD_GATEWAY,
            "CANCELLED" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError {
            code: err.kind().to_string(),
            error: err.to_string(),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Region bias applied to forward geocoding
    pub country: String,
    /// Per-call timeout for mapping-service requests
    pub timeout_secs: u64,
    /// Accepted travel modes
    pub modes: Vec<TravelMode>,
    /// Report formats the CLI can render
    pub formats: Vec<FormatInfo>,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<S: MapService>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        country: state.config.mapbox.country.clone(),
        timeout_secs: state.geocoder.timeout().as_secs(),
        modes: available_modes(),
        formats: available_formats(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Forward geocode query parameters
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub q: String,
    pub limit: Option<usize>,
}

/// Forward geocode
///
/// GET /api/geocode?q=...&limit=...
async fn geocode_handler<S: MapService>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Vec<NamedPlace>>, ApiError> {
    let limit = params.limit.unwrap_or(state.config.defaults.max_results);
    let places = state
        .geocoder
        .forward_geocode(&params.q, limit, &CancelToken::none())
        .await?;
    Ok(Json(places))
}

/// Reverse geocode query parameters
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lng: f64,
    pub lat: f64,
}

/// Reverse geocode
///
/// GET /api/reverse?lng=...&lat=...
async fn reverse_handler<S: MapService>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<NamedPlace>, ApiError> {
    let place = state
        .geocoder
        .reverse_geocode(Coordinate::new(params.lng, params.lat), &CancelToken::none())
        .await?;
    Ok(Json(place))
}

/// Distance request body
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

/// Distance response
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance: DistanceMeasurement,
}

/// Great-circle distance
///
/// POST /api/distance
async fn distance_handler(
    Json(req): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
    req.from.validate()?;
    req.to.validate()?;

    Ok(Json(DistanceResponse {
        from: req.from,
        to: req.to,
        distance: haversine_distance(req.from, req.to),
    }))
}

/// Commute request body
#[derive(Debug, Deserialize)]
pub struct CommuteRequest {
    pub origin: Endpoint,
    pub destination: Endpoint,
    pub mode: Option<TravelMode>,
}

/// Analyze a commute
///
/// POST /api/commute
async fn commute_handler<S: MapService>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CommuteRequest>,
) -> Result<Json<RouteResult>, ApiError> {
    let mode = match req.mode {
        Some(mode) => mode,
        None => state
            .config
            .defaults
            .mode
            .parse::<TravelMode>()
            .map_err(Error::Config)?,
    };

    let route = analyze_commute(
        &state.geocoder,
        &req.origin,
        &req.destination,
        mode,
        &CancelToken::none(),
    )
    .await?;
    Ok(Json(route))
}

/// Proximity request body
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    pub origin: Coordinate,
    pub radius: Option<f64>,
    pub max_results: Option<usize>,
    pub category: Option<String>,
    pub candidates: Vec<ProximityCandidate>,
}

/// Proximity search around a coordinate
///
/// POST /api/nearby
async fn nearby_handler<S: MapService>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NearbyRequest>,
) -> Result<Json<Vec<ProximityResult>>, ApiError> {
    req.origin.validate()?;

    let radius = req.radius.unwrap_or(state.config.defaults.radius);
    let max_results = req.max_results.unwrap_or(state.config.defaults.max_results);

    let results = match &req.category {
        Some(category) => find_nearby_filtered(
            req.origin,
            radius,
            &req.candidates,
            max_results,
            category_filter(category),
        ),
        None => find_nearby(req.origin, radius, &req.candidates, max_results),
    };
    Ok(Json(results))
}

/// Text-anchored proximity request body
#[derive(Debug, Deserialize)]
pub struct NearbySearchRequest {
    pub query: String,
    pub radius: Option<f64>,
    pub max_results: Option<usize>,
    pub category: Option<String>,
    pub candidates: Vec<ProximityCandidate>,
}

/// Proximity search around a geocoded place
///
/// POST /api/nearby/search
async fn nearby_search_handler<S: MapService>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NearbySearchRequest>,
) -> Result<Json<NearbySearch>, ApiError> {
    let radius = req.radius.unwrap_or(state.config.defaults.radius);
    let max_results = req.max_results.unwrap_or(state.config.defaults.max_results);

    let candidates: Vec<ProximityCandidate> = match &req.category {
        Some(category) => {
            let keep = category_filter(category);
            req.candidates.into_iter().filter(|c| keep(c)).collect()
        }
        None => req.candidates,
    };

    let search = find_nearby_by_query(
        &state.geocoder,
        &req.query,
        radius,
        &candidates,
        max_results,
        &CancelToken::none(),
    )
    .await?;
    Ok(Json(search))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geo::fake::FakeMapService;
    use crate::geo::Geocoder;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    fn downtown() -> NamedPlace {
        NamedPlace::new(Coordinate::new(55.2708, 25.2048), "Downtown Dubai")
    }

    fn create_test_router(service: FakeMapService) -> Router {
        let geocoder = Geocoder::new(service, Duration::from_secs(5));
        create_router(Arc::new(AppState::new(Config::default(), geocoder)))
    }

    fn default_service() -> FakeMapService {
        FakeMapService::new()
            .with_forward("downtown", vec![downtown()])
            .with_forward(
                "festival city",
                vec![NamedPlace::new(Coordinate::new(55.3708, 25.2548), "Festival City")],
            )
            .with_reverse_name("Al Quoz, Dubai")
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn scenario_candidates() -> serde_json::Value {
        serde_json::json!([
            {
                "id": "job1",
                "coordinate": {"lng": 55.3708, "lat": 25.2548},
                "name": "Data Analyst",
                "category": "job"
            },
            {
                "id": "edu1",
                "coordinate": {"lng": 55.4708, "lat": 25.1548},
                "name": "Campus",
                "category": "education"
            }
        ])
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_test_router(default_service());

        let response = app.oneshot(get_request("/api/status")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let status: StatusResponse = body_json(response).await;
        assert!(status.running);
        assert_eq!(status.country, "ae");
        assert_eq!(status.timeout_secs, 5);
        assert_eq!(status.modes.len(), 3);
        assert!(status.formats.iter().any(|f| f.name == "gpx"));
    }

    #[tokio::test]
    async fn test_geocode_endpoint() {
        let app = create_test_router(default_service());

        let response = app.oneshot(get_request("/api/geocode?q=downtown&limit=3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let places: Vec<NamedPlace> = body_json(response).await;
        assert_eq!(places, vec![downtown()]);
    }

    #[tokio::test]
    async fn test_geocode_no_matches_is_empty() {
        let app = create_test_router(default_service());

        let response = app.oneshot(get_request("/api/geocode?q=atlantis")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let places: Vec<NamedPlace> = body_json(response).await;
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_geocode_unavailable() {
        let app = create_test_router(FakeMapService::new().failing_geocoding());

        let response = app.oneshot(get_request("/api/geocode?q=downtown")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "GEOCODING_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_reverse_not_found() {
        let app = create_test_router(FakeMapService::new());

        let response = app.oneshot(get_request("/api/reverse?lng=55.2&lat=25.1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_reverse_invalid_coordinate() {
        let app = create_test_router(default_service());

        let response = app.oneshot(get_request("/api/reverse?lng=55.2&lat=125.1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_distance_endpoint() {
        let app = create_test_router(default_service());

        let response = app
            .oneshot(post_json(
                "/api/distance",
                serde_json::json!({
                    "from": {"lng": 55.2708, "lat": 25.2048},
                    "to": {"lng": 55.3708, "lat": 25.2548}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let distance: DistanceResponse = body_json(response).await;
        assert!((distance.distance.meters - 11_493.0).abs() < 115.0);
    }

    #[tokio::test]
    async fn test_commute_endpoint() {
        let app = create_test_router(default_service());

        let response = app
            .oneshot(post_json(
                "/api/commute",
                serde_json::json!({
                    "origin": "downtown",
                    "destination": {"lng": 55.3708, "lat": 25.2548},
                    "mode": "walking"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let route: RouteResult = body_json(response).await;
        assert_eq!(route.origin.display_name, "Downtown Dubai");
        assert_eq!(route.destination.display_name, "Al Quoz, Dubai");
        assert_eq!(route.mode, TravelMode::Walking);
    }

    #[tokio::test]
    async fn test_commute_no_route() {
        let app = create_test_router(default_service().with_routes(vec![]));

        let response = app
            .oneshot(post_json(
                "/api/commute",
                serde_json::json!({"origin": "downtown", "destination": "festival city"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "NO_ROUTE_FOUND");
    }

    #[tokio::test]
    async fn test_nearby_endpoint() {
        let app = create_test_router(default_service());

        let response = app
            .oneshot(post_json(
                "/api/nearby",
                serde_json::json!({
                    "origin": {"lng": 55.2708, "lat": 25.2048},
                    "radius": 15000.0,
                    "max_results": 5,
                    "candidates": scenario_candidates()
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let results: Vec<ProximityResult> = body_json(response).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate.id, "job1");
    }

    #[tokio::test]
    async fn test_nearby_category() {
        let app = create_test_router(default_service());

        let response = app
            .oneshot(post_json(
                "/api/nearby",
                serde_json::json!({
                    "origin": {"lng": 55.2708, "lat": 25.2048},
                    "radius": 50000.0,
                    "category": "Education",
                    "candidates": scenario_candidates()
                }),
            ))
            .await
            .unwrap();

        let results: Vec<ProximityResult> = body_json(response).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate.id, "edu1");
    }

    #[tokio::test]
    async fn test_nearby_search_endpoint() {
        let app = create_test_router(default_service());

        let response = app
            .oneshot(post_json(
                "/api/nearby/search",
                serde_json::json!({
                    "query": "downtown",
                    "candidates": scenario_candidates()
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let search: NearbySearch = body_json(response).await;
        assert_eq!(search.origin.display_name, "Downtown Dubai");
        assert_eq!(search.results.len(), 1);
    }
}
