//! Mapbox backend
//!
//! Geocoding v5 for forward/reverse lookups and Directions v5 for routing.
//! The access token is injected through `MapboxSettings` and is stripped
//! from any error text before it leaves this module.

use crate::constants::api::{MAPBOX_DIRECTIONS_PATH, MAPBOX_GEOCODING_PATH};
use crate::coord::{Coordinate, NamedPlace, TravelMode};
use crate::error::{Error, Result};
use crate::geo::{MapService, RouteCandidate};
use reqwest::StatusCode;
use serde::Deserialize;

const USER_AGENT: &str = concat!("career-geo/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the Mapbox API
#[derive(Debug, Clone)]
pub struct MapboxSettings {
    pub access_token: String,
    pub base_url: String,
    /// ISO 3166 alpha-2 country bias for forward geocoding
    pub country: Option<String>,
}

/// Mapbox mapping-service client
#[derive(Clone)]
pub struct MapboxClient {
    client: reqwest::Client,
    settings: MapboxSettings,
}

impl std::fmt::Debug for MapboxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxClient")
            .field("base_url", &self.settings.base_url)
            .field("country", &self.settings.country)
            .finish_non_exhaustive()
    }
}

/// Geocoding response
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// [lng, lat]
    center: [f64; 2],
    place_name: String,
    #[serde(default)]
    place_type: Vec<String>,
}

/// Directions response
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    distance: f64,
    duration: f64,
    geometry: LineString,
}

#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<[f64; 2]>,
}

impl MapboxClient {
    /// Create a new Mapbox client
    pub fn new(settings: MapboxSettings) -> Result<Self> {
        if settings.access_token.trim().is_empty() {
            return Err(Error::Config(
                "Mapbox access token is not configured".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    fn base(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }

    fn forward_url(&self, query: &str, limit: usize) -> String {
        let mut url = format!(
            "{}{}/{}.json?access_token={}&limit={}",
            self.base(),
            MAPBOX_GEOCODING_PATH,
            urlencoding::encode(query),
            urlencoding::encode(&self.settings.access_token),
            limit
        );
        if let Some(country) = self.settings.country.as_deref().filter(|c| !c.is_empty()) {
            url.push_str(&format!("&country={}", urlencoding::encode(country)));
        }
        url
    }

    fn reverse_url(&self, coord: Coordinate) -> String {
        format!(
            "{}{}/{},{}.json?access_token={}",
            self.base(),
            MAPBOX_GEOCODING_PATH,
            coord.lng,
            coord.lat,
            urlencoding::encode(&self.settings.access_token)
        )
    }

    fn directions_url(&self, from: Coordinate, to: Coordinate, mode: TravelMode) -> String {
        format!(
            "{}{}/{}/{},{};{},{}?geometries=geojson&overview=full&access_token={}",
            self.base(),
            MAPBOX_DIRECTIONS_PATH,
            mode.profile(),
            from.lng,
            from.lat,
            to.lng,
            to.lat,
            urlencoding::encode(&self.settings.access_token)
        )
    }

    /// GET a geocoding URL and parse its features
    async fn fetch_features(&self, url: &str) -> Result<Vec<NamedPlace>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            Error::GeocodingUnavailable(format!("Mapbox request failed: {}", e.without_url()))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::GeocodingUnavailable(format!(
                "Failed to read Mapbox response: {}",
                e.without_url()
            ))
        })?;

        features_from_response(status, &body)
    }
}

/// Interpret a geocoding response
///
/// Only a successful body can yield places, an empty `features` array
/// included. Any other status is a service failure.
fn features_from_response(status: StatusCode, body: &str) -> Result<Vec<NamedPlace>> {
    if !status.is_success() {
        return Err(Error::GeocodingUnavailable(format!(
            "Mapbox geocoding returned status: {}",
            status
        )));
    }
    parse_features(body)
}

/// Parse a geocoding response body
fn parse_features(body: &str) -> Result<Vec<NamedPlace>> {
    let collection: FeatureCollection = serde_json::from_str(body).map_err(|e| {
        Error::GeocodingUnavailable(format!("Failed to parse Mapbox geocoding response: {}", e))
    })?;

    Ok(collection
        .features
        .into_iter()
        .map(|f| {
            NamedPlace::new(Coordinate::new(f.center[0], f.center[1]), f.place_name)
                .with_types(f.place_type)
        })
        .collect())
}

/// Parse a directions response body
///
/// `NoRoute`/`NoSegment` mean the service answered but found nothing.
fn parse_routes(body: &str) -> Result<Vec<RouteCandidate>> {
    let response: DirectionsResponse = serde_json::from_str(body).map_err(|e| {
        Error::RoutingUnavailable(format!("Failed to parse Mapbox directions response: {}", e))
    })?;

    match response.code.as_str() {
        "Ok" => Ok(response
            .routes
            .into_iter()
            .map(|r| RouteCandidate {
                distance_meters: r.distance,
                duration_secs: r.duration,
                geometry: r
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[lng, lat]| Coordinate::new(lng, lat))
                    .collect(),
            })
            .collect()),
        "NoRoute" | "NoSegment" => Ok(Vec::new()),
        code => Err(Error::RoutingUnavailable(format!(
            "Mapbox directions returned {}: {}",
            code,
            response.message.unwrap_or_default()
        ))),
    }
}

/// Interpret a directions response
///
/// A `NoRoute`/`NoSegment` answer may arrive with an error status and still
/// means zero routes. Any other unsuccessful status is a service failure.
fn routes_from_response(status: StatusCode, body: &str) -> Result<Vec<RouteCandidate>> {
    let parsed = parse_routes(body);
    if status.is_success() {
        return parsed;
    }

    match parsed {
        Ok(routes) if routes.is_empty() => Ok(routes),
        _ => Err(Error::RoutingUnavailable(format!(
            "Mapbox directions returned status: {}",
            status
        ))),
    }
}

impl MapService for MapboxClient {
    async fn forward(&self, query: &str, limit: usize) -> Result<Vec<NamedPlace>> {
        self.fetch_features(&self.forward_url(query, limit)).await
    }

    async fn reverse(&self, coord: Coordinate) -> Result<Vec<NamedPlace>> {
        self.fetch_features(&self.reverse_url(coord)).await
    }

    async fn directions(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>> {
        let response = self
            .client
            .get(self.directions_url(from, to, mode))
            .send()
            .await
            .map_err(|e| {
                Error::RoutingUnavailable(format!("Mapbox request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::RoutingUnavailable(format!(
                "Failed to read Mapbox response: {}",
                e.without_url()
            ))
        })?;

        routes_from_response(status, &body)
    }
}
