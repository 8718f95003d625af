//! Proximity search
//!
//! Filters a caller-supplied candidate set to those within a radius of an
//! origin, closest first. Candidates must already carry coordinates.

use crate::coord::distance::haversine_distance;
use crate::coord::{Coordinate, DistanceMeasurement, NamedPlace};
use crate::error::{Error, Result};
use crate::geo::cancel::CancelToken;
use crate::geo::{Geocoder, MapService};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// An entity that can be searched by distance (job posting, campus, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityCandidate {
    pub id: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProximityCandidate {
    pub fn new(id: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coordinate,
            name: String::new(),
            category: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A candidate annotated with its distance from the query origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    #[serde(flatten)]
    pub candidate: ProximityCandidate,
    pub distance: DistanceMeasurement,
}

/// Results of a text-anchored search, with the resolved origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearch {
    pub origin: NamedPlace,
    pub results: Vec<ProximityResult>,
}

/// Source of candidates for a search
pub trait CandidateProvider {
    fn candidates(&self) -> Result<Vec<ProximityCandidate>>;
}

impl CandidateProvider for [ProximityCandidate] {
    fn candidates(&self) -> Result<Vec<ProximityCandidate>> {
        Ok(self.to_vec())
    }
}

impl CandidateProvider for Vec<ProximityCandidate> {
    fn candidates(&self) -> Result<Vec<ProximityCandidate>> {
        Ok(self.clone())
    }
}

/// Candidates stored as a JSON array on disk
#[derive(Debug, Clone)]
pub struct CandidateFile {
    path: PathBuf,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CandidateProvider for CandidateFile {
    fn candidates(&self) -> Result<Vec<ProximityCandidate>> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::InvalidInput(format!(
                "Failed to parse candidates in {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Find candidates within `radius_meters` of `origin`, closest first
///
/// Ties keep their input order. A non-positive radius or `max_results == 0`
/// yields an empty result.
pub fn find_nearby(
    origin: Coordinate,
    radius_meters: f64,
    candidates: &[ProximityCandidate],
    max_results: usize,
) -> Vec<ProximityResult> {
    find_nearby_filtered(origin, radius_meters, candidates, max_results, |_| true)
}

/// `find_nearby` restricted to candidates accepted by `predicate`
pub fn find_nearby_filtered<P>(
    origin: Coordinate,
    radius_meters: f64,
    candidates: &[ProximityCandidate],
    max_results: usize,
    predicate: P,
) -> Vec<ProximityResult>
where
    P: Fn(&ProximityCandidate) -> bool,
{
    if radius_meters.is_nan() || radius_meters <= 0.0 || max_results == 0 {
        return Vec::new();
    }

    let mut results: Vec<ProximityResult> = candidates
        .iter()
        .filter(|c| predicate(*c))
        .filter_map(|c| {
            let distance = haversine_distance(origin, c.coordinate);
            (distance.meters <= radius_meters).then(|| ProximityResult {
                candidate: c.clone(),
                distance,
            })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| a.distance.meters.total_cmp(&b.distance.meters));
    results.truncate(max_results);
    results
}

/// Predicate matching a candidate category, ignoring case
pub fn category_filter(category: &str) -> impl Fn(&ProximityCandidate) -> bool {
    let wanted = category.to_lowercase();
    move |c: &ProximityCandidate| {
        c.category
            .as_deref()
            .is_some_and(|cat| cat.to_lowercase() == wanted)
    }
}

/// Resolve `query` with the geocoder's top hit, then search around it
///
/// Geocoding failures propagate unchanged; a query with no hits is `NotFound`.
pub async fn find_nearby_by_query<S, P>(
    geocoder: &Geocoder<S>,
    query: &str,
    radius_meters: f64,
    provider: &P,
    max_results: usize,
    cancel: &CancelToken,
) -> Result<NearbySearch>
where
    S: MapService,
    P: CandidateProvider + ?Sized,
{
    let origin = geocoder
        .forward_geocode(query, 1, cancel)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(format!("No place matches '{}'", query)))?;

    let candidates = provider.candidates()?;
    let results = find_nearby(origin.coordinate, radius_meters, &candidates, max_results);

    Ok(NearbySearch { origin, results })
}
