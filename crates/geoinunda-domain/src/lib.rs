//! # GeoInunda - Map Interaction Domain
//!
//! Framework-free core of the flood-risk map: the data model shared by the
//! web frontend and the geocoding CLI, plus the state machines that keep the
//! map predictable under concurrent user actions.
//!
//! ```text
//! query text ──► GeocodeClient ──► SearchState ──► ViewportController ──► camera
//!                                       │
//!                                       └──────► layers::compose ──► LayerStack ──► map
//! map clicks ──► MeasureTool ──► layers::measure_overlay ──────────────┘
//! ```
//!
//! Rendering is left to the caller: every operation here is a plain function
//! or an explicit transition over owned state, so it runs (and is tested)
//! without a browser.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod config;
pub mod consent;
pub mod geocode;
pub mod layers;
pub mod measure;
pub mod search;
pub mod viewport;

pub use config::{GeocoderConfig, MapConfig};
pub use consent::{ConsentNotice, ConsentPhase, ConsentStore};
pub use geocode::{GeocodeClient, GeocodeError, GeocodeRequest, GeocodeTransport, Place};
pub use layers::{LayerChange, LayerKind, LayerSpec, LayerStack};
pub use measure::{MeasureEvent, MeasurePhase, MeasurePoints, MeasureTool};
pub use search::{SearchOutcome, SearchState, SearchTicket};
pub use viewport::{CameraMove, ViewportController};

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Mean Earth radius used by the map surface's distance primitive.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(DomainError::InvalidCoordinates { lat, lon })
        }
    }

    /// Great-circle distance in meters (haversine formula)
    #[must_use]
    pub fn distance_to_m(&self, other: &LatLon) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// `[lat, lon]` pair, the order the map surface expects.
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// Bounding box expressed as two opposite corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl Bbox {
    pub const fn new(south_west: LatLon, north_east: LatLon) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Parse the geocoder's four numeric strings, ordered south, north, west, east.
    pub fn from_provider<S: AsRef<str>>(raw: &[S]) -> Result<Self, DomainError> {
        let [south, north, west, east] = raw else {
            return Err(DomainError::InvalidBoundingBox(format!(
                "expected 4 values, got {}",
                raw.len()
            )));
        };

        let parse = |value: &S| {
            value.as_ref().trim().parse::<f64>().map_err(|e| {
                DomainError::InvalidBoundingBox(format!("'{}': {e}", value.as_ref()))
            })
        };

        let south_west = LatLon::try_new(parse(south)?, parse(west)?)?;
        let north_east = LatLon::try_new(parse(north)?, parse(east)?)?;
        Ok(Self::new(south_west, north_east))
    }

    /// `[[south, west], [north, east]]`
    pub const fn corners(&self) -> [[f64; 2]; 2] {
        [self.south_west.to_array(), self.north_east.to_array()]
    }
}

// =============================================================================
// ENUMS
// =============================================================================

/// Background imagery selected in the layer menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseLayer {
    #[default]
    Street,
    Satellite,
    HybridLabeled,
}

impl BaseLayer {
    pub const ALL: [Self; 3] = [Self::Street, Self::Satellite, Self::HybridLabeled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Satellite => "satellite",
            Self::HybridLabeled => "hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Street => "Mapa (OSM)",
            Self::Satellite => "Satélite",
            Self::HybridLabeled => "Híbrido",
        }
    }

    /// Whether the background is aerial imagery.
    pub fn is_imagery(&self) -> bool {
        matches!(self, Self::Satellite | Self::HybridLabeled)
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// A resolved search location.
///
/// `is_area` is true exactly when the geocoder returned polygon geometry, and
/// an area result always carries a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSearchResult")]
pub struct SearchResult {
    center: LatLon,
    bbox: Option<Bbox>,
    shape: Option<Value>,
    is_area: bool,
    label: String,
}

impl SearchResult {
    pub fn point(center: LatLon, label: impl Into<String>) -> Self {
        Self {
            center,
            bbox: None,
            shape: None,
            is_area: false,
            label: label.into(),
        }
    }

    pub fn area(center: LatLon, bbox: Bbox, shape: Value, label: impl Into<String>) -> Self {
        Self {
            center,
            bbox: Some(bbox),
            shape: Some(shape),
            is_area: true,
            label: label.into(),
        }
    }

    pub const fn center(&self) -> LatLon {
        self.center
    }

    pub const fn bbox(&self) -> Option<Bbox> {
        self.bbox
    }

    pub const fn shape(&self) -> Option<&Value> {
        self.shape.as_ref()
    }

    pub const fn is_area(&self) -> bool {
        self.is_area
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Wire shape of [`SearchResult`], checked before it becomes one
#[derive(Deserialize)]
struct RawSearchResult {
    center: LatLon,
    bbox: Option<Bbox>,
    shape: Option<Value>,
    is_area: bool,
    label: String,
}

impl TryFrom<RawSearchResult> for SearchResult {
    type Error = DomainError;

    fn try_from(raw: RawSearchResult) -> Result<Self, Self::Error> {
        match (raw.is_area, raw.bbox) {
            (true, Some(bbox)) => Ok(Self::area(
                raw.center,
                bbox,
                raw.shape.unwrap_or(Value::Null),
                raw.label,
            )),
            (false, None) => Ok(Self::point(raw.center, raw.label)),
            (true, None) => Err(DomainError::InconsistentState(
                "area result without a bounding box".into(),
            )),
            (false, Some(_)) => Err(DomainError::InconsistentState(
                "point result with a bounding box".into(),
            )),
        }
    }
}

/// Process-wide map UI state, changed only by explicit user toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapViewState {
    pub base_layer: BaseLayer,
    pub flood_overlay_visible: bool,
}

impl MapViewState {
    pub fn select_base_layer(&mut self, base_layer: BaseLayer) {
        self.base_layer = base_layer;
    }

    pub fn toggle_flood_overlay(&mut self) {
        self.flood_overlay_visible = !self.flood_overlay_visible;
    }
}

impl Default for MapViewState {
    fn default() -> Self {
        Self {
            base_layer: BaseLayer::Street,
            flood_overlay_visible: true,
        }
    }
}

/// Flood-risk polygons, loaded once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloodDataset {
    collection: Value,
    feature_count: usize,
}

impl FloodDataset {
    /// Parse a GeoJSON document. Anything that parses as JSON is accepted.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let collection: Value =
            serde_json::from_str(raw).map_err(|e| DomainError::Dataset(e.to_string()))?;
        Ok(Self::from_value(collection))
    }

    pub fn from_value(collection: Value) -> Self {
        let feature_count = collection
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        Self {
            collection,
            feature_count,
        }
    }

    pub const fn collection(&self) -> &Value {
        &self.collection
    }

    pub const fn feature_count(&self) -> usize {
        self.feature_count
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("Flood dataset could not be parsed: {0}")]
    Dataset(String),

    #[error("Preference storage failed: {0}")]
    Storage(String),

    #[error("Inconsistent state: {0}")]
    InconsistentState(String),
}
