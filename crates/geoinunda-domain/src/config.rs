//! # Configuration
//!
//! Defaults for the geocoding provider and the map surface.

use serde::{Deserialize, Serialize};

use crate::LatLon;

/// Padding applied on every side when fitting an area result, in pixels.
pub const FIT_PADDING_PX: u32 = 40;

/// Duration of search-driven camera animations, in seconds.
pub const SEARCH_ANIMATION_S: f64 = 1.5;

/// Zoom level used when flying to a point result.
pub const POINT_ZOOM: u8 = 18;

/// Duration of the "back to home" animation, in seconds.
pub const HOME_ANIMATION_S: f64 = 1.0;

/// Geocoding provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Search endpoint (Nominatim-compatible)
    pub endpoint: String,

    /// Region qualifier appended to every query
    pub region: String,

    /// Maximum number of matches requested
    pub limit: u8,

    /// Ask the provider for polygon geometry when available
    pub polygon_geometry: bool,

    /// User agent sent by native transports
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            region: "Joinville, Santa Catarina, Brasil".to_string(),
            limit: 1,
            polygon_geometry: true,
            user_agent: concat!("geoinunda/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Map surface configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial and "home" centre
    pub home: LatLon,

    /// Initial and "home" zoom
    pub home_zoom: u8,

    /// Maximum zoom the map allows
    pub max_zoom: u8,

    /// Location of the static flood polygon resource
    pub flood_dataset_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Joinville, SC
            home: LatLon::new(-26.3045, -48.8487),
            home_zoom: 12,
            max_zoom: 20,
            flood_dataset_url: "/data/manchas.geojson".to_string(),
        }
    }
}
