//! # Geocode Client
//!
//! Turns free-text address input into a [`SearchResult`].
//!
//! The HTTP call itself lives behind [`GeocodeTransport`] so the browser
//! (`gloo-net`) and the CLI (`reqwest`) share the normalization, fallback and
//! result-mapping rules implemented here.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeocoderConfig;
use crate::{Bbox, LatLon, SearchResult};

/// Street-type abbreviations expanded at the start of a query.
const STREET_ABBREVIATIONS: &[(&str, &str)] = &[("r.", "Rua"), ("av.", "Avenida")];

/// Length of the postal-code-like suffix stripped from queries.
const POSTAL_SUFFIX_LEN: usize = 5;

pub const NOT_FOUND_MESSAGE: &str =
    "Localização não encontrada. Tente inserir apenas o nome da rua.";
pub const FAILURE_MESSAGE: &str = "Ocorreu um erro ao processar a pesquisa.";

/// Geocoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error("Empty query")]
    EmptyQuery,

    #[error("No location found for '{query}'")]
    NotFound { query: String },

    #[error("Geocoder request failed: {0}")]
    Transport(String),

    #[error("Malformed geocoder response: {0}")]
    Malformed(String),
}

impl GeocodeError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message shown to the user. `None` means the failure is silent.
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::EmptyQuery => None,
            Self::NotFound { .. } => Some(NOT_FOUND_MESSAGE),
            Self::Transport(_) | Self::Malformed(_) => Some(FAILURE_MESSAGE),
        }
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

// =============================================================================
// QUERY NORMALIZATION
// =============================================================================

/// Normalize user input into the primary lookup query.
///
/// Expands a leading street-type abbreviation, drops everything after the
/// first hyphen, strips a trailing five-digit postal code and trims.
pub fn normalize_query(raw: &str) -> String {
    let expanded = expand_street_type(raw.trim_start());
    let before_hyphen = expanded.split('-').next().unwrap_or_default();
    strip_postal_suffix(before_hyphen).trim().to_string()
}

/// The "street name only" fallback: text before the first comma, if it
/// differs from the query itself.
pub fn street_only(query: &str) -> Option<String> {
    let street = query.split(',').next().unwrap_or_default().trim();
    (!street.is_empty() && street != query).then(|| street.to_string())
}

fn expand_street_type(input: &str) -> String {
    for (abbreviation, full) in STREET_ABBREVIATIONS {
        let Some(head) = input.get(..abbreviation.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(abbreviation) {
            continue;
        }
        let rest = &input[abbreviation.len()..];
        if let Some(separator) = rest.chars().next().filter(|c| c.is_whitespace()) {
            return format!("{full} {}", &rest[separator.len_utf8()..]);
        }
    }
    input.to_string()
}

fn strip_postal_suffix(input: &str) -> &str {
    let trimmed = input.trim_end();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= POSTAL_SUFFIX_LEN
        && bytes[bytes.len() - POSTAL_SUFFIX_LEN..]
            .iter()
            .all(u8::is_ascii_digit)
    {
        &trimmed[..trimmed.len() - POSTAL_SUFFIX_LEN]
    } else {
        input
    }
}

// =============================================================================
// PROVIDER WIRE FORMAT
// =============================================================================

/// A single lookup, ready to be sent by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    pub endpoint: String,
    pub params: Vec<(&'static str, String)>,
}

impl GeocodeRequest {
    /// The region-qualified free-text query.
    pub fn query(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == "q")
            .map(|(_, value)| value.as_str())
    }
}

/// One match as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub boundingbox: Vec<String>,
    pub display_name: String,
    #[serde(default)]
    pub geojson: Option<Value>,
}

impl Place {
    pub fn geometry_type(&self) -> Option<&str> {
        self.geojson
            .as_ref()
            .and_then(|g| g.get("type"))
            .and_then(Value::as_str)
    }

    pub fn is_area(&self) -> bool {
        matches!(self.geometry_type(), Some("Polygon" | "MultiPolygon"))
    }

    /// Map the provider record onto the domain result.
    pub fn into_search_result(self) -> Result<SearchResult, GeocodeError> {
        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|e| GeocodeError::Malformed(format!("coordinate '{value}': {e}")))
        };
        let center = LatLon::try_new(parse(&self.lat)?, parse(&self.lon)?)
            .map_err(|e| GeocodeError::Malformed(e.to_string()))?;
        let label = self
            .display_name
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        if !self.is_area() {
            return Ok(SearchResult::point(center, label));
        }

        let bbox = Bbox::from_provider(&self.boundingbox)
            .map_err(|e| GeocodeError::Malformed(e.to_string()))?;
        let shape = self.geojson.unwrap_or(Value::Null);
        Ok(SearchResult::area(center, bbox, shape, label))
    }
}

/// HTTP seam between the client and a concrete network stack
pub trait GeocodeTransport {
    fn search(
        &self,
        request: &GeocodeRequest,
    ) -> impl Future<Output = Result<Vec<Place>, GeocodeError>>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// Geocode client with the two-stage fallback strategy
#[derive(Debug, Clone)]
pub struct GeocodeClient<T> {
    transport: T,
    config: GeocoderConfig,
}

impl<T: GeocodeTransport> GeocodeClient<T> {
    pub const fn new(transport: T, config: GeocoderConfig) -> Self {
        Self { transport, config }
    }

    pub const fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the provider request for an already-normalized query.
    pub fn request_for(&self, query: &str) -> GeocodeRequest {
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", format!("{query}, {}", self.config.region)),
            ("limit", self.config.limit.to_string()),
        ];
        if self.config.polygon_geometry {
            params.push(("polygon_geojson", "1".to_string()));
        }
        GeocodeRequest {
            endpoint: self.config.endpoint.clone(),
            params,
        }
    }

    /// Resolve free text into a search result.
    ///
    /// # Errors
    ///
    /// `EmptyQuery` for blank input (no request is made), `NotFound` when
    /// both attempts come back empty, `Transport`/`Malformed` otherwise.
    pub async fn resolve(&self, raw: &str) -> Result<SearchResult, GeocodeError> {
        if raw.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let primary = normalize_query(raw);
        if primary.is_empty() {
            return Err(GeocodeError::NotFound {
                query: raw.trim().to_string(),
            });
        }

        let mut places = self.lookup(&primary).await?;
        if places.is_empty() {
            if let Some(street) = street_only(&primary) {
                log::info!("No match for '{primary}', retrying with '{street}'");
                places = self.lookup(&street).await?;
            }
        }

        let place = places
            .into_iter()
            .next()
            .ok_or(GeocodeError::NotFound { query: primary })?;
        place.into_search_result()
    }

    async fn lookup(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        let request = self.request_for(query);
        log::debug!("Geocoding '{query}'");
        self.transport.search(&request).await.inspect_err(|e| {
            log::error!("Geocode lookup for '{query}' failed: {e}");
        })
    }
}
