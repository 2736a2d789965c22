//! Printable summaries of CLI results.

use std::fmt;

use geoinunda_domain::geocode::{normalize_query, street_only};
use geoinunda_domain::measure::format_distance;
use geoinunda_domain::{Bbox, CameraMove, FloodDataset, LatLon, SearchResult};
use serde::Serialize;

/// How a raw query will be sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub input: String,
    pub primary: String,
    pub fallback: Option<String>,
}

impl NormalizeReport {
    pub fn new(input: &str) -> Self {
        let primary = normalize_query(input);
        let fallback = street_only(&primary);
        Self {
            input: input.to_string(),
            primary,
            fallback,
        }
    }
}

impl fmt::Display for NormalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.input, self.primary)?;
        if let Some(fallback) = &self.fallback {
            write!(f, " (fallback '{fallback}')")?;
        }
        Ok(())
    }
}

/// A resolved address and the camera move the map would make
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveReport {
    pub query: String,
    pub label: String,
    pub is_area: bool,
    pub center: LatLon,
    pub bbox: Option<Bbox>,
    pub camera: CameraMove,
    pub distance_from_home: String,
}

impl ResolveReport {
    pub fn new(query: &str, result: &SearchResult, home: LatLon) -> Self {
        Self {
            query: query.to_string(),
            label: result.label().to_string(),
            is_area: result.is_area(),
            center: result.center(),
            bbox: result.bbox(),
            camera: CameraMove::for_result(result),
            distance_from_home: format_distance(home.distance_to_m(&result.center())),
        }
    }
}

impl fmt::Display for ResolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_area { "area" } else { "point" };
        write!(
            f,
            "{} [{kind}] at {:.5}, {:.5} ({} from home)",
            self.label, self.center.lat, self.center.lon, self.distance_from_home
        )
    }
}

/// Summary of a flood dataset file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    pub path: String,
    pub feature_count: usize,
    pub bytes: usize,
}

impl DatasetReport {
    pub fn new(path: &str, raw: &str, dataset: &FloodDataset) -> Self {
        Self {
            path: path.to_string(),
            feature_count: dataset.feature_count(),
            bytes: raw.len(),
        }
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} feature(s), {} bytes",
            self.path, self.feature_count, self.bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_report() {
        let report = NormalizeReport::new("R. Blumenau, 100 - fundos");
        assert_eq!(report.primary, "Rua Blumenau, 100");
        assert_eq!(report.fallback.as_deref(), Some("Rua Blumenau"));
        assert_eq!(
            report.to_string(),
            "'R. Blumenau, 100 - fundos' -> 'Rua Blumenau, 100' (fallback 'Rua Blumenau')"
        );
    }

    #[test]
    fn test_resolve_report_for_point() {
        let home = LatLon::new(-26.3045, -48.8487);
        let result = SearchResult::point(home, "Praça Nereu Ramos");
        let report = ResolveReport::new("Praça Nereu Ramos", &result, home);

        assert!(!report.is_area);
        assert_eq!(report.distance_from_home, "0.00 m");
        assert!(matches!(report.camera, CameraMove::FlyTo { zoom: 18, .. }));
        assert!(report.to_string().starts_with("Praça Nereu Ramos [point]"));
    }

    #[test]
    fn test_dataset_report() {
        let raw = r#"{"type":"FeatureCollection","features":[{"type":"Feature"}]}"#;
        let dataset = FloodDataset::from_json(raw).unwrap();
        let report = DatasetReport::new("manchas.geojson", raw, &dataset);
        assert_eq!(report.feature_count, 1);
        assert_eq!(report.to_string(), format!("manchas.geojson: 1 feature(s), {} bytes", raw.len()));
    }
}
