//! # Layer Composer
//!
//! Resolves UI state into the ordered, keyed list of layers the map should
//! show, and reconciles consecutive compositions into explicit mount/unmount
//! operations.
//!
//! A layer's key encodes everything that requires a fresh instance (tile
//! provider, dataset, search revision, measuring mode). When a key changes the
//! old layer is removed and a new one added; when only the spec behind a key
//! changes the layer is updated in place.

use std::sync::Arc;

use serde::Serialize;

use crate::measure::MeasureTool;
use crate::{BaseLayer, FloodDataset, LatLon, MapViewState, SearchResult};

pub const FLOOD_POPUP_HTML: &str = concat!(
    r#"<div class="font-sans"><strong class="text-slate-800">Área de Risco</strong><br/>"#,
    r#"<span class="text-sm text-slate-600">Atenção ao pesquisar imóveis nesta região.</span></div>"#,
);

/// Flood fill opacity over the street map.
pub const FLOOD_OPACITY_STREET: f64 = 0.35;

/// Flood fill opacity over imagery, which needs more contrast.
pub const FLOOD_OPACITY_IMAGERY: f64 = 0.5;

// =============================================================================
// TILE SOURCES
// =============================================================================

/// A raster tile provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileSource {
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub max_native_zoom: Option<u8>,
    pub opacity: f64,
}

pub const OSM_STREET: TileSource = TileSource {
    url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#,
    max_zoom: 20,
    max_native_zoom: Some(19),
    opacity: 1.0,
};

pub const ESRI_IMAGERY: TileSource = TileSource {
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    attribution: "Tiles &copy; Esri",
    max_zoom: 20,
    max_native_zoom: Some(19),
    opacity: 1.0,
};

pub const ESRI_LABELS: TileSource = TileSource {
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}",
    attribution: "Labels &copy; Esri",
    max_zoom: 20,
    max_native_zoom: Some(19),
    opacity: 0.8,
};

/// Concrete tiles behind a [`BaseLayer`] selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaseTiles {
    Street(TileSource),
    Satellite(TileSource),
    Hybrid {
        base: TileSource,
        label_overlay: TileSource,
    },
}

impl BaseTiles {
    pub const fn for_layer(layer: BaseLayer) -> Self {
        match layer {
            BaseLayer::Street => Self::Street(OSM_STREET),
            BaseLayer::Satellite => Self::Satellite(ESRI_IMAGERY),
            BaseLayer::HybridLabeled => Self::Hybrid {
                base: ESRI_IMAGERY,
                label_overlay: ESRI_LABELS,
            },
        }
    }

    fn into_specs(self) -> Vec<LayerSpec> {
        match self {
            Self::Street(source) => vec![LayerSpec::tile("base-street", Pane::Base, source)],
            Self::Satellite(source) => {
                vec![LayerSpec::tile("base-satellite", Pane::Base, source)]
            }
            Self::Hybrid {
                base,
                label_overlay,
            } => vec![
                LayerSpec::tile("base-hybrid", Pane::Base, base),
                LayerSpec::tile("base-hybrid-labels", Pane::Labels, label_overlay),
            ],
        }
    }
}

// =============================================================================
// LAYER SPECS
// =============================================================================

/// Map pane a layer is drawn in; panes fix the stacking order regardless of
/// the order in which layers are mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Pane {
    Base,
    Labels,
    Flood,
    Search,
    Measure,
}

impl Pane {
    pub const ALL: [Self; 5] = [
        Self::Base,
        Self::Labels,
        Self::Flood,
        Self::Search,
        Self::Measure,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "geoinunda-base",
            Self::Labels => "geoinunda-labels",
            Self::Flood => "geoinunda-flood",
            Self::Search => "geoinunda-search",
            Self::Measure => "geoinunda-measure",
        }
    }

    pub const fn z_index(self) -> u16 {
        match self {
            Self::Base => 200,
            Self::Labels => 250,
            Self::Flood => 410,
            Self::Search => 420,
            Self::Measure => 640,
        }
    }

    /// Whether the pane may receive pointer events at all.
    pub const fn accepts_pointer(self) -> bool {
        !matches!(self, Self::Labels)
    }
}

/// Vector path styling
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub dash_array: Option<&'static str>,
    pub fill_color: Option<&'static str>,
    pub fill_opacity: f64,
}

impl PathStyle {
    pub const fn flood(base: BaseLayer) -> Self {
        let fill_opacity = match base {
            BaseLayer::Street => FLOOD_OPACITY_STREET,
            BaseLayer::Satellite | BaseLayer::HybridLabeled => FLOOD_OPACITY_IMAGERY,
        };
        Self {
            color: "#ef4444",
            weight: 1.0,
            dash_array: None,
            fill_color: Some("#ef4444"),
            fill_opacity,
        }
    }

    pub const fn search_area() -> Self {
        Self {
            color: "#3b82f6",
            weight: 2.0,
            dash_array: Some("5, 5"),
            fill_color: Some("#3b82f6"),
            fill_opacity: 0.05,
        }
    }

    pub const fn ruler() -> Self {
        Self {
            color: "#ef4444",
            weight: 3.0,
            dash_array: Some("8, 8"),
            fill_color: None,
            fill_opacity: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Tile(TileSource),
    FloodOverlay {
        dataset: Arc<FloodDataset>,
        style: PathStyle,
        popup: Option<&'static str>,
        interactive: bool,
    },
    SearchArea {
        result: Arc<SearchResult>,
        style: PathStyle,
        interactive: bool,
    },
    SearchMarker {
        at: LatLon,
        popup: Option<String>,
        interactive: bool,
    },
    MeasurePin {
        index: usize,
        at: LatLon,
        tooltip: Option<String>,
    },
    MeasureLine {
        from: LatLon,
        to: LatLon,
        style: PathStyle,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub key: String,
    pub pane: Pane,
    pub kind: LayerKind,
}

impl LayerSpec {
    fn tile(key: &str, pane: Pane, source: TileSource) -> Self {
        Self {
            key: key.to_string(),
            pane,
            kind: LayerKind::Tile(source),
        }
    }

    pub const fn is_interactive(&self) -> bool {
        match &self.kind {
            LayerKind::Tile(_) => false,
            LayerKind::FloodOverlay { interactive, .. }
            | LayerKind::SearchArea { interactive, .. }
            | LayerKind::SearchMarker { interactive, .. } => *interactive,
            LayerKind::MeasurePin { .. } | LayerKind::MeasureLine { .. } => true,
        }
    }
}

const fn mode_key(measuring: bool) -> &'static str {
    if measuring { "measuring" } else { "interactive" }
}

/// Compose base, flood and search layers, bottom to top.
///
/// While `measuring` every feature layer is non-interactive so the ruler's
/// clicks reach the map.
pub fn compose(
    view: &MapViewState,
    search: Option<&Arc<SearchResult>>,
    search_revision: u64,
    flood: Option<&Arc<FloodDataset>>,
    measuring: bool,
) -> Vec<LayerSpec> {
    let mut layers = BaseTiles::for_layer(view.base_layer).into_specs();
    let interactive = !measuring;
    let mode = mode_key(measuring);

    if let Some(dataset) = flood.filter(|_| view.flood_overlay_visible) {
        layers.push(LayerSpec {
            key: format!("flood-{}-{mode}", dataset.feature_count()),
            pane: Pane::Flood,
            kind: LayerKind::FloodOverlay {
                dataset: Arc::clone(dataset),
                style: PathStyle::flood(view.base_layer),
                popup: interactive.then_some(FLOOD_POPUP_HTML),
                interactive,
            },
        });
    }

    if let Some(result) = search {
        let kind = if result.is_area() {
            LayerKind::SearchArea {
                result: Arc::clone(result),
                style: PathStyle::search_area(),
                interactive,
            }
        } else {
            LayerKind::SearchMarker {
                at: result.center(),
                popup: interactive.then(|| marker_popup_html(result.label())),
                interactive,
            }
        };
        layers.push(LayerSpec {
            key: format!("search-{search_revision}-{mode}"),
            pane: Pane::Search,
            kind,
        });
    }

    layers
}

/// Pins, connecting line and distance tooltip of the ruler.
pub fn measure_overlay(tool: &MeasureTool) -> Vec<LayerSpec> {
    let pin = |index: usize, at: LatLon, tooltip: Option<String>| LayerSpec {
        key: format!("measure-pin-{index}"),
        pane: Pane::Measure,
        kind: LayerKind::MeasurePin { index, at, tooltip },
    };

    let points = tool.points();
    let mut layers = Vec::with_capacity(3);
    if let Some(first) = points.get(0) {
        layers.push(pin(0, first, None));
    }
    if let (Some(first), Some(second), Some(label)) =
        (points.get(0), points.get(1), tool.distance_label())
    {
        layers.push(pin(1, second, Some(label)));
        layers.push(LayerSpec {
            key: "measure-line".to_string(),
            pane: Pane::Measure,
            kind: LayerKind::MeasureLine {
                from: first,
                to: second,
                style: PathStyle::ruler(),
            },
        });
    }
    layers
}

fn marker_popup_html(label: &str) -> String {
    format!(
        r#"<strong class="font-sans text-slate-800">{}</strong>"#,
        escape_html(label)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// RECONCILIATION
// =============================================================================

/// One operation the renderer must perform
#[derive(Debug, Clone, PartialEq)]
pub enum LayerChange {
    Add(LayerSpec),
    Update(LayerSpec),
    Remove(String),
}

/// The layers currently mounted on the map
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    mounted: Vec<LayerSpec>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted(&self) -> &[LayerSpec] {
        &self.mounted
    }

    /// Diff `next` against what is mounted. Removals come first, then
    /// additions and updates in `next` order.
    pub fn reconcile(&mut self, next: Vec<LayerSpec>) -> Vec<LayerChange> {
        let mut changes: Vec<LayerChange> = self
            .mounted
            .iter()
            .filter(|old| !next.iter().any(|spec| spec.key == old.key))
            .map(|old| LayerChange::Remove(old.key.clone()))
            .collect();

        for spec in &next {
            match self.mounted.iter().find(|old| old.key == spec.key) {
                None => changes.push(LayerChange::Add(spec.clone())),
                Some(old) if old != spec => changes.push(LayerChange::Update(spec.clone())),
                Some(_) => {}
            }
        }

        if !changes.is_empty() {
            log::debug!("Layer reconcile: {} change(s)", changes.len());
        }
        self.mounted = next;
        changes
    }

    /// Unmount everything.
    pub fn reset(&mut self) -> Vec<LayerChange> {
        self.reconcile(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MeasureEvent;
    use crate::search::{SearchOutcome, SearchState};
    use crate::viewport::{CameraMove, ViewportController};
    use crate::{Bbox, GeocodeClient, GeocodeError, GeocodeRequest, GeocodeTransport, GeocoderConfig, Place};
    use serde_json::json;

    fn dataset() -> Arc<FloodDataset> {
        Arc::new(FloodDataset::from_value(json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "geometry": null, "properties": {}}]
        })))
    }

    fn point() -> Arc<SearchResult> {
        Arc::new(SearchResult::point(
            LatLon::new(-26.305, -48.845),
            "Rua XV de Novembro",
        ))
    }

    fn area() -> Arc<SearchResult> {
        Arc::new(SearchResult::area(
            LatLon::new(-26.303, -48.846),
            Bbox::new(LatLon::new(-26.32, -48.86), LatLon::new(-26.29, -48.83)),
            json!({"type": "Polygon", "coordinates": []}),
            "Centro",
        ))
    }

    fn flood_opacity(layers: &[LayerSpec]) -> Option<f64> {
        layers.iter().find_map(|l| match &l.kind {
            LayerKind::FloodOverlay { style, .. } => Some(style.fill_opacity),
            _ => None,
        })
    }

    #[test]
    fn test_exactly_one_base_provider() {
        for base in BaseLayer::ALL {
            let view = MapViewState {
                base_layer: base,
                flood_overlay_visible: false,
            };
            let layers = compose(&view, None, 0, None, false);
            let keys: Vec<&str> = layers.iter().map(|l| l.key.as_str()).collect();
            match base {
                BaseLayer::Street => assert_eq!(keys, ["base-street"]),
                BaseLayer::Satellite => assert_eq!(keys, ["base-satellite"]),
                BaseLayer::HybridLabeled => {
                    assert_eq!(keys, ["base-hybrid", "base-hybrid-labels"]);
                }
            }
        }
    }

    #[test]
    fn test_flood_requires_visibility_and_data() {
        let view = MapViewState::default();
        let data = dataset();

        assert!(flood_opacity(&compose(&view, None, 0, None, false)).is_none());
        assert!(flood_opacity(&compose(&view, None, 0, Some(&data), false)).is_some());

        let hidden = MapViewState {
            flood_overlay_visible: false,
            ..view
        };
        assert!(flood_opacity(&compose(&hidden, None, 0, Some(&data), false)).is_none());
    }

    #[test]
    fn test_base_switch_changes_only_flood_opacity() {
        let data = dataset();
        let street = MapViewState::default();
        let satellite = MapViewState {
            base_layer: BaseLayer::Satellite,
            ..street
        };

        let mut stack = LayerStack::new();
        let before = compose(&street, None, 0, Some(&data), false);
        assert_eq!(flood_opacity(&before), Some(0.35));
        stack.reconcile(before);

        let after = compose(&satellite, None, 0, Some(&data), false);
        assert_eq!(flood_opacity(&after), Some(0.5));

        let changes = stack.reconcile(after);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], LayerChange::Remove("base-street".into()));
        assert!(matches!(&changes[1], LayerChange::Add(spec) if spec.key == "base-satellite"));
        assert!(matches!(&changes[2], LayerChange::Update(spec) if spec.key.starts_with("flood-")));
    }

    #[test]
    fn test_hybrid_uses_imagery_opacity_and_label_pane() {
        let data = dataset();
        let hybrid = MapViewState {
            base_layer: BaseLayer::HybridLabeled,
            flood_overlay_visible: true,
        };

        let layers = compose(&hybrid, None, 0, Some(&data), false);
        assert_eq!(flood_opacity(&layers), Some(FLOOD_OPACITY_IMAGERY));

        let labels = layers
            .iter()
            .find(|l| l.key == "base-hybrid-labels")
            .unwrap();
        assert_eq!(labels.pane, Pane::Labels);
        assert!(!labels.pane.accepts_pointer());
        match &labels.kind {
            LayerKind::Tile(source) => {
                assert!((source.opacity - 0.8).abs() < f64::EPSILON);
                assert!(source.url.contains("World_Boundaries_and_Places"));
            }
            other => panic!("expected tiles, got {other:?}"),
        }
        assert!(Pane::Labels.z_index() > Pane::Base.z_index());
        assert!(Pane::Labels.z_index() < Pane::Flood.z_index());
    }

    #[test]
    fn test_point_result_renders_marker_with_label() {
        let layers = compose(&MapViewState::default(), Some(&point()), 1, None, false);
        let search = layers.last().unwrap();
        assert_eq!(search.key, "search-1-interactive");
        assert_eq!(search.pane, Pane::Search);
        match &search.kind {
            LayerKind::SearchMarker { popup, interactive, .. } => {
                assert!(*interactive);
                assert!(popup.as_deref().unwrap().contains("Rua XV de Novembro"));
            }
            other => panic!("expected marker, got {other:?}"),
        }
    }

    #[test]
    fn test_area_result_renders_dashed_polygon() {
        let layers = compose(&MapViewState::default(), Some(&area()), 2, None, false);
        match &layers.last().unwrap().kind {
            LayerKind::SearchArea { style, .. } => {
                assert_eq!(style.dash_array, Some("5, 5"));
                assert!((style.fill_opacity - 0.05).abs() < f64::EPSILON);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
        assert!(!layers
            .iter()
            .any(|l| matches!(l.kind, LayerKind::SearchMarker { .. })));
    }

    #[test]
    fn test_measuring_suppresses_interactivity() {
        let data = dataset();
        let layers = compose(&MapViewState::default(), Some(&point()), 1, Some(&data), true);
        assert!(layers.iter().all(|l| !l.is_interactive()));
        for layer in &layers {
            match &layer.kind {
                LayerKind::FloodOverlay { popup, .. } => assert!(popup.is_none()),
                LayerKind::SearchMarker { popup, .. } => assert!(popup.is_none()),
                _ => {}
            }
        }
    }

    #[test]
    fn test_flood_popup_when_interactive() {
        let data = dataset();
        let layers = compose(&MapViewState::default(), None, 0, Some(&data), false);
        assert!(layers.iter().any(|l| matches!(
            &l.kind,
            LayerKind::FloodOverlay { popup: Some(html), .. } if html.contains("Área de Risco")
        )));
    }

    #[test]
    fn test_measuring_flip_remounts_feature_layers() {
        let data = dataset();
        let view = MapViewState::default();
        let mut stack = LayerStack::new();
        stack.reconcile(compose(&view, Some(&point()), 1, Some(&data), false));

        let changes = stack.reconcile(compose(&view, Some(&point()), 1, Some(&data), true));
        let removed: Vec<&str> = changes
            .iter()
            .filter_map(|c| match c {
                LayerChange::Remove(key) => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(removed, ["flood-1-interactive", "search-1-interactive"]);
        let added = changes
            .iter()
            .filter(|c| matches!(c, LayerChange::Add(_)))
            .count();
        assert_eq!(added, 2);
    }

    #[test]
    fn test_new_search_identity_remounts() {
        let view = MapViewState::default();
        let mut stack = LayerStack::new();
        stack.reconcile(compose(&view, Some(&point()), 1, None, false));

        let changes = stack.reconcile(compose(&view, Some(&point()), 2, None, false));
        assert_eq!(changes[0], LayerChange::Remove("search-1-interactive".into()));
        assert!(matches!(&changes[1], LayerChange::Add(spec) if spec.key == "search-2-interactive"));
    }

    #[test]
    fn test_unchanged_composition_is_quiet() {
        let view = MapViewState::default();
        let mut stack = LayerStack::new();
        stack.reconcile(compose(&view, Some(&area()), 1, None, false));
        let same = stack.mounted().to_vec();
        assert!(stack.reconcile(same).is_empty());
        assert_eq!(stack.reset().len(), 2);
        assert!(stack.mounted().is_empty());
    }

    #[test]
    fn test_measure_overlay_follows_tool() {
        let a = LatLon::new(-26.30, -48.85);
        let b = LatLon::new(-26.31, -48.84);
        let tool = MeasureTool::new().apply(MeasureEvent::Toggle);
        assert!(measure_overlay(&tool).is_empty());

        let one = tool.apply(MeasureEvent::MapClick(a));
        let keys: Vec<String> = measure_overlay(&one).into_iter().map(|l| l.key).collect();
        assert_eq!(keys, ["measure-pin-0"]);

        let done = one.apply(MeasureEvent::MapClick(b));
        let overlay = measure_overlay(&done);
        assert_eq!(overlay.len(), 3);
        let label = done.distance_label().unwrap();
        assert!(overlay.iter().any(|l| matches!(
            &l.kind,
            LayerKind::MeasurePin { index: 1, tooltip: Some(t), .. } if *t == label
        )));
    }

    #[test]
    fn test_drag_updates_pins_in_place() {
        let a = LatLon::new(-26.30, -48.85);
        let b = LatLon::new(-26.31, -48.84);
        let done = MeasureTool::new()
            .apply(MeasureEvent::Toggle)
            .apply(MeasureEvent::MapClick(a))
            .apply(MeasureEvent::MapClick(b));

        let mut stack = LayerStack::new();
        stack.reconcile(measure_overlay(&done));
        let dragged = done.apply(MeasureEvent::Drag {
            index: 1,
            to: LatLon::new(-26.32, -48.83),
        });
        let changes = stack.reconcile(measure_overlay(&dragged));
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| matches!(c, LayerChange::Update(_))));
    }

    #[test]
    fn test_popup_label_is_escaped() {
        assert_eq!(
            marker_popup_html("<b>A & B</b>"),
            r#"<strong class="font-sans text-slate-800">&lt;b&gt;A &amp; B&lt;/b&gt;</strong>"#
        );
    }

    /// Always answers with the same matches.
    struct Canned(Vec<Place>);

    impl GeocodeTransport for Canned {
        async fn search(&self, _request: &GeocodeRequest) -> Result<Vec<Place>, GeocodeError> {
            Ok(self.0.clone())
        }
    }

    /// Type `query`, run the lookup and feed the outcome through the
    /// camera and the layer composer the way the map page does.
    fn search_flow(place: serde_json::Value, query: &str) -> (Option<CameraMove>, Vec<LayerSpec>) {
        let client = GeocodeClient::new(
            Canned(vec![serde_json::from_value(place).unwrap()]),
            GeocoderConfig::default(),
        );
        let mut search = SearchState::new();
        search.set_query(query);
        let ticket = search.begin().unwrap();
        let outcome = tokio_test::block_on(client.resolve(ticket.query()));
        assert!(matches!(search.complete(&ticket, outcome), SearchOutcome::Applied(_)));

        let result = search.result();
        let camera = ViewportController::new()
            .on_result_changed(result.map(|r| r.as_ref()), search.revision());
        let layers = compose(&MapViewState::default(), result, search.revision(), None, false);
        (camera, layers)
    }

    #[test]
    fn test_street_search_flies_in_and_pins_marker() {
        let (camera, layers) = search_flow(
            json!({
                "lat": "-26.305",
                "lon": "-48.845",
                "boundingbox": ["-26.31", "-26.30", "-48.85", "-48.84"],
                "display_name": "Rua XV de Novembro, Centro, Joinville, Santa Catarina, Brasil",
                "geojson": {"type": "Point", "coordinates": [-48.845, -26.305]}
            }),
            "Rua XV de Novembro",
        );

        match camera {
            Some(CameraMove::FlyTo { center, zoom, .. }) => {
                assert_eq!(zoom, 18);
                assert_eq!(center, LatLon::new(-26.305, -48.845));
            }
            other => panic!("expected fly-to, got {other:?}"),
        }

        let markers: Vec<&LayerSpec> = layers
            .iter()
            .filter(|l| matches!(l.kind, LayerKind::SearchMarker { .. }))
            .collect();
        assert_eq!(markers.len(), 1);
        assert!(matches!(
            &markers[0].kind,
            LayerKind::SearchMarker { popup: Some(html), .. } if html.contains("Rua XV de Novembro")
        ));
        assert!(!layers.iter().any(|l| matches!(l.kind, LayerKind::SearchArea { .. })));
    }

    #[test]
    fn test_neighbourhood_search_fits_outline() {
        let (camera, layers) = search_flow(
            json!({
                "lat": "-26.3030",
                "lon": "-48.8460",
                "boundingbox": ["-26.32", "-26.29", "-48.86", "-48.83"],
                "display_name": "Centro, Joinville, Santa Catarina, Brasil",
                "geojson": {"type": "Polygon", "coordinates": [[[-48.86, -26.32], [-48.83, -26.32], [-48.83, -26.29], [-48.86, -26.32]]]}
            }),
            "Centro",
        );

        match camera {
            Some(CameraMove::FitBounds { bbox, padding_px, .. }) => {
                assert_eq!(padding_px, 40);
                assert_eq!(bbox.corners(), [[-26.32, -48.86], [-26.29, -48.83]]);
            }
            other => panic!("expected fit-bounds, got {other:?}"),
        }

        assert!(layers.iter().any(|l| matches!(l.kind, LayerKind::SearchArea { .. })));
        assert!(!layers.iter().any(|l| matches!(l.kind, LayerKind::SearchMarker { .. })));
    }
}
