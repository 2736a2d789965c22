//! # Map Component
//!
//! Leaflet map surface. Layer composition and camera decisions come from the
//! domain crate; this module only mounts what the layer stack reports and
//! forwards map clicks, pin drags and the Escape key to the ruler.

use std::cell::RefCell;
use std::collections::HashMap;

use js_sys::Array;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use geoinunda_domain::layers::{self, Pane};
use geoinunda_domain::{
    CameraMove, LayerChange, LayerKind, LayerSpec, LayerStack, MapConfig, MeasureEvent,
    MeasureTool, ViewportController,
};

use crate::leaflet::{self, Layer, Map, Marker, Options, VectorLayer};
use crate::state::{use_app_state, AppState};

const MAP_ID: &str = "flood-map";

/// A mounted Leaflet layer and the event handler it keeps alive
struct MountedLayer {
    layer: Layer,
    _handler: Option<Closure<dyn FnMut(JsValue)>>,
}

impl MountedLayer {
    fn new(layer: Layer) -> Self {
        Self {
            layer,
            _handler: None,
        }
    }
}

/// The live map and everything bound to it
struct MapSurface {
    map: Map,
    layers: HashMap<String, MountedLayer>,
    stack: LayerStack,
    viewport: ViewportController,
    _on_click: Closure<dyn FnMut(JsValue)>,
    on_keydown: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

thread_local! {
    static SURFACE: RefCell<Option<MapSurface>> = const { RefCell::new(None) };
}

fn with_surface<R>(f: impl FnOnce(&mut MapSurface) -> R) -> Option<R> {
    SURFACE.with(|slot| match slot.try_borrow_mut() {
        Ok(mut surface) => surface.as_mut().map(f),
        Err(_) => {
            log::warn!("Map surface busy, update skipped");
            None
        }
    })
}

// =============================================================================
// COMPONENT
// =============================================================================

#[component]
pub fn FloodMap() -> impl IntoView {
    let state = use_app_state();
    let ready = RwSignal::new(false);

    // Initialize map on mount
    Effect::new(move |_| {
        if ready.get_untracked() {
            return;
        }
        if !leaflet::is_loaded() {
            log::warn!("Leaflet not loaded, map will not render");
            return;
        }
        state.map_config.with_value(|config| mount_surface(state, config));
        ready.set(true);
    });

    on_cleanup(unmount_surface);

    let search_view =
        Memo::new(move |_| state.search.with(|s| (s.result().cloned(), s.revision())));

    // Keep the mounted layers in step with the UI state
    Effect::new(move |_| {
        if !ready.get() {
            return;
        }
        let view = state.view.get();
        let tool = state.measure.get();
        let flood = state.flood.get();
        let (result, revision) = search_view.get();

        let mut next = layers::compose(
            &view,
            result.as_ref(),
            revision,
            flood.as_ref(),
            tool.is_measuring(),
        );
        next.extend(layers::measure_overlay(&tool));

        with_surface(|surface| surface.reconcile(next, state));
    });

    // Navigate to each new search result once
    Effect::new(move |_| {
        if !ready.get() {
            return;
        }
        let (result, revision) = search_view.get();
        with_surface(|surface| {
            if let Some(movement) = surface.viewport.on_result_changed(result.as_deref(), revision)
            {
                surface.apply_camera(&movement);
            }
        });
    });

    // Toolbox camera requests
    Effect::new(move |_| {
        if !ready.get() {
            return;
        }
        if let Some(movement) = state.camera.get() {
            with_surface(|surface| surface.apply_camera(&movement));
        }
    });

    let measuring = move || state.measure.with(MeasureTool::is_measuring);

    view! {
        <div class="map-container">
            <div id=MAP_ID class="map-surface" class:measuring=measuring></div>

            <Show when=move || !ready.get()>
                <div class="map-loading">
                    <div class="spinner"></div>
                    <span>"A carregar o mapa..."</span>
                </div>
            </Show>
        </div>
    }
}

// =============================================================================
// SURFACE
// =============================================================================

fn mount_surface(state: AppState, config: &MapConfig) {
    let map = leaflet::create_map(
        MAP_ID,
        &Options::new()
            .set("center", leaflet::lat_lng(config.home))
            .set("zoom", config.home_zoom)
            .set("maxZoom", config.max_zoom)
            .set("zoomControl", false)
            .into_js(),
    );

    for pane in Pane::ALL {
        let style = map.create_pane(pane.name()).style();
        let _ = style.set_property("z-index", &pane.z_index().to_string());
        if !pane.accepts_pointer() {
            let _ = style.set_property("pointer-events", "none");
        }
    }

    let on_click = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        if let Some(at) = leaflet::event_lat_lng(&event) {
            state.measure_event(MeasureEvent::MapClick(at));
        }
    });
    map.map_on("click", on_click.as_ref().unchecked_ref());

    let on_keydown =
        Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Escape" {
                state.measure_event(MeasureEvent::Escape);
            }
        });
    if let Some(window) = web_sys::window() {
        let _ = window
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }

    SURFACE.with(|slot| {
        *slot.borrow_mut() = Some(MapSurface {
            map,
            layers: HashMap::new(),
            stack: LayerStack::new(),
            viewport: ViewportController::new(),
            _on_click: on_click,
            on_keydown,
        });
    });

    log::info!(
        "Map initialized at {:.4}, {:.4} (zoom {})",
        config.home.lat,
        config.home.lon,
        config.home_zoom
    );
}

fn unmount_surface() {
    let surface = SURFACE.with(|slot| slot.borrow_mut().take());
    if let Some(surface) = surface {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "keydown",
                surface.on_keydown.as_ref().unchecked_ref(),
            );
        }
        surface.map.remove_map();
    }
}

impl MapSurface {
    fn reconcile(&mut self, next: Vec<LayerSpec>, state: AppState) {
        for change in self.stack.reconcile(next) {
            match change {
                LayerChange::Remove(key) => {
                    if let Some(mounted) = self.layers.remove(&key) {
                        mounted.layer.remove_layer();
                    }
                }
                LayerChange::Add(spec) => {
                    if let Some(mounted) = build_layer(&spec, state) {
                        mounted.layer.add_to(&self.map);
                        self.layers.insert(spec.key, mounted);
                    }
                }
                LayerChange::Update(spec) => {
                    if let Some(mounted) = self.layers.get(&spec.key) {
                        update_layer(&mounted.layer, &spec);
                    }
                }
            }
        }
    }

    fn apply_camera(&self, movement: &CameraMove) {
        match *movement {
            CameraMove::FitBounds {
                bbox,
                padding_px,
                duration_s,
            } => {
                let padding = f64::from(padding_px);
                self.map.fly_to_bounds(
                    &leaflet::bounds(&bbox),
                    &Options::new()
                        .set("duration", duration_s)
                        .set("padding", leaflet::pair(padding, padding))
                        .into_js(),
                );
            }
            CameraMove::FlyTo {
                center,
                zoom,
                duration_s,
            } => self.map.fly_to(
                &leaflet::lat_lng(center),
                f64::from(zoom),
                &Options::new().set("duration", duration_s).into_js(),
            ),
            CameraMove::ZoomIn => self.map.zoom_in(),
            CameraMove::ZoomOut => self.map.zoom_out(),
        }
    }
}

// =============================================================================
// LAYERS
// =============================================================================

fn build_layer(spec: &LayerSpec, state: AppState) -> Option<MountedLayer> {
    let pane = spec.pane.name();

    match &spec.kind {
        LayerKind::Tile(source) => {
            let options = Options::new()
                .set("attribution", source.attribution)
                .set("maxZoom", source.max_zoom)
                .set_opt("maxNativeZoom", source.max_native_zoom)
                .set("opacity", source.opacity)
                .set("pane", pane)
                .into_js();
            Some(MountedLayer::new(leaflet::create_tile_layer(
                source.url, &options,
            )))
        }
        LayerKind::FloodOverlay {
            dataset,
            style,
            popup,
            interactive,
        } => {
            let data = leaflet::geo_json(dataset.collection())?;
            let layer = leaflet::create_geo_json(&data, &geo_json_options(spec, *interactive, style));
            if let Some(html) = popup {
                layer.bind_popup(html);
            }
            Some(MountedLayer::new(layer.into()))
        }
        LayerKind::SearchArea {
            result,
            style,
            interactive,
        } => {
            let data = leaflet::geo_json(result.shape()?)?;
            let layer = leaflet::create_geo_json(&data, &geo_json_options(spec, *interactive, style));
            Some(MountedLayer::new(layer.into()))
        }
        LayerKind::SearchMarker {
            at,
            popup,
            interactive,
        } => {
            let marker = leaflet::create_marker(
                &leaflet::lat_lng(*at),
                &Options::new()
                    .set("icon", leaflet::marker_icon())
                    .set("interactive", *interactive)
                    .set("pane", pane)
                    .into_js(),
            );
            if let Some(html) = popup {
                marker.bind_popup(html);
            }
            Some(MountedLayer::new(marker.into()))
        }
        LayerKind::MeasurePin { index, at, tooltip } => {
            let marker = leaflet::create_marker(
                &leaflet::lat_lng(*at),
                &Options::new()
                    .set("icon", leaflet::marker_icon())
                    .set("draggable", true)
                    .set("pane", pane)
                    .into_js(),
            );
            if let Some(text) = tooltip {
                marker.bind_tooltip(text, &distance_tooltip_options());
            }

            let index = *index;
            let on_drag = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                if let Some(to) = leaflet::event_target_lat_lng(&event) {
                    state.measure_event(MeasureEvent::Drag { index, to });
                }
            });
            marker.layer_on("drag", on_drag.as_ref().unchecked_ref());

            Some(MountedLayer {
                layer: marker.into(),
                _handler: Some(on_drag),
            })
        }
        LayerKind::MeasureLine { from, to, style } => {
            let points = Array::of2(&leaflet::lat_lng(*from), &leaflet::lat_lng(*to));
            let line = leaflet::create_polyline(
                &points.into(),
                &leaflet::path_options(style)
                    .set("interactive", false)
                    .set("pane", pane)
                    .into_js(),
            );
            Some(MountedLayer::new(line.into()))
        }
    }
}

fn update_layer(layer: &Layer, spec: &LayerSpec) {
    match &spec.kind {
        LayerKind::Tile(_) => {}
        LayerKind::FloodOverlay { style, .. } | LayerKind::SearchArea { style, .. } => {
            layer
                .unchecked_ref::<VectorLayer>()
                .set_style(&leaflet::path_style(style));
        }
        LayerKind::SearchMarker { at, .. } => {
            layer.unchecked_ref::<Marker>().set_lat_lng(&leaflet::lat_lng(*at));
        }
        LayerKind::MeasurePin { at, tooltip, .. } => {
            layer.unchecked_ref::<Marker>().set_lat_lng(&leaflet::lat_lng(*at));
            if let Some(text) = tooltip {
                layer.set_tooltip_content(text);
            }
        }
        LayerKind::MeasureLine { from, to, style } => {
            let line = layer.unchecked_ref::<VectorLayer>();
            let points = Array::of2(&leaflet::lat_lng(*from), &leaflet::lat_lng(*to));
            line.set_lat_lngs(&points.into());
            line.set_style(&leaflet::path_style(style));
        }
    }
}

fn geo_json_options(spec: &LayerSpec, interactive: bool, style: &layers::PathStyle) -> JsValue {
    Options::new()
        .set("style", leaflet::path_style(style))
        .set("interactive", interactive)
        .set("pane", spec.pane.name())
        .into_js()
}

fn distance_tooltip_options() -> JsValue {
    Options::new()
        .set("permanent", true)
        .set("direction", "top")
        .set("offset", leaflet::pair(0.0, -40.0))
        .set("className", "measure-tooltip")
        .into_js()
}
