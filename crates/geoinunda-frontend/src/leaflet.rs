//! # Leaflet Bindings
//!
//! The slice of the Leaflet.js API the map uses, plus helpers that turn
//! domain values into the plain JS objects Leaflet expects.

use geoinunda_domain::layers::PathStyle;
use geoinunda_domain::{Bbox, LatLon};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn create_map(id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &Map, lat_lng: &JsValue, zoom: f64, options: &JsValue);

    #[wasm_bindgen(method, js_name = flyToBounds)]
    pub fn fly_to_bounds(this: &Map, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method, js_name = zoomIn)]
    pub fn zoom_in(this: &Map);

    #[wasm_bindgen(method, js_name = zoomOut)]
    pub fn zoom_out(this: &Map);

    #[wasm_bindgen(method, js_name = createPane)]
    pub fn create_pane(this: &Map, name: &str) -> web_sys::HtmlElement;

    #[wasm_bindgen(method, js_name = on)]
    pub fn map_on(this: &Map, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_map(this: &Map);

    /// Anything that can be added to and removed from the map
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &Map);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_layer(this: &Layer);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, content: &str);

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &Layer, content: &str, options: &JsValue);

    #[wasm_bindgen(method, js_name = setTooltipContent)]
    pub fn set_tooltip_content(this: &Layer, content: &str);

    #[wasm_bindgen(method, js_name = on)]
    pub fn layer_on(this: &Layer, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn create_tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn create_marker(lat_lng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    pub fn set_lat_lng(this: &Marker, lat_lng: &JsValue);

    #[wasm_bindgen(method, js_name = getLatLng)]
    pub fn get_lat_lng(this: &Marker) -> LatLng;

    /// GeoJSON groups and polylines; both accept `setStyle`
    #[wasm_bindgen(extends = Layer)]
    pub type VectorLayer;

    #[wasm_bindgen(js_namespace = L, js_name = geoJSON)]
    pub fn create_geo_json(data: &JsValue, options: &JsValue) -> VectorLayer;

    #[wasm_bindgen(js_namespace = L, js_name = polyline)]
    pub fn create_polyline(lat_lngs: &JsValue, options: &JsValue) -> VectorLayer;

    #[wasm_bindgen(method, js_name = setStyle)]
    pub fn set_style(this: &VectorLayer, style: &JsValue);

    #[wasm_bindgen(method, js_name = setLatLngs)]
    pub fn set_lat_lngs(this: &VectorLayer, lat_lngs: &JsValue);

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    pub fn create_icon(options: &JsValue) -> JsValue;

    pub type LatLng;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &LatLng) -> f64;
}

const MARKER_ICON_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png";
const MARKER_ICON_2X_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png";
const MARKER_SHADOW_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";

/// Builder for Leaflet option objects
#[derive(Debug)]
pub struct Options(Object);

impl Options {
    pub fn new() -> Self {
        Self(Object::new())
    }

    pub fn set(self, key: &str, value: impl Into<JsValue>) -> Self {
        // Setting a property on a fresh plain object cannot fail.
        let _ = Reflect::set(&self.0, &JsValue::from_str(key), &value.into());
        self
    }

    pub fn set_opt(self, key: &str, value: Option<impl Into<JsValue>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn into_js(self) -> JsValue {
        self.0.into()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// `[x, y]` as a JS array
pub fn pair(x: f64, y: f64) -> JsValue {
    Array::of2(&JsValue::from_f64(x), &JsValue::from_f64(y)).into()
}

pub fn lat_lng(at: LatLon) -> JsValue {
    pair(at.lat, at.lon)
}

pub fn bounds(bbox: &Bbox) -> JsValue {
    let [south_west, north_east] = bbox.corners();
    Array::of2(
        &pair(south_west[0], south_west[1]),
        &pair(north_east[0], north_east[1]),
    )
    .into()
}

/// Path options for a style, open for further keys.
pub fn path_options(style: &PathStyle) -> Options {
    Options::new()
        .set("color", style.color)
        .set("weight", style.weight)
        .set_opt("dashArray", style.dash_array)
        .set_opt("fillColor", style.fill_color)
        .set("fillOpacity", style.fill_opacity)
}

pub fn path_style(style: &PathStyle) -> JsValue {
    path_options(style).into_js()
}

/// The stock Leaflet pin, loaded from the CDN so bundling does not break it.
pub fn marker_icon() -> JsValue {
    create_icon(
        &Options::new()
            .set("iconUrl", MARKER_ICON_URL)
            .set("iconRetinaUrl", MARKER_ICON_2X_URL)
            .set("shadowUrl", MARKER_SHADOW_URL)
            .set("iconSize", pair(25.0, 41.0))
            .set("iconAnchor", pair(12.0, 41.0))
            .set("popupAnchor", pair(1.0, -34.0))
            .into_js(),
    )
}

/// Convert a GeoJSON document for `L.geoJSON`.
pub fn geo_json(value: &serde_json::Value) -> Option<JsValue> {
    let text = serde_json::to_string(value).ok()?;
    match js_sys::JSON::parse(&text) {
        Ok(data) => Some(data),
        Err(e) => {
            log::error!("GeoJSON rejected by the browser: {:?}", e);
            None
        }
    }
}

/// Position carried by a Leaflet mouse event (`event.latlng`).
pub fn event_lat_lng(event: &JsValue) -> Option<LatLon> {
    let latlng = Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    if latlng.is_undefined() || latlng.is_null() {
        return None;
    }
    let latlng: LatLng = latlng.unchecked_into();
    LatLon::try_new(latlng.lat(), latlng.lng()).ok()
}

/// Current position of the marker an event was fired on (`event.target`).
pub fn event_target_lat_lng(event: &JsValue) -> Option<LatLon> {
    let target = Reflect::get(event, &JsValue::from_str("target")).ok()?;
    if target.is_undefined() || target.is_null() {
        return None;
    }
    let latlng = target.unchecked_into::<Marker>().get_lat_lng();
    LatLon::try_new(latlng.lat(), latlng.lng()).ok()
}

/// Whether the Leaflet script has been loaded on the page.
pub fn is_loaded() -> bool {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("L")).ok())
        .is_some_and(|l| !l.is_undefined())
}
