//! # Flood Overlay Loader
//!
//! Fetches the static flood polygon collection once at startup.

use std::sync::Arc;

use gloo_net::http::Request;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use geoinunda_domain::FloodDataset;

use crate::state::AppState;

/// Fetch and parse the flood collection.
pub async fn fetch_flood_dataset(url: &str) -> Result<FloodDataset, String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!("{url} returned status {}", response.status()));
    }

    let raw = response.text().await.map_err(|e| e.to_string())?;
    FloodDataset::from_json(&raw).map_err(|e| e.to_string())
}

/// Load the overlay in the background. A failure only leaves the overlay
/// absent; the rest of the map keeps working.
pub fn load_flood_overlay(state: AppState) {
    let url = state.map_config.with_value(|config| config.flood_dataset_url.clone());

    spawn_local(async move {
        match fetch_flood_dataset(&url).await {
            Ok(dataset) => {
                log::info!("Flood overlay loaded: {} feature(s)", dataset.feature_count());
                state.flood.set(Some(Arc::new(dataset)));
            }
            Err(e) => log::error!("Error loading flood data from {}: {}", url, e),
        }
    });
}
