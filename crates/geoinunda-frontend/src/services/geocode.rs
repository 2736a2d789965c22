//! # Geocode Service
//!
//! Browser transport for the geocode client and the search submit flow.

use gloo_net::http::Request;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use geoinunda_domain::{
    GeocodeClient, GeocodeError, GeocodeRequest, GeocodeTransport, Place, SearchOutcome,
    SearchState,
};

use crate::state::{AlertSeverity, AppState};

/// Sends geocode lookups with the browser's `fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl GeocodeTransport for GlooTransport {
    async fn search(&self, request: &GeocodeRequest) -> Result<Vec<Place>, GeocodeError> {
        let response = Request::get(&request.endpoint)
            .query(request.params.iter().map(|(key, value)| (*key, value.as_str())))
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(GeocodeError::Transport(format!(
                "provider returned status {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Place>>()
            .await
            .map_err(|e| GeocodeError::Malformed(e.to_string()))
    }
}

/// Submit the current query. Blank queries are ignored; a lookup that
/// finishes after a newer one was issued is dropped by the search state.
pub fn submit_search(state: AppState) {
    let Some(ticket) = state.search.try_update(SearchState::begin).flatten() else {
        return;
    };

    let config = state.geocoder.get_value();
    spawn_local(async move {
        let client = GeocodeClient::new(GlooTransport, config);
        let outcome = client.resolve(ticket.query()).await;

        match state.search.try_update(|search| search.complete(&ticket, outcome)) {
            Some(SearchOutcome::Applied(revision)) => {
                log::info!("Search #{} applied as revision {}", ticket.seq(), revision);
            }
            Some(SearchOutcome::Rejected(err)) => {
                log::warn!("Search #{} failed: {}", ticket.seq(), err);
                if let Some(message) = err.user_message() {
                    let severity = if err.is_not_found() {
                        AlertSeverity::Warning
                    } else {
                        AlertSeverity::Critical
                    };
                    state.push_alert(severity, message);
                }
            }
            Some(SearchOutcome::Superseded) | None => {}
        }
    });
}
