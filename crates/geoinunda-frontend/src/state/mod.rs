//! # Application State
//!
//! Reactive state for the flood map. Each signal wraps one of the domain
//! state holders; components mutate them only through their transitions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use geoinunda_domain::{
    CameraMove, ConsentNotice, FloodDataset, GeocoderConfig, MapConfig, MapViewState,
    MeasureEvent, MeasureTool, SearchState,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::LocalConsentStore;

/// How long a toast stays up before dismissing itself.
const ALERT_TTL_MS: u32 = 6000;

/// Global application state
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    pub search: RwSignal<SearchState>,
    pub view: RwSignal<MapViewState>,
    pub measure: RwSignal<MeasureTool>,
    pub flood: RwSignal<Option<Arc<FloodDataset>>>,
    /// Pending camera request from the toolbox (home, zoom in/out)
    pub camera: RwSignal<Option<CameraMove>>,
    pub layer_menu_open: RwSignal<bool>,
    pub consent: RwSignal<ConsentNotice>,
    pub alerts: RwSignal<Vec<Alert>>,
    pub geocoder: StoredValue<GeocoderConfig>,
    pub map_config: StoredValue<MapConfig>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            search: RwSignal::new(SearchState::new()),
            view: RwSignal::new(MapViewState::default()),
            measure: RwSignal::new(MeasureTool::new()),
            flood: RwSignal::new(None),
            camera: RwSignal::new(None),
            layer_menu_open: RwSignal::new(false),
            consent: RwSignal::new(ConsentNotice::on_startup(&LocalConsentStore)),
            alerts: RwSignal::new(Vec::new()),
            geocoder: StoredValue::new(GeocoderConfig::default()),
            map_config: StoredValue::new(MapConfig::default()),
        }
    }

    /// Show a toast that dismisses itself after a few seconds.
    pub fn push_alert(&self, severity: AlertSeverity, message: impl Into<String>) {
        let alert = Alert::new(severity, message);
        let id = alert.id;
        self.alerts.update(|alerts| alerts.push(alert));

        let alerts = self.alerts;
        Timeout::new(ALERT_TTL_MS, move || {
            alerts.try_update(|alerts| alerts.retain(|a| a.id != id));
        })
        .forget();
    }

    /// Feed an event to the ruler, notifying only on an actual change.
    pub fn measure_event(&self, event: MeasureEvent) {
        let current = self.measure.get_untracked();
        let next = current.apply(event);
        if next != current {
            self.measure.set(next);
        }
    }

    pub fn dismiss_alert(&self, id: Uuid) {
        self.alerts.update(|alerts| alerts.retain(|a| a.id != id));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

pub fn provide_app_state() {
    let state = AppState::new();
    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
