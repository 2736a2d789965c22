//! # GeoInunda Frontend
//!
//! Interactive flood-risk map: address search, base map switching, flood
//! overlay and a two-point distance ruler on top of Leaflet.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod components;
pub mod leaflet;
pub mod services;
pub mod state;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, Title};

use components::*;
use state::*;

const PAGE_TITLE: &str = "Joinville GeoInunda - Consulta de Risco de Inundações";
const PAGE_DESCRIPTION: &str = "Mapa interativo de suscetibilidade a inundações em Joinville, \
     Santa Catarina. Consulte riscos de alagamentos e enchentes por rua.";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();
    services::load_flood_overlay(use_app_state());

    view! {
        <Title text=PAGE_TITLE />
        <Meta name="description" content=PAGE_DESCRIPTION />

        <main class="app">
            <FloodMap />
            <div class="top-bar">
                <SearchBar />
            </div>
            <Toolbox />
            <LayerMenu />
            <ConsentBanner />
        </main>
        <ToastContainer />
    }
}

#[component]
fn ToastContainer() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="toast-container">
            <For
                each=move || state.alerts.get()
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    view! {
                        <div class="toast">
                            <div class="flex justify-between items-center gap-md">
                                <div class="flex items-center gap-sm">
                                    <span class=format!("status-dot {}", alert.severity.class())></span>
                                    <span>{alert.message.clone()}</span>
                                </div>
                                <button class="btn btn-sm" on:click=move |_| state.dismiss_alert(id)>
                                    "×"
                                </button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Browser entry point.
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("GeoInunda v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(App);
}
