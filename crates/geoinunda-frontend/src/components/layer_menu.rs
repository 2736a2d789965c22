//! # Layer Menu
//!
//! Base map picker and flood overlay switch.

use leptos::prelude::*;

use geoinunda_domain::{BaseLayer, MapViewState};

use crate::state::use_app_state;

#[component]
pub fn LayerMenu() -> impl IntoView {
    let state = use_app_state();

    let open = move || state.layer_menu_open.get();
    let flood_visible = move || state.view.with(|v| v.flood_overlay_visible);

    view! {
        <div class="layer-menu">
            <Show when=open>
                <div class="layer-menu-panel">
                    <h3 class="layer-menu-title">"Mapa Base"</h3>
                    {BaseLayer::ALL
                        .into_iter()
                        .map(|base| view! { <BaseLayerOption base=base /> })
                        .collect_view()}

                    <div class="layer-menu-divider"></div>

                    <label class="layer-toggle">
                        <span>"Mancha Inundação"</span>
                        <div class="switch" class:on=flood_visible>
                            <div class="switch-knob"></div>
                        </div>
                        <input
                            type="checkbox"
                            class="hidden"
                            prop:checked=flood_visible
                            on:change=move |_| state.view.update(MapViewState::toggle_flood_overlay)
                        />
                    </label>
                </div>
            </Show>

            <button
                class="layer-menu-button"
                class:open=open
                title="Camadas do Mapa"
                on:click=move |_| state.layer_menu_open.update(|open| *open = !*open)
            >
                "▤"
            </button>
        </div>
    }
}

/// One base map entry; picking it closes the menu.
#[component]
fn BaseLayerOption(base: BaseLayer) -> impl IntoView {
    let state = use_app_state();
    let selected = move || state.view.with(|v| v.base_layer == base);

    let pick = move |_| {
        state.view.update(|v| v.select_base_layer(base));
        state.layer_menu_open.set(false);
    };

    view! {
        <button class="layer-option" class:selected=selected on:click=pick>
            <span>{base.label()}</span>
            <Show when=selected>
                <span class="check">"✓"</span>
            </Show>
        </button>
    }
}
