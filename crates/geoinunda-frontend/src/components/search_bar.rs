//! # Search Bar
//!
//! Collapsible address box. Enter submits; a spinner replaces the icon while
//! a lookup is in flight.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use geoinunda_domain::SearchState;

use crate::services::submit_search;
use crate::state::use_app_state;

#[component]
pub fn SearchBar() -> impl IntoView {
    let state = use_app_state();

    let expanded = move || state.search.with(SearchState::is_expanded);
    let loading = move || state.search.with(SearchState::is_loading);
    let has_text = move || state.search.with(|s| !s.query().is_empty());

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            submit_search(state);
        }
    };

    view! {
        <div
            class="search-bar"
            class:expanded=expanded
            on:click=move |_| state.search.update(SearchState::expand)
        >
            <div class="search-icon">
                <Show
                    when=loading
                    fallback=|| view! { <span class="icon-search">"⌕"</span> }
                >
                    <span class="spinner spinner-sm"></span>
                </Show>
            </div>

            <input
                type="text"
                class="search-input"
                placeholder="Pesquise a moradia..."
                prop:value=move || state.search.with(|s| s.query().to_string())
                on:input=move |ev| state.search.update(|s| s.set_query(event_target_value(&ev)))
                on:keydown=on_keydown
                on:blur=move |_| state.search.update(SearchState::blur)
            />

            <Show when=has_text>
                <button
                    class="search-clear"
                    title="Limpar pesquisa"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        state.search.update(SearchState::clear);
                    }
                >
                    "×"
                </button>
            </Show>
        </div>
    }
}
