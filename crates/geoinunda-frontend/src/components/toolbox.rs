//! # GIS Toolbox
//!
//! Compass (back home), ruler toggle and zoom buttons.

use leptos::prelude::*;

use geoinunda_domain::{CameraMove, MeasureEvent, MeasurePhase, MeasureTool};

use crate::state::use_app_state;

#[component]
pub fn Toolbox() -> impl IntoView {
    let state = use_app_state();

    let measuring = move || state.measure.with(MeasureTool::is_measuring);
    let request = move |movement: CameraMove| state.camera.set(Some(movement));
    let go_home = move |_| request(state.map_config.with_value(CameraMove::home));

    let hint = move || match state.measure.with(MeasureTool::phase) {
        MeasurePhase::ArmedEmpty => Some("Clique no mapa para marcar o ponto inicial"),
        MeasurePhase::ArmedOne => Some("Clique no mapa para marcar o ponto final"),
        MeasurePhase::Idle | MeasurePhase::Done => None,
    };

    view! {
        <div class="toolbox">
            <button class="tool" title="Voltar ao início" on:click=go_home>
                "🧭"
            </button>
            <button
                class="tool"
                class:active=measuring
                title="Medir Distância"
                on:click=move |_| state.measure_event(MeasureEvent::Toggle)
            >
                "📏"
            </button>
            <button class="tool" title="Aumentar Zoom" on:click=move |_| request(CameraMove::ZoomIn)>
                "+"
            </button>
            <button class="tool" title="Diminuir Zoom" on:click=move |_| request(CameraMove::ZoomOut)>
                "−"
            </button>
        </div>

        {move || hint().map(|text| view! {
            <div class="measure-hint">
                <span>{text}</span>
                <span class="text-muted">" (Esc para cancelar)"</span>
            </div>
        })}
    }
}
