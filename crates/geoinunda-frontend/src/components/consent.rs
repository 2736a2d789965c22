//! # Consent Notice
//!
//! Local-storage notice shown once per browser, with a terms modal.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use geoinunda_domain::consent::CONSENT_REVEAL_DELAY_MS;
use geoinunda_domain::{ConsentNotice, ConsentPhase};

use crate::services::LocalConsentStore;
use crate::state::use_app_state;

#[component]
pub fn ConsentBanner() -> impl IntoView {
    let state = use_app_state();

    if state.consent.with_untracked(|c| c.phase() == ConsentPhase::Pending) {
        Timeout::new(CONSENT_REVEAL_DELAY_MS, move || {
            state.consent.try_update(ConsentNotice::reveal);
        })
        .forget();
    }

    let accept = move || {
        if let Some(Err(e)) = state.consent.try_update(|c| c.accept(&LocalConsentStore)) {
            log::warn!("Consent not persisted: {}", e);
        }
    };
    let decline = move |_| state.consent.update(ConsentNotice::decline);

    let visible = move || state.consent.with(ConsentNotice::is_banner_visible);
    let terms_open = move || state.consent.with(ConsentNotice::is_terms_open);

    view! {
        <Show when=terms_open>
            <div class="modal-backdrop">
                <div class="modal">
                    <div class="modal-header">
                        <h2>"Termos de Uso e Cookies"</h2>
                        <button
                            class="btn btn-icon"
                            on:click=move |_| state.consent.update(ConsentNotice::close_terms)
                        >
                            "×"
                        </button>
                    </div>
                    <div class="modal-body">
                        <p>
                            "O " <strong>"Joinville GeoInunda"</strong>
                            " utiliza recursos locais do seu próprio navegador (localStorage/cache) \
                             apenas para manter a interface funcionando e lembrar preferências \
                             (como este aviso)."
                        </p>
                        <p>
                            "Nós " <strong>"não"</strong>
                            " coletamos informações em massa, não repassamos registros de pesquisa \
                             a terceiros e não utilizamos cookies de rastreamento ou publicidade."
                        </p>
                        <p class="notice">
                            <strong>"Aviso legal: "</strong>
                            "Esta ferramenta destina-se a fins preventivos e educativos. Não \
                             substitui os dados oficiais da Prefeitura nem laudos técnicos da \
                             Defesa Civil."
                        </p>
                    </div>
                    <div class="modal-footer">
                        <button class="btn btn-primary" on:click=move |_| accept()>
                            "Compreendido (Aceitar)"
                        </button>
                    </div>
                </div>
            </div>
        </Show>

        <Show when=visible>
            <div class="consent-banner">
                <p>
                    "Usamos cookies locais para aprimorar o mapa. Ao continuar, você concorda com nossos "
                    <button
                        class="link"
                        on:click=move |_| state.consent.update(ConsentNotice::open_terms)
                    >
                        "termos e cookies"
                    </button>
                    "."
                </p>
                <div class="consent-actions">
                    <button class="btn btn-sm" on:click=decline>"Agora não"</button>
                    <button class="btn btn-sm btn-primary" on:click=move |_| accept()>
                        "Concordar"
                    </button>
                </div>
                <button class="consent-close" aria-label="Fechar aviso" on:click=decline>
                    "×"
                </button>
            </div>
        </Show>
    }
}
