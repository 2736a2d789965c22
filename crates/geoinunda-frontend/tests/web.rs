//! Browser tests for the storage-backed pieces of the map.

#![cfg(target_arch = "wasm32")]

use geoinunda_domain::consent::CONSENT_STORAGE_KEY;
use geoinunda_domain::{ConsentNotice, ConsentPhase, ConsentStore};
use geoinunda_frontend::services::LocalConsentStore;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_fresh_browser_shows_notice() {
    LocalConsentStore.clear();
    assert!(!LocalConsentStore.is_accepted());
    assert_eq!(
        ConsentNotice::on_startup(&LocalConsentStore).phase(),
        ConsentPhase::Pending
    );
}

#[wasm_bindgen_test]
fn test_accept_writes_flag() {
    LocalConsentStore.clear();
    let mut notice = ConsentNotice::on_startup(&LocalConsentStore);
    notice.reveal();
    notice.accept(&LocalConsentStore).unwrap();

    let raw = LocalStorage::raw().get_item(CONSENT_STORAGE_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some("true"));
    assert_eq!(
        ConsentNotice::on_startup(&LocalConsentStore).phase(),
        ConsentPhase::Hidden
    );
    LocalConsentStore.clear();
}

#[wasm_bindgen_test]
fn test_decline_leaves_storage_untouched() {
    LocalConsentStore.clear();
    let mut notice = ConsentNotice::on_startup(&LocalConsentStore);
    notice.reveal();
    notice.decline();

    assert!(!notice.is_banner_visible());
    assert!(!LocalConsentStore.is_accepted());
}

#[wasm_bindgen_test]
fn test_existing_raw_value_counts_as_accepted() {
    LocalStorage::raw()
        .set_item(CONSENT_STORAGE_KEY, "true")
        .unwrap();
    assert!(LocalConsentStore.is_accepted());
    LocalConsentStore.clear();
}
