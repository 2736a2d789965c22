//! # Consent Storage
//!
//! Browser local storage for the consent marker.

use geoinunda_domain::consent::CONSENT_STORAGE_KEY;
use geoinunda_domain::{ConsentStore, DomainError};
use gloo_storage::{LocalStorage, Storage};

/// Consent marker kept in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalConsentStore;

impl ConsentStore for LocalConsentStore {
    fn is_accepted(&self) -> bool {
        // Any stored value counts, including ones written by older builds.
        LocalStorage::raw()
            .get_item(CONSENT_STORAGE_KEY)
            .ok()
            .flatten()
            .is_some_and(|value| !value.is_empty())
    }

    fn mark_accepted(&self) -> Result<(), DomainError> {
        LocalStorage::set(CONSENT_STORAGE_KEY, true)
            .map_err(|e| DomainError::Storage(e.to_string()))
    }
}

impl LocalConsentStore {
    /// Forget acceptance; the notice shows again on the next visit.
    pub fn clear(&self) {
        LocalStorage::delete(CONSENT_STORAGE_KEY);
    }
}
