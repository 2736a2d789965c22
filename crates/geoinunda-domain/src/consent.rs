//! Cookie/consent notice backed by a single persisted flag.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Key of the persisted acceptance marker.
pub const CONSENT_STORAGE_KEY: &str = "geoinunda_cookie_consent";

/// Delay before the notice slides in, in milliseconds.
pub const CONSENT_REVEAL_DELAY_MS: u32 = 1500;

/// Where the acceptance marker lives (browser local storage in the app).
pub trait ConsentStore {
    fn is_accepted(&self) -> bool;
    fn mark_accepted(&self) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConsentPhase {
    /// Nothing shown
    #[default]
    Hidden,
    /// Not yet accepted; waiting for the reveal delay
    Pending,
    /// Banner shown
    Banner,
    /// Banner shown with the terms modal open on top
    Terms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsentNotice {
    phase: ConsentPhase,
}

impl ConsentNotice {
    /// Read the flag once at startup.
    pub fn on_startup(store: &impl ConsentStore) -> Self {
        let phase = if store.is_accepted() {
            ConsentPhase::Hidden
        } else {
            ConsentPhase::Pending
        };
        Self { phase }
    }

    pub const fn phase(&self) -> ConsentPhase {
        self.phase
    }

    pub const fn is_banner_visible(&self) -> bool {
        matches!(self.phase, ConsentPhase::Banner | ConsentPhase::Terms)
    }

    pub const fn is_terms_open(&self) -> bool {
        matches!(self.phase, ConsentPhase::Terms)
    }

    /// Reveal delay elapsed.
    pub fn reveal(&mut self) {
        if self.phase == ConsentPhase::Pending {
            self.phase = ConsentPhase::Banner;
        }
    }

    pub fn open_terms(&mut self) {
        if self.phase == ConsentPhase::Banner {
            self.phase = ConsentPhase::Terms;
        }
    }

    pub fn close_terms(&mut self) {
        if self.phase == ConsentPhase::Terms {
            self.phase = ConsentPhase::Banner;
        }
    }

    /// Persist acceptance and hide the notice.
    ///
    /// # Errors
    ///
    /// Propagates storage failures; the notice is hidden either way.
    pub fn accept(&mut self, store: &impl ConsentStore) -> Result<(), DomainError> {
        self.phase = ConsentPhase::Hidden;
        store.mark_accepted()
    }

    /// Hide for this session only.
    pub fn decline(&mut self) {
        self.phase = ConsentPhase::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct MemoryStore(Cell<bool>);

    impl ConsentStore for MemoryStore {
        fn is_accepted(&self) -> bool {
            self.0.get()
        }

        fn mark_accepted(&self) -> Result<(), DomainError> {
            self.0.set(true);
            Ok(())
        }
    }

    #[test]
    fn test_first_visit_reveals_after_delay() {
        let store = MemoryStore::default();
        let mut notice = ConsentNotice::on_startup(&store);
        assert_eq!(notice.phase(), ConsentPhase::Pending);
        assert!(!notice.is_banner_visible());

        notice.reveal();
        assert!(notice.is_banner_visible());
    }

    #[test]
    fn test_accept_persists_flag() {
        let store = MemoryStore::default();
        let mut notice = ConsentNotice::on_startup(&store);
        notice.reveal();
        notice.accept(&store).unwrap();

        assert_eq!(notice.phase(), ConsentPhase::Hidden);
        assert!(store.is_accepted());
        assert_eq!(ConsentNotice::on_startup(&store).phase(), ConsentPhase::Hidden);
    }

    #[test]
    fn test_decline_does_not_persist() {
        let store = MemoryStore::default();
        let mut notice = ConsentNotice::on_startup(&store);
        notice.reveal();
        notice.decline();

        assert!(!notice.is_banner_visible());
        assert!(!store.is_accepted());
        assert_eq!(ConsentNotice::on_startup(&store).phase(), ConsentPhase::Pending);
    }

    #[test]
    fn test_terms_modal() {
        let store = MemoryStore::default();
        let mut notice = ConsentNotice::on_startup(&store);
        notice.open_terms();
        assert_eq!(notice.phase(), ConsentPhase::Pending);

        notice.reveal();
        notice.open_terms();
        assert!(notice.is_terms_open());
        assert!(notice.is_banner_visible());

        notice.close_terms();
        assert_eq!(notice.phase(), ConsentPhase::Banner);

        notice.open_terms();
        notice.accept(&store).unwrap();
        assert!(!notice.is_terms_open());
        assert!(store.is_accepted());
    }
}
