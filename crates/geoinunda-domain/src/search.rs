//! # Search State Holder
//!
//! Owns the query text, the loading/expanded flags and the last resolved
//! [`SearchResult`]. Lookups are sequenced: only the most recently issued
//! ticket may apply its outcome, so a slow stale response can never overwrite
//! a newer search.

use std::sync::Arc;

use crate::SearchResult;
use crate::geocode::GeocodeError;

/// Handle for one in-flight lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What happened when a lookup completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result replaced the previous one; carries the new revision.
    Applied(u64),
    /// A newer lookup was issued (or the search was cleared) meanwhile.
    Superseded,
    /// The lookup failed; the previous result is kept.
    Rejected(GeocodeError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    query: String,
    expanded: bool,
    loading: bool,
    result: Option<Arc<SearchResult>>,
    revision: u64,
    issued: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current result, shared with the renderer.
    pub const fn result(&self) -> Option<&Arc<SearchResult>> {
        self.result.as_ref()
    }

    /// Bumped every time the result is replaced or cleared.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }

    /// Collapse the input when it loses focus with nothing typed.
    pub fn blur(&mut self) {
        if self.query.is_empty() {
            self.expanded = false;
        }
    }

    /// Start a lookup for the current query text.
    ///
    /// Returns `None` for blank input; nothing changes in that case.
    pub fn begin(&mut self) -> Option<SearchTicket> {
        if self.query.trim().is_empty() {
            return None;
        }
        self.issued += 1;
        self.loading = true;
        log::debug!("Search #{} issued for '{}'", self.issued, self.query);
        Some(SearchTicket {
            seq: self.issued,
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a lookup started with [`begin`](Self::begin).
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<SearchResult, GeocodeError>,
    ) -> SearchOutcome {
        if ticket.seq != self.issued {
            log::warn!(
                "Discarding result of search #{} ('{}'), #{} is current",
                ticket.seq,
                ticket.query,
                self.issued
            );
            return SearchOutcome::Superseded;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(Arc::new(result));
                self.revision += 1;
                SearchOutcome::Applied(self.revision)
            }
            Err(err) => SearchOutcome::Rejected(err),
        }
    }

    /// Empty the search box, drop the result and invalidate pending lookups.
    pub fn clear(&mut self) {
        self.query.clear();
        self.loading = false;
        self.issued += 1;
        if self.result.take().is_some() {
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LatLon;

    fn result(label: &str) -> SearchResult {
        SearchResult::point(LatLon::new(-26.3, -48.84), label)
    }

    #[test]
    fn test_blank_query_is_not_issued() {
        let mut state = SearchState::new();
        state.set_query("   ");
        assert!(state.begin().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_successful_search_replaces_result() {
        let mut state = SearchState::new();
        state.set_query("Centro");
        let ticket = state.begin().unwrap();
        assert!(state.is_loading());

        let outcome = state.complete(&ticket, Ok(result("Centro")));
        assert_eq!(outcome, SearchOutcome::Applied(1));
        assert!(!state.is_loading());
        assert_eq!(state.result().map(|r| r.label()), Some("Centro"));
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut state = SearchState::new();
        state.set_query("Centro");
        let first = state.begin().unwrap();
        state.complete(&first, Ok(result("Centro")));

        state.set_query("Rua Inexistente");
        let second = state.begin().unwrap();
        let outcome = state.complete(
            &second,
            Err(GeocodeError::NotFound {
                query: "Rua Inexistente".into(),
            }),
        );

        assert!(matches!(outcome, SearchOutcome::Rejected(ref e) if e.is_not_found()));
        assert_eq!(state.result().map(|r| r.label()), Some("Centro"));
        assert_eq!(state.revision(), 1);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_last_issued_wins() {
        let mut state = SearchState::new();
        state.set_query("Centro");
        let slow = state.begin().unwrap();
        state.set_query("Bucarein");
        let fast = state.begin().unwrap();

        assert_eq!(
            state.complete(&fast, Ok(result("Bucarein"))),
            SearchOutcome::Applied(1)
        );
        assert_eq!(
            state.complete(&slow, Ok(result("Centro"))),
            SearchOutcome::Superseded
        );
        assert_eq!(state.result().map(|r| r.label()), Some("Bucarein"));
    }

    #[test]
    fn test_stale_completion_keeps_loading_flag() {
        let mut state = SearchState::new();
        state.set_query("Centro");
        let slow = state.begin().unwrap();
        state.set_query("Bucarein");
        let _fast = state.begin().unwrap();

        state.complete(&slow, Ok(result("Centro")));
        assert!(state.is_loading());
        assert!(state.result().is_none());
    }

    #[test]
    fn test_clear_drops_result_and_pending_lookup() {
        let mut state = SearchState::new();
        state.set_query("Centro");
        let ticket = state.begin().unwrap();
        state.complete(&ticket, Ok(result("Centro")));

        state.set_query("Bucarein");
        let pending = state.begin().unwrap();
        state.clear();

        assert_eq!(state.query(), "");
        assert!(state.result().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.revision(), 2);
        assert_eq!(
            state.complete(&pending, Ok(result("Bucarein"))),
            SearchOutcome::Superseded
        );
    }

    #[test]
    fn test_expand_and_blur() {
        let mut state = SearchState::new();
        state.expand();
        assert!(state.is_expanded());

        state.set_query("Rua");
        state.blur();
        assert!(state.is_expanded());

        state.set_query("");
        state.blur();
        assert!(!state.is_expanded());
    }
}
