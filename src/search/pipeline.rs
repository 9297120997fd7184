//! Query search and selection-driven filtering.
//!
//! [`SearchState`] is a plain state machine: every input returns the
//! request to issue, if any, and completions are fed back tagged with the
//! sequence number they were issued under. A completion whose number is not
//! the latest for its kind is stale and dropped, so a slow early response
//! can never overwrite a newer one. [`SearchPipeline`] runs the requests on
//! a tokio runtime and hands completions back through a channel that the UI
//! drains once per frame.

use super::catalog::UnitCatalog;
use crate::error::CatalogError;
use crate::types::*;
use eframe::egui;
use futures::future::FutureExt;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A catalog call the state wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// Look up champions and traits matching `query`
    Search {
        /// Sequence number to report back with the result
        seq: u64,
        /// Trimmed query text
        query: String,
    },
    /// Fetch the units matching the selection
    Filter {
        /// Sequence number to report back with the result
        seq: u64,
        /// Selected champion names
        champions: Vec<String>,
        /// Selected trait names
        traits: Vec<String>,
    },
}

/// Query text, suggestions, selection and the filtered unit list.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    results: Vec<SearchItem>,
    selected: Vec<SearchItem>,
    filtered: Vec<Unit>,
    searching: bool,
    filtering: bool,
    search_seq: u64,
    filter_seq: u64,
    debounce_secs: f64,
    search_due_at: Option<f64>,
}

impl SearchState {
    /// Creates an empty state. A zero debounce issues a search on every edit.
    pub fn new(debounce_secs: f64) -> Self {
        Self {
            debounce_secs,
            ..Default::default()
        }
    }

    /// Current query text, as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current suggestions.
    pub fn results(&self) -> &[SearchItem] {
        &self.results
    }

    /// Selected filter items in the order they were added.
    pub fn selected(&self) -> &[SearchItem] {
        &self.selected
    }

    /// Units matching the selection.
    pub fn filtered(&self) -> &[Unit] {
        &self.filtered
    }

    /// True while a search request is outstanding.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// True while a filter request is outstanding.
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    /// Time at which a debounced search becomes due.
    pub fn search_due_at(&self) -> Option<f64> {
        self.search_due_at
    }

    /// Replaces the query text.
    ///
    /// Blank text clears the suggestions immediately and issues nothing.
    /// Otherwise a search is issued now, or scheduled when debouncing.
    pub fn set_query(&mut self, text: impl Into<String>, now: f64) -> Option<SearchRequest> {
        self.query = text.into();
        if self.query.trim().is_empty() {
            self.cancel_search();
            return None;
        }
        if self.debounce_secs > 0.0 {
            self.search_due_at = Some(now + self.debounce_secs);
            return None;
        }
        Some(self.issue_search())
    }

    /// Issues the debounced search once its quiet period has passed.
    pub fn flush_due(&mut self, now: f64) -> Option<SearchRequest> {
        match self.search_due_at {
            Some(due) if now >= due => {
                self.search_due_at = None;
                if self.query.trim().is_empty() {
                    None
                } else {
                    Some(self.issue_search())
                }
            }
            _ => None,
        }
    }

    /// Applies a search completion.
    ///
    /// # Returns
    ///
    /// `false` if the completion was stale and ignored
    pub fn complete_search(
        &mut self,
        seq: u64,
        result: Result<Vec<SearchItem>, CatalogError>,
    ) -> bool {
        if seq != self.search_seq {
            log::debug!("Discarding stale search response #{} (latest #{})", seq, self.search_seq);
            return false;
        }
        self.searching = false;
        match result {
            Ok(items) => self.results = items,
            Err(e) => {
                log::warn!("Search for '{}' failed: {}", self.query.trim(), e);
                self.results.clear();
            }
        }
        true
    }

    /// Adds an item to the selection.
    ///
    /// An item whose name is already selected is ignored. Otherwise the
    /// query and suggestions are cleared and a filter request is issued.
    pub fn add_selected(&mut self, item: SearchItem) -> Option<SearchRequest> {
        if self.selected.iter().any(|s| s.name == item.name) {
            return None;
        }
        self.selected.push(item);
        self.query.clear();
        self.cancel_search();
        Some(self.issue_filter())
    }

    /// Removes the selected item with the given name.
    ///
    /// # Returns
    ///
    /// A filter request, or `None` if nothing was removed
    pub fn remove_selected(&mut self, name: &str) -> Option<SearchRequest> {
        let before = self.selected.len();
        self.selected.retain(|s| s.name != name);
        if self.selected.len() == before {
            return None;
        }
        Some(self.issue_filter())
    }

    /// Request for the list matching the current selection, used at startup.
    pub fn initial_filter(&mut self) -> SearchRequest {
        self.issue_filter()
    }

    /// Applies a filter completion.
    ///
    /// # Returns
    ///
    /// `false` if the completion was stale and ignored
    pub fn complete_filter(&mut self, seq: u64, result: Result<Vec<Unit>, CatalogError>) -> bool {
        if seq != self.filter_seq {
            log::debug!("Discarding stale filter response #{} (latest #{})", seq, self.filter_seq);
            return false;
        }
        self.filtering = false;
        match result {
            Ok(units) => self.filtered = units,
            Err(e) => {
                log::warn!("Filtering units failed: {}", e);
                self.filtered.clear();
            }
        }
        true
    }

    /// Closes the suggestion list after a press outside the search panel.
    ///
    /// # Returns
    ///
    /// `true` if suggestions were showing and have been dismissed
    pub fn dismiss_if_outside(&mut self, inside_panel: bool) -> bool {
        if inside_panel || self.results.is_empty() {
            return false;
        }
        self.query.clear();
        self.cancel_search();
        true
    }

    fn cancel_search(&mut self) {
        self.results.clear();
        self.searching = false;
        self.search_due_at = None;
        // Any response still in flight now carries an outdated number.
        self.search_seq += 1;
    }

    fn issue_search(&mut self) -> SearchRequest {
        self.search_seq += 1;
        self.searching = true;
        SearchRequest::Search {
            seq: self.search_seq,
            query: self.query.trim().to_string(),
        }
    }

    fn issue_filter(&mut self) -> SearchRequest {
        self.filter_seq += 1;
        self.filtering = true;
        let names = |kind: ItemKind| {
            self.selected
                .iter()
                .filter(|s| s.kind == kind)
                .map(|s| s.name.clone())
                .collect::<Vec<_>>()
        };
        SearchRequest::Filter {
            seq: self.filter_seq,
            champions: names(ItemKind::Champion),
            traits: names(ItemKind::Trait),
        }
    }
}

/// A finished catalog call on its way back to the UI thread.
#[derive(Debug)]
enum Completion {
    Search {
        seq: u64,
        result: Result<Vec<SearchItem>, CatalogError>,
    },
    Filter {
        seq: u64,
        result: Result<Vec<Unit>, CatalogError>,
    },
}

/// Runs [`SearchState`] requests against a catalog on a tokio runtime.
pub struct SearchPipeline {
    state: SearchState,
    catalog: Arc<dyn UnitCatalog>,
    runtime: tokio::runtime::Handle,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    repaint: Option<egui::Context>,
    in_flight: usize,
}

impl SearchPipeline {
    /// Creates a pipeline that spawns catalog calls onto `runtime`.
    pub fn new(
        catalog: Arc<dyn UnitCatalog>,
        runtime: tokio::runtime::Handle,
        debounce_secs: f64,
    ) -> Self {
        let (sender, receiver) = channel();
        Self {
            state: SearchState::new(debounce_secs),
            catalog,
            runtime,
            sender,
            receiver,
            repaint: None,
            in_flight: 0,
        }
    }

    /// Requests a repaint of `ctx` whenever a call completes.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    /// Current state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Number of calls issued whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fetches the unfiltered unit list.
    pub fn start(&mut self) {
        let request = self.state.initial_filter();
        self.dispatch(request);
    }

    /// See [`SearchState::set_query`].
    pub fn set_query(&mut self, text: impl Into<String>, now: f64) {
        if let Some(request) = self.state.set_query(text, now) {
            self.dispatch(request);
        }
    }

    /// See [`SearchState::add_selected`].
    pub fn add_selected(&mut self, item: SearchItem) {
        if let Some(request) = self.state.add_selected(item) {
            self.dispatch(request);
        }
    }

    /// See [`SearchState::remove_selected`].
    pub fn remove_selected(&mut self, name: &str) {
        if let Some(request) = self.state.remove_selected(name) {
            self.dispatch(request);
        }
    }

    /// See [`SearchState::dismiss_if_outside`].
    pub fn dismiss_if_outside(&mut self, inside_panel: bool) -> bool {
        self.state.dismiss_if_outside(inside_panel)
    }

    /// Issues a debounced search if due.
    pub fn tick(&mut self, now: f64) {
        if let Some(request) = self.state.flush_due(now) {
            self.dispatch(request);
        }
    }

    /// Applies every completion received so far.
    ///
    /// # Returns
    ///
    /// `true` if any completion was applied to the state
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.receiver.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Blocks the calling thread until every issued call has completed or
    /// `timeout` has elapsed. Must not be called from a runtime worker.
    ///
    /// # Returns
    ///
    /// `true` if nothing is left in flight
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(_) => break,
            }
        }
        self.in_flight == 0
    }

    fn apply(&mut self, completion: Completion) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Search { seq, result } => self.state.complete_search(seq, result),
            Completion::Filter { seq, result } => self.state.complete_filter(seq, result),
        }
    }

    fn dispatch(&mut self, request: SearchRequest) {
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();
        let completion = match request {
            SearchRequest::Search { seq, query } => {
                log::debug!("Searching '{}' (#{})", query, seq);
                let call = self.catalog.search(&query);
                async move {
                    Completion::Search {
                        seq,
                        result: call.await,
                    }
                }
                .boxed()
            }
            SearchRequest::Filter {
                seq,
                champions,
                traits,
            } => {
                log::debug!(
                    "Filtering by champions {:?} and traits {:?} (#{})",
                    champions,
                    traits,
                    seq
                );
                let call = self.catalog.filter(&champions, &traits);
                async move {
                    Completion::Filter {
                        seq,
                        result: call.await,
                    }
                }
                .boxed()
            }
        };

        self.in_flight += 1;
        self.runtime.spawn(async move {
            let _ = sender.send(completion.await);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::catalog::{CatalogFuture, StaticCatalog};

    fn items(names: &[&str]) -> Vec<SearchItem> {
        names.iter().map(|n| SearchItem::champion(*n)).collect()
    }

    fn search_seq(request: Option<SearchRequest>) -> u64 {
        match request {
            Some(SearchRequest::Search { seq, .. }) => seq,
            other => panic!("expected a search request, got {other:?}"),
        }
    }

    #[test]
    fn blank_query_clears_without_request() {
        let mut state = SearchState::new(0.0);
        let seq = search_seq(state.set_query("ji", 0.0));
        state.complete_search(seq, Ok(items(&["Jinx"])));
        assert_eq!(state.results().len(), 1);

        assert_eq!(state.set_query("   ", 0.1), None);
        assert!(state.results().is_empty());
        assert!(!state.is_searching());
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let mut state = SearchState::new(0.0);
        let first = search_seq(state.set_query("j", 0.0));
        let second = search_seq(state.set_query("ji", 0.1));

        assert!(state.complete_search(second, Ok(items(&["Jinx"]))));
        assert!(!state.complete_search(first, Ok(items(&["Jhin", "Jinx"]))));
        assert_eq!(state.results(), items(&["Jinx"]).as_slice());
    }

    #[test]
    fn failed_search_clears_results_and_loading() {
        let mut state = SearchState::new(0.0);
        let seq = search_seq(state.set_query("ji", 0.0));
        assert!(state.is_searching());
        state.complete_search(seq, Err(CatalogError::Status(500)));
        assert!(!state.is_searching());
        assert!(state.results().is_empty());
    }

    #[test]
    fn debounced_query_waits_for_quiet_period() {
        let mut state = SearchState::new(0.25);
        assert_eq!(state.set_query("j", 0.0), None);
        assert_eq!(state.set_query("ji", 0.1), None);
        assert_eq!(state.flush_due(0.3), None);
        match state.flush_due(0.4) {
            Some(SearchRequest::Search { query, .. }) => assert_eq!(query, "ji"),
            other => panic!("expected search, got {other:?}"),
        }
        assert_eq!(state.flush_due(1.0), None);
    }

    #[test]
    fn adding_selection_closes_suggestions_and_filters() {
        let mut state = SearchState::new(0.0);
        let seq = search_seq(state.set_query("mark", 0.0));
        state.complete_search(seq, Ok(vec![SearchItem::trait_item("Marksman")]));

        match state.add_selected(SearchItem::trait_item("Marksman")) {
            Some(SearchRequest::Filter {
                champions, traits, ..
            }) => {
                assert!(champions.is_empty());
                assert_eq!(traits, vec!["Marksman"]);
            }
            other => panic!("expected filter, got {other:?}"),
        }
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
        assert!(state.is_filtering());

        assert_eq!(state.add_selected(SearchItem::trait_item("Marksman")), None);
        assert_eq!(state.selected().len(), 1);
    }

    #[test]
    fn selection_invalidates_in_flight_search() {
        let mut state = SearchState::new(0.0);
        let seq = search_seq(state.set_query("jin", 0.0));
        state.add_selected(SearchItem::champion("Jinx"));
        assert!(!state.complete_search(seq, Ok(items(&["Jinx"]))));
        assert!(state.results().is_empty());
    }

    #[test]
    fn removing_unknown_name_issues_nothing() {
        let mut state = SearchState::new(0.0);
        state.add_selected(SearchItem::champion("Jinx"));
        assert_eq!(state.remove_selected("Brand"), None);
        assert!(matches!(
            state.remove_selected("Jinx"),
            Some(SearchRequest::Filter { champions, traits, .. }) if champions.is_empty() && traits.is_empty()
        ));
    }

    #[test]
    fn outside_press_dismisses_only_open_results() {
        let mut state = SearchState::new(0.0);
        assert!(!state.dismiss_if_outside(false));

        let seq = search_seq(state.set_query("a", 0.0));
        state.complete_search(seq, Ok(items(&["Annie"])));
        assert!(!state.dismiss_if_outside(true));
        assert!(state.dismiss_if_outside(false));
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
    }

    struct FailingCatalog;

    impl UnitCatalog for FailingCatalog {
        fn search(&self, _query: &str) -> CatalogFuture<Vec<SearchItem>> {
            futures::future::ready(Err(CatalogError::Unavailable)).boxed()
        }

        fn filter(&self, _champions: &[String], _traits: &[String]) -> CatalogFuture<Vec<Unit>> {
            futures::future::ready(Err(CatalogError::Status(502))).boxed()
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn pipeline_filters_monotonically_against_static_catalog() {
        let rt = runtime();
        let catalog = Arc::new(StaticCatalog::demo());
        let baseline = catalog.units().len();
        let mut pipeline = SearchPipeline::new(catalog, rt.handle().clone(), 0.0);

        pipeline.start();
        assert!(pipeline.wait_idle(Duration::from_secs(5)));
        assert_eq!(pipeline.state().filtered().len(), baseline);

        let mut last = baseline;
        for item in [
            SearchItem::trait_item("Marksman"),
            SearchItem::trait_item("Dynamo"),
            SearchItem::champion("Jhin"),
        ] {
            pipeline.add_selected(item);
            assert!(pipeline.wait_idle(Duration::from_secs(5)));
            let count = pipeline.state().filtered().len();
            assert!(count <= last, "{count} > {last}");
            last = count;
        }
        assert_eq!(last, 1);

        for name in ["Marksman", "Dynamo", "Jhin"] {
            pipeline.remove_selected(name);
        }
        assert!(pipeline.wait_idle(Duration::from_secs(5)));
        assert_eq!(pipeline.state().filtered().len(), baseline);
        assert!(!pipeline.state().is_filtering());
    }

    #[test]
    fn pipeline_search_populates_results() {
        let rt = runtime();
        let mut pipeline =
            SearchPipeline::new(Arc::new(StaticCatalog::demo()), rt.handle().clone(), 0.0);
        pipeline.set_query("street", 0.0);
        assert!(pipeline.wait_idle(Duration::from_secs(5)));
        assert_eq!(
            pipeline.state().results(),
            [SearchItem::trait_item("Street Demon")].as_slice()
        );
    }

    #[test]
    fn pipeline_failures_degrade_to_empty_lists() {
        let rt = runtime();
        let mut pipeline =
            SearchPipeline::new(Arc::new(FailingCatalog), rt.handle().clone(), 0.0);
        pipeline.start();
        pipeline.set_query("jinx", 0.0);
        assert!(pipeline.wait_idle(Duration::from_secs(5)));
        assert!(pipeline.state().filtered().is_empty());
        assert!(pipeline.state().results().is_empty());
        assert!(!pipeline.state().is_searching());
        assert!(!pipeline.state().is_filtering());
    }
}
