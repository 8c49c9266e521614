//! Paginator module
//!
//! The click-triggered control flow tying the other modules together.
//!
//! # Overview
//!
//! A trigger moves the paginator from `idle` to `loading`, builds the next
//! URL, fetches and parses the page, merges it into the live document,
//! reflects the new page state and returns to `idle`. Triggers while
//! loading or after the last page are ignored. Failures are logged and
//! leave the state untouched so the next trigger can retry.
//!
//! Everything runs on one thread. The loading flag is checked and set
//! before the first await, so overlapping triggers start at most one fetch.

mod types;

pub use types::{CycleOutcome, PaginatorBuilder};

use crate::config::{keys, ConfigUpdate};
use crate::dom::{parse_selector, HtmlDocument, NodeId};
use crate::error::Result;
use crate::events::{ContentLoadedDetail, EventBus, ListenerId, PaginatorEvent, ResetDetail};
use crate::http::Fetcher;
use crate::merge::DocumentMerger;
use crate::pagination::build_next_url;
use crate::state::{PaginationState, StateStore};
use crate::types::InteractionState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use url::Url;

/// Incremental "load more" paginator bound to one live document
pub struct Paginator {
    store: RefCell<StateStore>,
    document: RefCell<HtmlDocument>,
    /// Element in the live document that reflected keys are written to
    host: Option<NodeId>,
    document_url: Url,
    fetcher: Box<dyn Fetcher>,
    merger: DocumentMerger,
    events: EventBus,
}

impl Paginator {
    /// Create a builder
    pub fn builder() -> PaginatorBuilder {
        PaginatorBuilder::new()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PaginationState {
        self.store.borrow().state().clone()
    }

    /// Current interaction state of the trigger control
    pub fn interaction_state(&self) -> InteractionState {
        self.store.borrow().state().interaction_state()
    }

    /// Read a reflected configuration key
    pub fn config_value(&self, key: &str) -> Option<String> {
        self.store.borrow().config().get(key)
    }

    /// URL the live document was loaded from
    pub fn document_url(&self) -> &Url {
        &self.document_url
    }

    /// URL the next trigger would fetch
    pub fn next_url(&self) -> Result<Url> {
        build_next_url(self.store.borrow().state(), &self.document_url)
    }

    /// Serialize the live document
    pub fn document_html(&self) -> String {
        self.document.borrow().html()
    }

    /// Serialized content of the first live element matching `selector`
    pub fn inner_html_of(&self, selector: &str) -> Result<Option<String>> {
        let selector = parse_selector(selector)?;
        Ok(self.document.borrow().inner_html_of(&selector))
    }

    /// Register a lifecycle listener
    pub fn subscribe(&self, listener: impl Fn(&PaginatorEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    /// Remove a lifecycle listener
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Apply a sparse configuration update, re-derive the state and emit a
    /// reset notification.
    ///
    /// Safe to call while a cycle is in flight; the update only affects
    /// what the next cycle uses.
    pub fn reset(&self, update: &ConfigUpdate) -> Result<ResetDetail> {
        let detail = {
            let document = self.document.borrow();
            let mut store = self.store.borrow_mut();
            let detail = store.apply(update, &document)?;
            store.reflect_interaction();
            detail
        };
        self.sync_host();

        self.events.emit(&PaginatorEvent::Reset(detail));
        Ok(detail)
    }

    /// Request the next page.
    ///
    /// Never returns an error: failures are logged and reported as
    /// [`CycleOutcome::Failed`].
    pub async fn trigger(&self) -> CycleOutcome {
        let url = {
            let mut store = self.store.borrow_mut();
            let state = store.state();
            if state.is_loading {
                debug!("Trigger ignored: a load is already in flight");
                return CycleOutcome::Ignored;
            }
            if !state.has_next_page {
                debug!("Trigger ignored: no next page");
                return CycleOutcome::Ignored;
            }

            store.state_mut().is_loading = true;
            store.reflect_interaction();
            build_next_url(store.state(), &self.document_url)
        };
        self.sync_host();

        let result = match url {
            Ok(url) => self.run_cycle(url).await,
            Err(e) => Err(e),
        };

        {
            let mut store = self.store.borrow_mut();
            store.state_mut().is_loading = false;
            store.reflect_interaction();
        }
        self.sync_host();

        match result {
            Ok(detail) => {
                let page = detail.current_page;
                self.events.emit(&PaginatorEvent::ContentLoaded(detail));
                CycleOutcome::Loaded { page }
            }
            Err(e) => {
                if e.is_transport() {
                    warn!(error = %e, "Failed to fetch next page");
                } else {
                    error!(error = %e, "Failed to load next page");
                }
                CycleOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Fetch, parse, merge and reflect. No state changes before the merge,
    /// so an error leaves the paginator as it was.
    async fn run_cycle(&self, url: Url) -> Result<ContentLoadedDetail> {
        info!(url = %url, "Loading next page");
        let body = self.fetcher.fetch(&url).await?.into_success()?;
        let mut remote = HtmlDocument::parse(&body);

        let mut store = self.store.borrow_mut();
        let mut document = self.document.borrow_mut();
        let report = self
            .merger
            .merge(&mut document, &mut remote, store.state_mut());
        store.reflect();

        let state = store.state();
        info!(
            page = state.current_page,
            appended = report.appended(),
            skipped = report.skipped(),
            has_next_page = state.has_next_page,
            "Page merged"
        );

        Ok(ContentLoadedDetail {
            document: Rc::new(remote),
            items_merged: state.items_merged,
            current_page: state.current_page,
        })
    }
}

impl Paginator {
    /// Copy the reflected configuration onto the host element so the live
    /// document carries the current page, next-page flag and state.
    fn sync_host(&self) {
        let Some(host) = self.host else {
            return;
        };
        let store = self.store.borrow();
        let mut document = self.document.borrow_mut();
        for key in keys::REFLECTED {
            match store.config().get(key) {
                Some(value) => document.set_attr(host, key, &value),
                None => document.remove_attr(host, key),
            };
        }
    }
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("document_url", &self.document_url.as_str())
            .field("state", &self.store.borrow().state())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
