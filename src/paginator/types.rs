//! Paginator types
//!
//! Cycle outcomes and the builder that wires a paginator together.

use super::Paginator;
use crate::config::{AttributeMap, ConfigStore};
use crate::dom::{parse_selector, HtmlDocument};
use crate::error::{Error, Result};
use crate::events::EventBus;
use crate::http::{Fetcher, HttpClient};
use crate::merge::DocumentMerger;
use crate::state::StateStore;
use crate::types::COMPONENT_TAG;
use std::cell::RefCell;
use url::Url;

/// What a trigger did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No next page, or a cycle was already in flight; nothing was fetched
    Ignored,
    /// The next page was merged
    Loaded {
        /// Page number after the merge
        page: u32,
    },
    /// The fetch failed or returned a non-success status; state unchanged
    Failed {
        /// Description of the failure
        error: String,
    },
}

impl CycleOutcome {
    /// Whether the cycle merged a page
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Whether the trigger was ignored
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// Whether the cycle failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Builder for [`Paginator`]
#[derive(Default)]
pub struct PaginatorBuilder {
    document: Option<HtmlDocument>,
    document_url: Option<Url>,
    config: Option<Box<dyn ConfigStore>>,
    host: Option<String>,
    fetcher: Option<Box<dyn Fetcher>>,
    indicator: Option<String>,
}

impl PaginatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the live document
    #[must_use]
    pub fn document(mut self, document: HtmlDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Set the URL the live document was loaded from; relative base URLs
    /// resolve against it
    #[must_use]
    pub fn document_url(mut self, url: Url) -> Self {
        self.document_url = Some(url);
        self
    }

    /// Use an explicit configuration store
    #[must_use]
    pub fn config(mut self, config: impl ConfigStore + 'static) -> Self {
        self.config = Some(Box::new(config));
        self
    }

    /// Host element: the first element matching `selector` (default:
    /// `load-more`). Its attributes seed the configuration unless an
    /// explicit store is set, and reflected keys are written back to it.
    #[must_use]
    pub fn host(mut self, selector: impl Into<String>) -> Self {
        self.host = Some(selector.into());
        self
    }

    /// Set the fetcher (default: [`HttpClient`])
    #[must_use]
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Set the pagination-indicator selector (default: `load-more`)
    #[must_use]
    pub fn indicator(mut self, selector: impl Into<String>) -> Self {
        self.indicator = Some(selector.into());
        self
    }

    /// Build and initialize the paginator
    pub fn build(self) -> Result<Paginator> {
        let document = self
            .document
            .ok_or_else(|| Error::config("Paginator requires a document"))?;
        let document_url = self
            .document_url
            .ok_or_else(|| Error::config("Paginator requires a document URL"))?;

        let host_selector = self.host.as_deref().unwrap_or(COMPONENT_TAG);
        let host = document.select_first(&parse_selector(host_selector)?);

        let config = match self.config {
            Some(config) => config,
            None => Box::new(AttributeMap::from_element(&document, host_selector)?),
        };

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Box::new(HttpClient::new()?),
        };

        let merger = match self.indicator.as_deref() {
            Some(selector) => DocumentMerger::with_indicator(selector)?,
            None => DocumentMerger::new(),
        };

        let mut store = StateStore::boxed(config);
        store.initialize(&document)?;
        store.reflect_interaction();

        let paginator = Paginator {
            store: RefCell::new(store),
            document: RefCell::new(document),
            host,
            document_url,
            fetcher,
            merger,
            events: EventBus::new(),
        };
        paginator.sync_host();
        Ok(paginator)
    }
}
