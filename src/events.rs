//! Lifecycle notifications
//!
//! The paginator publishes two events to every subscribed listener, in
//! subscription order. Listeners observe the paginator without holding a
//! reference to it.

use crate::dom::HtmlDocument;
use crate::state::PaginationState;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Name of the reset notification
pub const RESET_EVENT: &str = "load-more:reset";

/// Name of the content-loaded notification
pub const CONTENT_LOADED_EVENT: &str = "load-more:content-loaded";

/// Payload of the reset notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetDetail {
    pub current_page: u32,
    pub has_next_page: bool,
    pub items_merged: usize,
}

impl ResetDetail {
    pub fn from_state(state: &PaginationState) -> Self {
        Self {
            current_page: state.current_page,
            has_next_page: state.has_next_page,
            items_merged: state.items_merged,
        }
    }
}

/// Payload of the content-loaded notification
#[derive(Debug, Clone)]
pub struct ContentLoadedDetail {
    /// The fetched page after merging; appended children have been moved
    /// out of it
    pub document: Rc<HtmlDocument>,
    pub items_merged: usize,
    pub current_page: u32,
}

/// A lifecycle notification
#[derive(Debug, Clone)]
pub enum PaginatorEvent {
    /// Emitted after every reset
    Reset(ResetDetail),
    /// Emitted after every successful merge cycle
    ContentLoaded(ContentLoadedDetail),
}

impl PaginatorEvent {
    /// Event name
    pub fn name(&self) -> &'static str {
        match self {
            PaginatorEvent::Reset(_) => RESET_EVENT,
            PaginatorEvent::ContentLoaded(_) => CONTENT_LOADED_EVENT,
        }
    }

    /// Current page carried by the payload
    pub fn current_page(&self) -> u32 {
        match self {
            PaginatorEvent::Reset(detail) => detail.current_page,
            PaginatorEvent::ContentLoaded(detail) => detail.current_page,
        }
    }

    /// Merged item count carried by the payload
    pub fn items_merged(&self) -> usize {
        match self {
            PaginatorEvent::Reset(detail) => detail.items_merged,
            PaginatorEvent::ContentLoaded(detail) => detail.items_merged,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&PaginatorEvent)>;

/// Ordered set of listeners
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn subscribe(&self, listener: impl Fn(&PaginatorEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver an event to every listener.
    ///
    /// Listeners may subscribe or unsubscribe while handling an event; the
    /// change applies from the next emission.
    pub fn emit(&self, event: &PaginatorEvent) {
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        trace!(event = event.name(), listeners = snapshot.len(), "Emitting");
        for listener in snapshot {
            listener(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
