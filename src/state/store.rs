//! State store implementation

use super::types::PaginationState;
use crate::config::{keys, ConfigStore, ConfigUpdate, PaginatorConfig};
use crate::dom::{parse_selector, HtmlDocument};
use crate::error::Result;
use crate::events::ResetDetail;
use tracing::{debug, info, warn};

/// Owns the reflected configuration and the state derived from it
pub struct StateStore {
    /// Reflected configuration
    config: Box<dyn ConfigStore>,
    /// Current state
    state: PaginationState,
}

impl StateStore {
    /// Create a store over a configuration source. Call
    /// [`initialize`](Self::initialize) before use.
    pub fn new(config: impl ConfigStore + 'static) -> Self {
        Self::boxed(Box::new(config))
    }

    /// Create a store over an already boxed configuration source
    pub fn boxed(config: Box<dyn ConfigStore>) -> Self {
        Self {
            config,
            state: PaginationState::new(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Get mutable state
    pub fn state_mut(&mut self) -> &mut PaginationState {
        &mut self.state
    }

    /// Get the reflected configuration
    pub fn config(&self) -> &dyn ConfigStore {
        self.config.as_ref()
    }

    /// Re-derive state from the reflected configuration and recount the
    /// children currently present in the target regions.
    ///
    /// An in-flight cycle keeps its loading flag.
    pub fn initialize(&mut self, document: &HtmlDocument) -> Result<()> {
        let config = PaginatorConfig::from_store(self.config.as_ref())?;
        let is_loading = self.state.is_loading;

        let mut state = PaginationState::from_config(&config);
        state.items_merged = count_items(document, &state.target_selectors);
        state.is_loading = is_loading;

        debug!(
            page = state.current_page,
            has_next_page = state.has_next_page,
            items = state.items_merged,
            "State initialized"
        );
        self.state = state;
        Ok(())
    }

    /// Overwrite the keys present in `update`, then re-initialize.
    ///
    /// Returns the payload for the reset notification.
    pub fn apply(&mut self, update: &ConfigUpdate, document: &HtmlDocument) -> Result<ResetDetail> {
        update.apply_to(self.config.as_mut());
        self.initialize(document)?;

        info!(
            page = self.state.current_page,
            has_next_page = self.state.has_next_page,
            items = self.state.items_merged,
            "Paginator reset"
        );
        Ok(ResetDetail::from_state(&self.state))
    }

    /// Write page progress back to the reflected configuration
    pub fn reflect(&mut self) {
        self.config.set(keys::PAGE, &self.state.current_page.to_string());
        self.config.set(
            keys::HAS_NEXT_PAGE,
            if self.state.has_next_page { "true" } else { "false" },
        );
    }

    /// Write the interaction state to the reflected configuration
    pub fn reflect_interaction(&mut self) {
        let interaction = self.state.interaction_state();
        self.config.set(keys::STATE, interaction.as_str());
        if interaction.is_disabled() {
            self.config.set(keys::DISABLED, "");
        } else {
            self.config.remove(keys::DISABLED);
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Sum the element-child counts of the first match of each selector.
///
/// Missing regions and unparsable selectors contribute zero.
pub fn count_items(document: &HtmlDocument, selectors: &[String]) -> usize {
    selectors
        .iter()
        .filter_map(|raw| match parse_selector(raw) {
            Ok(selector) => document.select_first(&selector),
            Err(e) => {
                warn!("Skipping target selector: {e}");
                None
            }
        })
        .map(|region| document.child_count(region))
        .sum()
}
