//! Pagination state

use crate::config::PaginatorConfig;
use crate::types::{InteractionState, MergeMode};
use serde::Serialize;

/// Pagination progress and the settings the next cycle will use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// Last page successfully merged (or the starting page)
    pub current_page: u32,
    /// Whether a page number is reflected in the configuration; only then
    /// does the next URL carry a page query parameter
    pub tracks_page: bool,
    /// Whether another page is known to exist
    pub has_next_page: bool,
    /// Fetch target before page augmentation
    pub base_url: String,
    /// Global merge mode
    pub mode: MergeMode,
    /// Target selectors in processing order
    pub target_selectors: Vec<String>,
    /// Selector restricting appended children
    pub append_filter: Option<String>,
    /// Elements currently present across the target regions
    pub items_merged: usize,
    /// True only while a fetch cycle is in flight
    pub is_loading: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            tracks_page: false,
            has_next_page: false,
            base_url: String::new(),
            mode: MergeMode::default(),
            target_selectors: Vec::new(),
            append_filter: None,
            items_merged: 0,
            is_loading: false,
        }
    }
}

impl PaginationState {
    /// Create a new state with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the configured part of the state; `items_merged` starts at zero
    pub fn from_config(config: &PaginatorConfig) -> Self {
        Self {
            current_page: config.page.unwrap_or(1),
            tracks_page: config.page.is_some(),
            has_next_page: config.has_next_page,
            base_url: config.url.clone(),
            mode: config.mode,
            target_selectors: config.targets.clone(),
            append_filter: config.append_filter.clone(),
            items_merged: 0,
            is_loading: false,
        }
    }

    /// Interaction state implied by this state
    pub fn interaction_state(&self) -> InteractionState {
        InteractionState::derive(self.is_loading, self.has_next_page)
    }

    /// Advance to the next page
    pub fn advance_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
        self.tracks_page = true;
    }

    /// Account for children appended to a region
    pub fn add_merged(&mut self, count: usize) {
        self.items_merged += count;
    }

    /// Replace a swapped region's contribution to the merged count
    pub fn replace_region(&mut self, previous: usize, current: usize) {
        self.items_merged = self.items_merged.saturating_sub(previous) + current;
    }
}
