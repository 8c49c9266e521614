//! Document merger implementation

use crate::config::{keys, parse_flag};
use crate::dom::{parse_selector, HtmlDocument};
use crate::error::Result;
use crate::state::PaginationState;
use crate::types::{MergeMode, COMPONENT_TAG, MODE_OVERRIDE_ATTR};
use scraper::Selector;
use std::fmt;
use tracing::{debug, warn};

/// Why a target selector was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The selector does not parse
    InvalidSelector,
    /// The append filter does not parse
    InvalidFilter,
    /// No match in the fetched page
    MissingSource,
    /// No match in the live document
    MissingDestination,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::InvalidSelector => "invalid selector",
            SkipReason::InvalidFilter => "invalid append filter",
            SkipReason::MissingSource => "no match in fetched page",
            SkipReason::MissingDestination => "no match in live document",
        };
        f.write_str(reason)
    }
}

/// Result of merging one target region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionOutcome {
    /// Children were moved into the region
    Appended { selector: String, count: usize },
    /// The region's content was replaced; `count` is its new child count
    Swapped { selector: String, count: usize },
    /// The region was left alone
    Skipped { selector: String, reason: SkipReason },
}

impl RegionOutcome {
    /// Target selector this outcome belongs to
    pub fn selector(&self) -> &str {
        match self {
            RegionOutcome::Appended { selector, .. }
            | RegionOutcome::Swapped { selector, .. }
            | RegionOutcome::Skipped { selector, .. } => selector,
        }
    }

    /// Whether the region was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, RegionOutcome::Skipped { .. })
    }
}

/// Per-region outcomes of one merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Outcomes in target-selector order
    pub regions: Vec<RegionOutcome>,
    /// Whether the fetched page carried a next-page indicator
    pub indicator_found: bool,
}

impl MergeReport {
    /// Total number of children appended across regions
    pub fn appended(&self) -> usize {
        self.regions
            .iter()
            .map(|r| match r {
                RegionOutcome::Appended { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    /// Number of regions skipped
    pub fn skipped(&self) -> usize {
        self.regions.iter().filter(|r| r.is_skipped()).count()
    }
}

/// Merges fetched pages into the live document
#[derive(Debug, Clone)]
pub struct DocumentMerger {
    /// Locates the pagination indicator in fetched pages
    indicator: Selector,
}

impl Default for DocumentMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentMerger {
    /// Create a merger that looks for the `load-more` indicator element
    pub fn new() -> Self {
        Self {
            indicator: Selector::parse(COMPONENT_TAG).expect("component tag is a valid selector"),
        }
    }

    /// Create a merger with a custom indicator selector
    pub fn with_indicator(selector: &str) -> Result<Self> {
        Ok(Self {
            indicator: parse_selector(selector)?,
        })
    }

    /// Merge `remote` into `live`, then advance the page and pick up the
    /// next-page indicator from `remote`.
    ///
    /// Appended children are moved out of `remote`.
    pub fn merge(
        &self,
        live: &mut HtmlDocument,
        remote: &mut HtmlDocument,
        state: &mut PaginationState,
    ) -> MergeReport {
        let filter = state
            .append_filter
            .as_deref()
            .map(parse_selector)
            .transpose();

        let mut report = MergeReport::default();
        for raw in state.target_selectors.clone() {
            let outcome = self.merge_region(live, remote, state, &raw, &filter);
            if let RegionOutcome::Skipped { selector, reason } = &outcome {
                warn!(selector = %selector, "Skipping target region: {reason}");
            }
            report.regions.push(outcome);
        }

        state.advance_page();

        if let Some(indicator) = remote.select_first(&self.indicator) {
            if let Some(flag) = remote.attr(indicator, keys::HAS_NEXT_PAGE) {
                state.has_next_page = parse_flag(flag);
                report.indicator_found = true;
            }
        }

        debug!(
            page = state.current_page,
            has_next_page = state.has_next_page,
            items = state.items_merged,
            "Merge complete"
        );
        report
    }

    fn merge_region(
        &self,
        live: &mut HtmlDocument,
        remote: &mut HtmlDocument,
        state: &mut PaginationState,
        raw: &str,
        filter: &Result<Option<Selector>>,
    ) -> RegionOutcome {
        let skipped = |reason| RegionOutcome::Skipped {
            selector: raw.to_string(),
            reason,
        };

        let Ok(selector) = parse_selector(raw) else {
            return skipped(SkipReason::InvalidSelector);
        };
        let Some(src) = remote.select_first(&selector) else {
            return skipped(SkipReason::MissingSource);
        };
        let Some(dest) = live.select_first(&selector) else {
            return skipped(SkipReason::MissingDestination);
        };

        match effective_mode(live.attr(dest, MODE_OVERRIDE_ATTR), state.mode) {
            MergeMode::Swap => {
                let previous = live.child_count(dest);
                let count = live.replace_children_with_copy(dest, remote, src);
                state.replace_region(previous, count);
                debug!(selector = raw, count, "Swapped region");
                RegionOutcome::Swapped {
                    selector: raw.to_string(),
                    count,
                }
            }
            MergeMode::Append => {
                let Ok(filter) = filter else {
                    return skipped(SkipReason::InvalidFilter);
                };
                let candidates: Vec<_> = remote
                    .child_elements(src)
                    .into_iter()
                    .filter(|&child| filter.as_ref().map_or(true, |f| remote.matches(child, f)))
                    .collect();
                let count = live.move_children_from(dest, remote, &candidates);
                state.add_merged(count);
                debug!(selector = raw, count, "Appended to region");
                RegionOutcome::Appended {
                    selector: raw.to_string(),
                    count,
                }
            }
        }
    }
}

/// Only an explicit `swap` override is recognized; anything else falls
/// through to the global mode.
fn effective_mode(override_attr: Option<&str>, global: MergeMode) -> MergeMode {
    match override_attr.map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("swap") => MergeMode::Swap,
        Some(value) => {
            debug!(value, "Ignoring unrecognized per-region mode override");
            global
        }
        None => global,
    }
}
