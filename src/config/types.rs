//! Typed configuration
//!
//! `PaginatorConfig` is read from a `ConfigStore` once per initialize cycle
//! so the rest of the crate never consults live attributes mid-operation.

use super::store::ConfigStore;
use crate::dom::parse_selector;
use crate::error::{Error, Result};
use crate::types::MergeMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attribute key names
pub mod keys {
    /// Last merged page number
    pub const PAGE: &str = "page";
    /// Next-page flag
    pub const HAS_NEXT_PAGE: &str = "has-next-page";
    /// Base URL
    pub const URL: &str = "url";
    /// Global merge mode
    pub const MODE: &str = "mode";
    /// Comma-separated target selectors
    pub const TARGET: &str = "target";
    /// Append filter selector
    pub const APPEND_FILTER: &str = "append-filter";
    /// Interaction state indicator
    pub const STATE: &str = "state";
    /// Disabled marker
    pub const DISABLED: &str = "disabled";

    /// Every key the paginator reflects onto its host element
    pub const REFLECTED: [&str; 8] = [
        PAGE,
        HAS_NEXT_PAGE,
        URL,
        MODE,
        TARGET,
        APPEND_FILTER,
        STATE,
        DISABLED,
    ];
}

/// Parse a boolean attribute value.
///
/// A bare attribute (empty value) counts as true.
pub fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

fn flag_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

// ============================================================================
// PaginatorConfig
// ============================================================================

/// Typed snapshot of the reflected configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginatorConfig {
    /// Reflected page number, if any
    pub page: Option<u32>,
    /// Whether another page is known to exist
    pub has_next_page: bool,
    /// Base URL, resolved against the document URL at fetch time
    pub url: String,
    /// Global merge mode
    pub mode: MergeMode,
    /// Target selectors in processing order
    pub targets: Vec<String>,
    /// Selector restricting which remote children are appended
    pub append_filter: Option<String>,
}

impl PaginatorConfig {
    /// Read and validate the configuration from a store
    pub fn from_store(store: &dyn ConfigStore) -> Result<Self> {
        let page = match store.get(keys::PAGE) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_page(&raw)?),
            _ => None,
        };

        let has_next_page = store
            .get(keys::HAS_NEXT_PAGE)
            .is_some_and(|v| parse_flag(&v));

        let mode = match store.get(keys::MODE) {
            Some(raw) => raw.parse()?,
            None => MergeMode::default(),
        };

        let targets = store
            .get(keys::TARGET)
            .map(|raw| split_targets(&raw))
            .unwrap_or_default();

        let append_filter = match store.get(keys::APPEND_FILTER) {
            Some(raw) if !raw.trim().is_empty() => {
                let filter = raw.trim().to_string();
                parse_selector(&filter)
                    .map_err(|e| Error::invalid_value(keys::APPEND_FILTER, e.to_string()))?;
                Some(filter)
            }
            _ => None,
        };

        Ok(Self {
            page,
            has_next_page,
            url: store.get(keys::URL).unwrap_or_default(),
            mode,
            targets,
            append_filter,
        })
    }
}

fn parse_page(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        Ok(_) => Err(Error::invalid_value(keys::PAGE, "page must be at least 1")),
        Err(e) => Err(Error::invalid_value(keys::PAGE, e.to_string())),
    }
}

/// Split the target list, keeping the first occurrence of each selector
fn split_targets(raw: &str) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    for target in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !targets.iter().any(|t| t == target) {
            targets.push(target.to_string());
        }
    }
    targets
}

// ============================================================================
// ConfigUpdate
// ============================================================================

/// Sparse configuration update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigUpdate {
    /// New page number
    #[serde(alias = "page")]
    pub current_page: Option<u32>,
    /// New next-page flag
    pub has_next_page: Option<bool>,
    /// New base URL
    pub url: Option<String>,
    /// New target selectors
    pub targets: Option<Vec<String>>,
    /// New global merge mode
    pub mode: Option<MergeMode>,
    /// New append filter; an empty string clears it
    pub append_filter: Option<String>,
}

impl ConfigUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an update from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load an update from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Set the page number
    #[must_use]
    pub fn current_page(mut self, page: u32) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Set the next-page flag
    #[must_use]
    pub fn has_next_page(mut self, has_next: bool) -> Self {
        self.has_next_page = Some(has_next);
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the target selectors
    #[must_use]
    pub fn targets<S: Into<String>>(mut self, targets: impl IntoIterator<Item = S>) -> Self {
        self.targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    /// Set the global merge mode
    #[must_use]
    pub fn mode(mut self, mode: MergeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the append filter
    #[must_use]
    pub fn append_filter(mut self, filter: impl Into<String>) -> Self {
        self.append_filter = Some(filter.into());
        self
    }

    /// Whether the update carries no fields
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the keys present in this update
    pub fn apply_to(&self, store: &mut dyn ConfigStore) {
        if let Some(page) = self.current_page {
            store.set(keys::PAGE, &page.to_string());
        }
        if let Some(has_next) = self.has_next_page {
            store.set(keys::HAS_NEXT_PAGE, flag_str(has_next));
        }
        if let Some(url) = &self.url {
            store.set(keys::URL, url);
        }
        if let Some(targets) = &self.targets {
            store.set(keys::TARGET, &targets.join(","));
        }
        if let Some(mode) = self.mode {
            store.set(keys::MODE, mode.as_str());
        }
        if let Some(filter) = &self.append_filter {
            if filter.trim().is_empty() {
                store.remove(keys::APPEND_FILTER);
            } else {
                store.set(keys::APPEND_FILTER, filter);
            }
        }
    }
}
