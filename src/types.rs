//! Common types used throughout loadmore
//!
//! This module contains shared type definitions and constants used
//! across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Tag name of the component; also the default pagination-indicator selector
pub const COMPONENT_TAG: &str = "load-more";

/// Query parameter carrying the requested page number
pub const PAGE_QUERY_PARAM: &str = "page";

/// Per-region override attribute on a destination element
pub const MODE_OVERRIDE_ATTR: &str = "load-more-mode";

// ============================================================================
// Merge Mode
// ============================================================================

/// How fetched content is merged into a target region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Move matching remote children to the end of the region
    #[default]
    Append,
    /// Replace the region's content with a copy of the remote content
    Swap,
}

impl MergeMode {
    /// Attribute value for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::Append => "append",
            MergeMode::Swap => "swap",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "append" => Ok(MergeMode::Append),
            "swap" => Ok(MergeMode::Swap),
            other => Err(Error::invalid_value(
                "mode",
                format!("expected 'append' or 'swap', got '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Interaction State
// ============================================================================

/// Tri-state indicator reflected on the trigger control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// A fetch cycle is in flight
    Loading,
    /// No further pages exist
    Complete,
    /// The next page can be requested
    Ready,
}

impl InteractionState {
    /// Derive the interaction state from the loading flag and next-page flag
    pub fn derive(is_loading: bool, has_next_page: bool) -> Self {
        if is_loading {
            InteractionState::Loading
        } else if !has_next_page {
            InteractionState::Complete
        } else {
            InteractionState::Ready
        }
    }

    /// Whether the trigger control is disabled in this state
    pub fn is_disabled(&self) -> bool {
        !matches!(self, InteractionState::Ready)
    }

    /// Attribute value for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionState::Loading => "loading",
            InteractionState::Complete => "complete",
            InteractionState::Ready => "ready",
        }
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_mode_parse() {
        assert_eq!("append".parse::<MergeMode>().unwrap(), MergeMode::Append);
        assert_eq!("Swap".parse::<MergeMode>().unwrap(), MergeMode::Swap);
        assert_eq!("".parse::<MergeMode>().unwrap(), MergeMode::Append);
        assert!("replace".parse::<MergeMode>().is_err());
    }

    #[test]
    fn test_interaction_state_derive() {
        assert_eq!(
            InteractionState::derive(true, true),
            InteractionState::Loading
        );
        assert_eq!(
            InteractionState::derive(true, false),
            InteractionState::Loading
        );
        assert_eq!(
            InteractionState::derive(false, false),
            InteractionState::Complete
        );
        assert_eq!(
            InteractionState::derive(false, true),
            InteractionState::Ready
        );
    }

    #[test]
    fn test_interaction_state_disabled() {
        assert!(InteractionState::Loading.is_disabled());
        assert!(InteractionState::Complete.is_disabled());
        assert!(!InteractionState::Ready.is_disabled());
        assert_eq!(InteractionState::Complete.to_string(), "complete");
    }
}
