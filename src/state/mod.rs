//! State management module
//!
//! Single source of truth for pagination configuration and progress.
//!
//! # Overview
//!
//! The state module provides:
//! - `PaginationState` - current page, next-page flag, merge settings and
//!   the running count of merged items
//! - `StateStore` - owns the reflected configuration, re-derives state from
//!   it (`initialize`) and applies sparse updates (`apply`)

mod store;
mod types;

pub use store::{count_items, StateStore};
pub use types::PaginationState;
