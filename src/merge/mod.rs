//! Merge module
//!
//! Integrates the relevant fragments of a fetched page into the live
//! document, one target region at a time.
//!
//! # Policies
//!
//! - **Append**: the remote region's element children (optionally filtered
//!   by the append filter) are *moved* to the end of the live region.
//! - **Swap**: the live region's content is replaced by a *copy* of the
//!   remote region's content.
//!
//! A destination element carrying `load-more-mode="swap"` is always swapped;
//! otherwise the global mode applies. Regions are independent: a region
//! that cannot be resolved is skipped and the others still merge.

mod merger;

pub use merger::{DocumentMerger, MergeReport, RegionOutcome, SkipReason};

#[cfg(test)]
mod tests;
