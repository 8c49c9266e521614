// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # loadmore
//!
//! Incremental "load more" pagination for server-rendered HTML. Each cycle
//! fetches the next page, extracts the configured regions and merges them
//! into the live document, either appending new items or swapping the
//! region's content.
//!
//! ## Features
//!
//! - **Attribute configuration**: page, next-page flag, URL, targets and mode
//!   live on the host element and are written back after every cycle
//! - **Append or swap**: globally or per region via `load-more-mode`
//! - **Single-flight**: triggers while a fetch is in flight are ignored
//! - **Lifecycle events**: `load-more:reset` and `load-more:content-loaded`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loadmore::{AttributeMap, HtmlDocument, Paginator, Result};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let document = HtmlDocument::parse(&std::fs::read_to_string("page.html")?);
//!     let attrs = AttributeMap::from_element(&document, "load-more")?;
//!
//!     let paginator = Paginator::builder()
//!         .document(document)
//!         .document_url("https://shop.example/products".parse()?)
//!         .config(attrs)
//!         .build()?;
//!
//!     paginator.subscribe(|event| println!("{}", event.name()));
//!     while paginator.trigger().await.is_loaded() {}
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Paginator                           │
//! │   trigger() → CycleOutcome     reset(update) → ResetDetail   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │  Config  │   State   │  Pagination   │   HTTP    │   Merge   │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Attrs    │ Page      │ Next URL      │ Fetcher   │ Append    │
//! │ YAML     │ Loading   │ page=N+1      │ reqwest   │ Swap      │
//! │ Reset    │ Counters  │               │           │ Indicator │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Attribute-backed configuration
pub mod config;

/// HTML document model
pub mod dom;

/// Pagination state and reflection
pub mod state;

/// Next-page URL construction
pub mod pagination;

/// Fragment extraction and merging
pub mod merge;

/// HTTP fetching
pub mod http;

/// Lifecycle events
pub mod events;

/// Fetch cycle orchestration
pub mod paginator;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{AttributeMap, ConfigStore, ConfigUpdate};
pub use dom::HtmlDocument;
pub use events::{PaginatorEvent, CONTENT_LOADED_EVENT, RESET_EVENT};
pub use http::{Fetcher, HttpClient};
pub use paginator::{CycleOutcome, Paginator, PaginatorBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
