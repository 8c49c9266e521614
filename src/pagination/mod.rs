//! Pagination module
//!
//! Derives the URL of the next page from the current pagination state.
//!
//! # Overview
//!
//! The base URL is resolved against the document URL. In append mode, when
//! a page number is reflected in the configuration, the `page` query
//! parameter is set to the page after the current one. Swap mode leaves the
//! query untouched; callers paginate through the base URL instead.

mod builder;

pub use builder::{build_next_url, set_query_param};
