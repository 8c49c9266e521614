//! Document module
//!
//! A mutable HTML document with the small query surface the merger needs:
//! first-match selector lookup, element-child enumeration, deep copy of
//! markup between documents, and moving nodes out of one document into
//! another.
//!
//! Both the live document and every fetched page are `HtmlDocument`s, so
//! merge logic can be exercised without a rendering environment.

mod document;

pub use document::{parse_selector, HtmlDocument, NodeId};
