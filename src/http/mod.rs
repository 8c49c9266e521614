//! HTTP module
//!
//! The document fetch capability the paginator consumes.
//!
//! # Features
//!
//! - **`Fetcher` trait**: URL in, status and text body out; transport
//!   failures are errors, HTTP statuses are not
//! - **`HttpClient`**: reqwest-backed implementation with default headers
//!   and an optional timeout
//!
//! No retries and no caching: a failed fetch is retried only by the next
//! trigger.

mod client;

pub use client::{FetchResponse, Fetcher, HttpClient, HttpClientConfig, HttpClientConfigBuilder};

#[cfg(test)]
mod tests;
