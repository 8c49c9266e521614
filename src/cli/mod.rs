//! CLI module
//!
//! Command-line interface for running the paginator against a saved page.
//!
//! # Commands
//!
//! - `load` - Trigger page loads and write the merged document
//! - `inspect` - Show the derived state and the next URL without fetching

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
