//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Incremental "load more" pagination CLI
#[derive(Parser, Debug)]
#[command(name = "loadmore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Live HTML document
    #[arg(short, long, global = true)]
    pub document: Option<PathBuf>,

    /// URL the document was loaded from
    #[arg(short = 'u', long, global = true)]
    pub document_url: Option<String>,

    /// Configuration overrides (YAML), applied over the host element's attributes
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Selector of the element carrying the configuration attributes
    #[arg(long, global = true, default_value = "load-more")]
    pub host: String,

    /// Selector of the pagination indicator in fetched pages
    #[arg(long, global = true)]
    pub indicator: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load next pages and merge them into the document
    Load {
        /// Maximum number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,

        /// Write the merged document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Request timeout in seconds (default: none)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show derived state and the next URL
    Inspect,
}
