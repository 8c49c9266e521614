//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ConfigUpdate;
use crate::dom::HtmlDocument;
use crate::error::{Error, Result, ResultExt};
use crate::events::PaginatorEvent;
use crate::http::{HttpClient, HttpClientConfig};
use crate::paginator::{CycleOutcome, Paginator};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(&mut out).await
    }

    /// Run the CLI command, writing to `out`
    pub async fn execute(&self, out: &mut impl Write) -> Result<()> {
        match &self.cli.command {
            Commands::Load {
                pages,
                output,
                timeout,
            } => self.load(out, *pages, output.as_deref(), *timeout).await,
            Commands::Inspect => self.inspect(out),
        }
    }

    /// Load and parse the live document
    fn load_document(&self) -> Result<HtmlDocument> {
        let path = self
            .cli
            .document
            .as_ref()
            .ok_or_else(|| Error::config("Document not specified (use -d flag)"))?;
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let markup = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        Ok(HtmlDocument::parse(&markup))
    }

    /// Parse the document URL
    fn document_url(&self) -> Result<Url> {
        let raw = self
            .cli
            .document_url
            .as_deref()
            .ok_or_else(|| Error::config("Document URL not specified (use -u flag)"))?;
        Ok(Url::parse(raw)?)
    }

    /// Build a paginator from the CLI arguments
    fn build_paginator(&self, client: HttpClient) -> Result<Paginator> {
        let mut builder = Paginator::builder()
            .document(self.load_document()?)
            .document_url(self.document_url()?)
            .host(self.cli.host.clone())
            .fetcher(client);
        if let Some(indicator) = &self.cli.indicator {
            builder = builder.indicator(indicator.clone());
        }
        builder.build()
    }

    /// Apply the `--config` overrides, if any, as a reset
    fn apply_overrides(&self, paginator: &Paginator) -> Result<()> {
        let Some(path) = &self.cli.config else {
            return Ok(());
        };
        let update = ConfigUpdate::from_yaml_file(path)
            .with_context(|| format!("Failed to load overrides from {}", path.display()))?;
        if !update.is_empty() {
            paginator.reset(&update)?;
        }
        Ok(())
    }

    async fn load(
        &self,
        out: &mut impl Write,
        pages: u32,
        output: Option<&Path>,
        timeout: Option<u64>,
    ) -> Result<()> {
        let mut http = HttpClientConfig::builder();
        if let Some(secs) = timeout {
            http = http.timeout(Duration::from_secs(secs));
        }
        let paginator = self.build_paginator(HttpClient::with_config(http.build())?)?;

        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lines);
        paginator.subscribe(move |event| sink.borrow_mut().push(event_json(event)));
        self.apply_overrides(&paginator)?;

        let mut failure = None;
        for _ in 0..pages {
            match paginator.trigger().await {
                CycleOutcome::Loaded { page } => info!(page, "Loaded page"),
                CycleOutcome::Ignored => {
                    info!("No more pages");
                    break;
                }
                CycleOutcome::Failed { error } => {
                    lines
                        .borrow_mut()
                        .push(json!({"type": "ERROR", "message": &error}));
                    failure = Some(error);
                    break;
                }
            }
        }

        for line in lines.borrow().iter() {
            writeln!(out, "{line}")?;
        }
        let state = paginator.state();
        writeln!(
            out,
            "{}",
            json!({
                "type": "STATE",
                "state": serde_json::to_value(&state)?,
                "interaction": paginator.interaction_state(),
            })
        )?;

        let html = paginator.document_html();
        match output {
            Some(path) => {
                fs::write(path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Wrote merged document");
            }
            None => writeln!(out, "{html}")?,
        }

        match failure {
            Some(error) => Err(Error::Other(format!("Load failed: {error}"))),
            None => Ok(()),
        }
    }

    fn inspect(&self, out: &mut impl Write) -> Result<()> {
        let paginator = self.build_paginator(HttpClient::new()?)?;
        self.apply_overrides(&paginator)?;
        let next_url = paginator.next_url()?;

        let report = json!({
            "state": serde_json::to_value(paginator.state())?,
            "interaction": paginator.interaction_state(),
            "next_url": next_url.as_str(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        Ok(())
    }
}

/// One JSON line per lifecycle event
fn event_json(event: &PaginatorEvent) -> Value {
    match event {
        PaginatorEvent::Reset(detail) => json!({
            "type": "EVENT",
            "event": event.name(),
            "current_page": detail.current_page,
            "has_next_page": detail.has_next_page,
            "items_merged": detail.items_merged,
        }),
        PaginatorEvent::ContentLoaded(detail) => json!({
            "type": "EVENT",
            "event": event.name(),
            "current_page": detail.current_page,
            "items_merged": detail.items_merged,
        }),
    }
}
