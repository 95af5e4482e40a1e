//! Tracing setup.
//!
//! Scripting modes log to stderr; the TUI logs to a file under the app
//! directory so nothing bleeds onto the alternate screen.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("euclid_cli=info"))
}

pub fn init(tui_mode: bool) -> Result<()> {
    if tui_mode {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(crate::storage::log_path()?)
            .context("open log file")?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
