#![forbid(unsafe_code)]

//! Command-line arguments for the `coursetree` binary.
//!
//! Flags override the `COURSETREE_*` environment, which overrides the
//! built-in defaults (see [`coursetree::config`]).

use std::time::Duration;

use clap::Parser;
use coursetree::{Config, LogFormat, ParentId};

/// Search the course catalog and print matches as an indented tree.
///
/// With no QUERY arguments, one query is read per line from stdin.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "coursetree", version, about)]
pub struct Args {
    /// Queries to run, in order.
    pub queries: Vec<String>,

    /// Lookup service URL.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Parent id that marks top-level records.
    #[arg(long, value_name = "ID", allow_negative_numbers = true)]
    pub root: Option<ParentId>,

    /// Per-request timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Lines per window.
    #[arg(long, value_name = "LINES")]
    pub viewport: Option<u32>,

    /// Rows rendered beyond each viewport edge.
    #[arg(long, value_name = "ROWS")]
    pub overscan: Option<usize>,

    /// Line offset of the window into the tree.
    #[arg(long, value_name = "LINES", default_value_t = 0)]
    pub scroll: u64,

    /// Print every row instead of one window.
    #[arg(long, conflicts_with = "scroll")]
    pub all: bool,

    /// Print one JSON object per row instead of an outline.
    #[arg(long)]
    pub json: bool,

    /// Omit divider lines above top-level rows.
    #[arg(long)]
    pub no_dividers: bool,

    /// Log output format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Args {
    /// Layer the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(root) = self.root {
            config.root_sentinel = root;
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(rows) = self.viewport {
            config.viewport_height = rows;
        }
        if let Some(rows) = self.overscan {
            config.overscan = rows;
        }
        if self.no_dividers {
            config.dividers = false;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}
