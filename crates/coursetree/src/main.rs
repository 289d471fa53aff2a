#![forbid(unsafe_code)]

//! `coursetree` binary: search the catalog and print the hierarchy.

mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use coursetree::{
    Config, FlattenedNode, HttpLookup, Lookup, Outline, ParentId, RecordId, ResultPipeline,
    RowHeights, SearchOutcome, WindowState, logging,
};
use serde::Serialize;

use crate::cli::Args;

/// One row of `--json` output.
#[derive(Debug, Serialize)]
struct NodeLine<'a> {
    id: RecordId,
    name: &'a str,
    parent_id: ParentId,
    depth: usize,
}

impl<'a> From<&'a FlattenedNode> for NodeLine<'a> {
    fn from(node: &'a FlattenedNode) -> Self {
        Self {
            id: node.id(),
            name: node.name(),
            parent_id: node.parent_id(),
            depth: node.depth(),
        }
    }
}

/// How the rows of each result are printed.
#[derive(Debug, Clone)]
struct Printer {
    outline: Outline,
    json: bool,
    all: bool,
    scroll: u64,
    viewport_height: u32,
    overscan: usize,
}

impl Printer {
    fn new(args: &Args, config: &Config) -> Self {
        let outline = if config.dividers {
            Outline::new()
        } else {
            Outline::new().with_divider(None)
        };
        Self {
            outline,
            json: args.json,
            all: args.all,
            scroll: args.scroll,
            viewport_height: config.viewport_height,
            overscan: config.overscan,
        }
    }

    /// Write `nodes` to `out`; returns the footer for a windowed print.
    fn print(&self, nodes: &[FlattenedNode], out: &mut impl Write) -> io::Result<Option<String>> {
        if self.all {
            if self.json {
                for node in nodes {
                    write_json(node, out)?;
                }
            } else {
                for line in self.outline.render_all(nodes) {
                    writeln!(out, "{line}")?;
                }
            }
            return Ok(None);
        }

        let heights = self.outline.heights(nodes);
        let mut state = WindowState::new(self.viewport_height).with_overscan(self.overscan);
        state.scroll_to(self.scroll, heights.total(nodes.len()));
        let window = state.window(nodes.len(), &heights);

        if self.json {
            for row in &window.rows {
                if let Some(node) = nodes.get(row.index) {
                    write_json(node, out)?;
                }
            }
        } else {
            for line in self.outline.render_window(nodes, &window) {
                writeln!(out, "{line}")?;
            }
        }

        let footer = if window.visible.is_empty() {
            format!("rows 0-0 of {}", nodes.len())
        } else {
            format!(
                "rows {}-{} of {}",
                window.visible.start + 1,
                window.visible.end,
                nodes.len()
            )
        };
        Ok(Some(footer))
    }
}

fn write_json(node: &FlattenedNode, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut *out, &NodeLine::from(node))?;
    writeln!(out)
}

/// Run one query and print its outcome. Returns `false` if the lookup failed.
fn run_query<L: Lookup>(
    pipeline: &mut ResultPipeline,
    lookup: &L,
    printer: &Printer,
    query: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let outcome = pipeline.search(lookup, query);
    if let Some(notice) = outcome.notice() {
        writeln!(err, "{notice}")?;
    }
    if let SearchOutcome::Results { rows, .. } = &outcome
        && *rows > 0
        && let Some(footer) = printer.print(pipeline.nodes(), out)?
    {
        writeln!(err, "{footer}")?;
    }
    Ok(!outcome.is_failure())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut config = Config::from_env();
    args.apply(&mut config);

    if let Err(err) = logging::install(config.log_format) {
        eprintln!("coursetree: logging disabled: {err}");
    }
    for (key, value) in config.rejected_env() {
        tracing::warn!(key = %key, value = %value, "ignoring unparsable environment variable");
    }

    let lookup = match HttpLookup::new(&config.endpoint, config.timeout) {
        Ok(lookup) => lookup,
        Err(err) => {
            eprintln!("coursetree: {err}");
            return ExitCode::from(2);
        }
    };

    let printer = Printer::new(&args, &config);
    let mut pipeline = ResultPipeline::new(config.root_sentinel);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let queries: Box<dyn Iterator<Item = io::Result<String>>> = if args.queries.is_empty() {
        Box::new(io::stdin().lock().lines())
    } else {
        Box::new(args.queries.clone().into_iter().map(Ok))
    };

    let mut all_ok = true;
    for query in queries {
        let result = query.and_then(|query| {
            run_query(&mut pipeline, &lookup, &printer, &query, &mut out, &mut err)
        });
        match result {
            Ok(ok) => all_ok &= ok,
            Err(io_err) if io_err.kind() == io::ErrorKind::BrokenPipe => break,
            Err(io_err) => {
                eprintln!("coursetree: {io_err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
