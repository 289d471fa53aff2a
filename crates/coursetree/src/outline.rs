#![forbid(unsafe_code)]

//! Text rendering of the flattened sequence.
//!
//! Each node becomes one label line, indented by its depth. Root-level
//! nodes can be preceded by a divider line, which makes them taller than
//! the other rows; [`Outline::heights`] reports that to the window planner.

use coursetree_core::FlattenedNode;
use coursetree_window::{MeasuredHeights, RenderWindow};

/// Indent marker repeated once per depth level.
pub const DEFAULT_INDENT: &str = "- ";

/// Divider drawn above each root-level row.
pub const DEFAULT_DIVIDER: &str = "────────────────────────────────";

/// Line-oriented renderer for flattened nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    indent: String,
    divider: Option<String>,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            divider: Some(DEFAULT_DIVIDER.to_string()),
        }
    }
}

impl Outline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-level indent marker.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set (or remove) the divider drawn above root-level rows.
    #[must_use]
    pub fn with_divider(mut self, divider: Option<String>) -> Self {
        self.divider = divider;
        self
    }

    /// The label line for one node.
    #[must_use]
    pub fn label(&self, node: &FlattenedNode) -> String {
        let mut line = self.indent.repeat(node.depth());
        line.push_str(node.name());
        line
    }

    /// Height of a node's row in lines.
    #[must_use]
    pub fn row_height(&self, node: &FlattenedNode) -> u32 {
        if node.is_root() && self.divider.is_some() {
            2
        } else {
            1
        }
    }

    /// Row heights for a whole sequence.
    #[must_use]
    pub fn heights(&self, nodes: &[FlattenedNode]) -> MeasuredHeights {
        MeasuredHeights::from_heights(nodes.iter().map(|n| self.row_height(n)).collect(), 1)
    }

    /// Append the lines of one node to `out`.
    pub fn push_lines(&self, node: &FlattenedNode, out: &mut Vec<String>) {
        if node.is_root()
            && let Some(divider) = &self.divider
        {
            out.push(divider.clone());
        }
        out.push(self.label(node));
    }

    /// Lines for every row in the window's render range.
    #[must_use]
    pub fn render_window(&self, nodes: &[FlattenedNode], window: &RenderWindow) -> Vec<String> {
        let mut out = Vec::with_capacity(window.rows.len() * 2);
        for row in &window.rows {
            if let Some(node) = nodes.get(row.index) {
                self.push_lines(node, &mut out);
            }
        }
        out
    }

    /// Lines for the whole sequence.
    #[must_use]
    pub fn render_all(&self, nodes: &[FlattenedNode]) -> Vec<String> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.push_lines(node, &mut out);
        }
        out
    }
}
