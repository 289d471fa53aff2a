#![forbid(unsafe_code)]

//! Catalog search with hierarchical, windowed display.
//!
//! A free-text query goes to a remote lookup service, which answers with a
//! flat list of `{id, name, parent_id}` records. The records are grouped by
//! parent, flattened into a depth-first display order (cycles and
//! unreachable records are dropped), and shown through a scrollable window
//! that only materializes the rows near the viewport.
//!
//! ```
//! use coursetree::prelude::*;
//!
//! let lookup = |_: &str| -> Result<Vec<Record>, LookupError> {
//!     Ok(vec![Record::new(1, "Math", 0), Record::new(2, "Algebra", 1)])
//! };
//! let mut pipeline = ResultPipeline::new(ROOT_SENTINEL);
//! let outcome = pipeline.search(&lookup, "math");
//! assert!(outcome.notice().is_none());
//!
//! let outline = Outline::new().with_divider(None);
//! let mut state = WindowState::new(10);
//! let window = state.window(pipeline.nodes().len(), &UniformHeight(1));
//! assert_eq!(outline.render_window(pipeline.nodes(), &window), ["Math", "- Algebra"]);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod outline;
pub mod pipeline;

// --- Hierarchy re-exports -------------------------------------------------

pub use coursetree_core::{
    FlattenedNode, Flattener, GroupIndex, ParentId, ROOT_SENTINEL, Record, RecordId, flatten,
};

// --- Window re-exports ----------------------------------------------------

pub use coursetree_window::{
    DEFAULT_OVERSCAN, HeightFn, MeasuredHeights, PositionedRow, RenderWindow, RowHeights,
    UniformHeight, WindowState, compute_visible,
};

// --- Local re-exports -----------------------------------------------------

pub use config::{Config, LogFormat};
pub use error::{ConfigError, LookupError};
pub use lookup::{HttpLookup, Lookup};
pub use outline::Outline;
pub use pipeline::{Notice, ResultPipeline, SearchOutcome, SearchTicket};

pub mod prelude {
    pub use crate::{
        Config, FlattenedNode, HttpLookup, Lookup, LookupError, Notice, Outline, ROOT_SENTINEL,
        Record, RenderWindow, ResultPipeline, RowHeights, SearchOutcome, UniformHeight,
        WindowState,
    };
}
