#![forbid(unsafe_code)]

//! Core: catalog records, parent grouping, and cycle-safe tree flattening.
//!
//! A lookup returns a flat list of `{id, name, parent_id}` records. This
//! crate turns that list into the ordered, depth-tagged sequence the display
//! layer renders:
//!
//! ```
//! use coursetree_core::{GroupIndex, Record, ROOT_SENTINEL, flatten};
//!
//! let index = GroupIndex::build(vec![
//!     Record::new(1, "Math", 0),
//!     Record::new(2, "Algebra", 1),
//!     Record::new(4, "CS", 0),
//! ]);
//! let nodes = flatten(&index, ROOT_SENTINEL);
//! let outline: Vec<_> = nodes.iter().map(|n| (n.name(), n.depth())).collect();
//! assert_eq!(outline, [("Math", 0), ("Algebra", 1), ("CS", 0)]);
//! ```

pub mod flatten;
pub mod group;
pub mod logging;
pub mod record;

pub use flatten::{Flattener, flatten};
pub use group::GroupIndex;
pub use record::{FlattenedNode, ParentId, ROOT_SENTINEL, Record, RecordId};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
