#![forbid(unsafe_code)]

//! Windowing for long flattened sequences.
//!
//! Only the rows that intersect the viewport (plus an overscan margin) are
//! handed to the display layer, each with its absolute offset.
//!
//! # Core Types
//!
//! - [`RowHeights`] - uniform, measured, or per-index row heights
//! - [`compute_visible`] - pure visible-range computation
//! - [`WindowState`] - scroll offset, viewport and overscan
//! - [`FenwickTree`] - prefix sums backing [`MeasuredHeights`]
//!
//! # Example
//!
//! ```
//! use coursetree_window::{UniformHeight, compute_visible};
//!
//! let window = compute_visible(10_000, &UniformHeight(1), 24, 100, 2);
//! assert_eq!(window.visible, 100..124);
//! assert_eq!(window.render, 98..126);
//! assert_eq!(window.total_extent, 10_000);
//! ```

pub mod fenwick;
pub mod heights;
pub mod planner;
pub mod state;

pub use fenwick::FenwickTree;
pub use heights::{HeightFn, MeasuredHeights, RowHeights, UniformHeight};
pub use planner::{PositionedRow, RenderWindow, compute_visible};
pub use state::{DEFAULT_OVERSCAN, WindowState};
