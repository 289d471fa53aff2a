//! Visible-range computation.
//!
//! [`compute_visible`] is a pure function of the row count, the row
//! heights, the viewport height and the scroll offset. Any change to one of
//! them means calling it again; nothing is patched incrementally. Pair it
//! with [`MeasuredHeights`](crate::MeasuredHeights) to keep each call
//! O(log n + rendered rows) for long lists.

use std::ops::Range;

use crate::heights::RowHeights;

/// A row selected for rendering, with its absolute position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedRow {
    /// Index into the flattened sequence.
    pub index: usize,
    /// Top edge: sum of the heights of all preceding rows.
    pub offset: u64,
    pub height: u32,
}

/// Result of one window computation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderWindow {
    /// Rows that geometrically intersect `[scroll, scroll + viewport)`.
    pub visible: Range<usize>,
    /// `visible` widened by the overscan on both sides, clamped to the list.
    pub render: Range<usize>,
    /// Sum of all row heights.
    pub total_extent: u64,
    /// One entry per index in `render`, in order.
    pub rows: Vec<PositionedRow>,
}

impl RenderWindow {
    fn empty(total_extent: u64) -> Self {
        Self {
            total_extent,
            ..Self::default()
        }
    }

    /// Whether nothing is to be rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.render.is_empty()
    }
}

/// Compute which rows intersect the viewport and where they sit.
///
/// A row occupies the half-open band `[offset, offset + height)`, so
/// zero-height rows on the viewport edges do not count as visible. The
/// caller is expected to keep `scroll_offset` within
/// `[0, total_extent - viewport_height]`; an offset past the end yields an
/// empty window rather than an error.
#[must_use]
pub fn compute_visible<H>(
    len: usize,
    heights: &H,
    viewport_height: u32,
    scroll_offset: u64,
    overscan: usize,
) -> RenderWindow
where
    H: RowHeights + ?Sized,
{
    if len == 0 {
        return RenderWindow::empty(0);
    }
    let total_extent = heights.total(len);
    if viewport_height == 0 {
        return RenderWindow::empty(total_extent);
    }

    let band_end = scroll_offset.saturating_add(u64::from(viewport_height));
    // Rows whose bottom edge is at or above the band's top are fully scrolled past.
    let first = heights.rows_ending_by(scroll_offset, len);
    // Rows whose top edge is strictly above the band's bottom.
    let starting_before = heights
        .rows_ending_by(band_end - 1, len)
        .saturating_add(1)
        .min(len);

    if first >= starting_before {
        let at = first.min(len);
        return RenderWindow {
            visible: at..at,
            render: at..at,
            total_extent,
            rows: Vec::new(),
        };
    }

    let visible = first..starting_before;
    let render = first.saturating_sub(overscan)..starting_before.saturating_add(overscan).min(len);

    let mut rows = Vec::with_capacity(render.len());
    let mut offset = heights.offset(render.start);
    for index in render.clone() {
        let height = heights.height(index);
        rows.push(PositionedRow {
            index,
            offset,
            height,
        });
        offset += u64::from(height);
    }

    RenderWindow {
        visible,
        render,
        total_extent,
        rows,
    }
}
