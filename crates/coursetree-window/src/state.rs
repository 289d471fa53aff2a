//! Scroll state for a windowed view of the flattened sequence.
//!
//! [`WindowState`] is transient: it holds the viewport height, the scroll
//! offset and the overscan, and turns them into a [`RenderWindow`] on
//! demand. The scroll offset is always kept within
//! `[0, total_extent - viewport_height]`.

use crate::heights::RowHeights;
use crate::planner::{RenderWindow, compute_visible};

/// Default number of extra rows rendered above and below the viewport.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Viewport, scroll offset and overscan for one windowed view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    viewport_height: u32,
    scroll_offset: u64,
    overscan: usize,
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl WindowState {
    /// Create a state for a viewport of the given height, scrolled to the top.
    #[must_use]
    pub fn new(viewport_height: u32) -> Self {
        Self {
            viewport_height,
            scroll_offset: 0,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Set overscan amount.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    #[must_use]
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Resize the viewport (terminal resize, window resize).
    pub fn set_viewport_height(&mut self, viewport_height: u32, total_extent: u64) {
        self.viewport_height = viewport_height;
        self.clamp(total_extent);
    }

    /// Largest valid scroll offset for the given content extent.
    #[must_use]
    pub fn max_scroll(&self, total_extent: u64) -> u64 {
        total_extent.saturating_sub(u64::from(self.viewport_height))
    }

    /// Pull the scroll offset back into range after the content shrank.
    pub fn clamp(&mut self, total_extent: u64) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll(total_extent));
    }

    /// Scroll by `delta` (positive = down).
    pub fn scroll_by(&mut self, delta: i64, total_extent: u64) {
        let target = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(target, total_extent);
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, offset: u64, total_extent: u64) {
        self.scroll_offset = offset.min(self.max_scroll(total_extent));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self, total_extent: u64) {
        self.scroll_offset = self.max_scroll(total_extent);
    }

    /// Page up (scroll by viewport height).
    pub fn page_up(&mut self, total_extent: u64) {
        self.scroll_by(-i64::from(self.viewport_height), total_extent);
    }

    /// Page down (scroll by viewport height).
    pub fn page_down(&mut self, total_extent: u64) {
        self.scroll_by(i64::from(self.viewport_height), total_extent);
    }

    /// Whether the view is scrolled to the end of the content.
    #[must_use]
    pub fn is_at_bottom(&self, total_extent: u64) -> bool {
        self.scroll_offset >= self.max_scroll(total_extent)
    }

    /// Scroll the minimum amount that brings row `index` fully into view.
    ///
    /// Rows taller than the viewport are aligned to the top.
    pub fn ensure_visible<H>(&mut self, index: usize, len: usize, heights: &H)
    where
        H: RowHeights + ?Sized,
    {
        if index >= len {
            return;
        }
        let total = heights.total(len);
        let top = heights.offset(index);
        let bottom = top + u64::from(heights.height(index));
        let viewport = u64::from(self.viewport_height);

        if top < self.scroll_offset || bottom - top > viewport {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + viewport {
            self.scroll_offset = bottom - viewport;
        }
        self.clamp(total);
    }

    /// Rows to render for a sequence of `len` rows.
    ///
    /// The stored offset is clamped against the current extent first, so a
    /// sequence that shrank since the last scroll never produces an empty
    /// window while rows remain.
    pub fn window<H>(&mut self, len: usize, heights: &H) -> RenderWindow
    where
        H: RowHeights + ?Sized,
    {
        let total = if len == 0 { 0 } else { heights.total(len) };
        self.clamp(total);
        compute_visible(
            len,
            heights,
            self.viewport_height,
            self.scroll_offset,
            self.overscan,
        )
    }
}
