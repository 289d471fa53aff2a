//! Row height sources for window planning.
//!
//! - [`UniformHeight`] - every row has the same height (closed-form math)
//! - [`MeasuredHeights`] - estimate for unmeasured rows, exact values once
//!   measured, prefix sums in a [`FenwickTree`]
//! - [`HeightFn`] - arbitrary per-index closure, linear scans

use crate::fenwick::FenwickTree;

/// Height information for a sequence of rows.
///
/// Offsets are cumulative: `offset(i)` is the sum of the heights of rows
/// `0..i`, so it is also the top edge of row `i`.
pub trait RowHeights {
    /// Height of the row at `index`.
    fn height(&self, index: usize) -> u32;

    /// Top edge of the row at `index`.
    fn offset(&self, index: usize) -> u64 {
        (0..index).map(|i| u64::from(self.height(i))).sum()
    }

    /// Number of leading rows, out of `len`, whose bottom edge is at or
    /// above `y`.
    fn rows_ending_by(&self, y: u64, len: usize) -> usize {
        // offset(k) is non-decreasing in k; find the largest k <= len with
        // offset(k) <= y.
        let (mut lo, mut hi) = (0usize, len);
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if self.offset(mid) <= y {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }

    /// Total extent of the first `len` rows.
    fn total(&self, len: usize) -> u64 {
        self.offset(len)
    }
}

impl<H: RowHeights + ?Sized> RowHeights for &H {
    fn height(&self, index: usize) -> u32 {
        (**self).height(index)
    }

    fn offset(&self, index: usize) -> u64 {
        (**self).offset(index)
    }

    fn rows_ending_by(&self, y: u64, len: usize) -> usize {
        (**self).rows_ending_by(y, len)
    }

    fn total(&self, len: usize) -> u64 {
        (**self).total(len)
    }
}

/// Every row has the same height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformHeight(pub u32);

impl Default for UniformHeight {
    fn default() -> Self {
        Self(1)
    }
}

impl RowHeights for UniformHeight {
    #[inline]
    fn height(&self, _index: usize) -> u32 {
        self.0
    }

    #[inline]
    fn offset(&self, index: usize) -> u64 {
        index as u64 * u64::from(self.0)
    }

    fn rows_ending_by(&self, y: u64, len: usize) -> usize {
        if self.0 == 0 {
            return len;
        }
        usize::try_from(y / u64::from(self.0)).map_or(len, |n| n.min(len))
    }
}

/// Estimated heights refined by measurement.
///
/// Rows start at the estimate; [`set`](Self::set) records the real height
/// once a row has been laid out. Rows past [`len`](Self::len) are treated
/// as estimate-height, so the structure never has to be resized before a
/// query.
#[derive(Debug, Clone)]
pub struct MeasuredHeights {
    heights: Vec<u32>,
    sums: FenwickTree,
    estimate: u32,
}

impl Default for MeasuredHeights {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MeasuredHeights {
    /// Empty set of rows with the given estimate.
    #[must_use]
    pub fn new(estimate: u32) -> Self {
        Self {
            heights: Vec::new(),
            sums: FenwickTree::new(0),
            estimate,
        }
    }

    /// `len` rows, all at the estimate.
    #[must_use]
    pub fn with_len(len: usize, estimate: u32) -> Self {
        Self::from_heights(vec![estimate; len], estimate)
    }

    /// Rows with known heights; rows appended later use `estimate`.
    #[must_use]
    pub fn from_heights(heights: Vec<u32>, estimate: u32) -> Self {
        let sums = FenwickTree::from_values(&heights);
        Self {
            heights,
            sums,
            estimate,
        }
    }

    /// Number of tracked rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height used for rows that have not been measured.
    #[must_use]
    pub fn estimate(&self) -> u32 {
        self.estimate
    }

    /// Track exactly `len` rows. New rows take the estimate; existing
    /// measurements are kept.
    pub fn resize(&mut self, len: usize) {
        if len == self.heights.len() {
            return;
        }
        self.heights.resize(len, self.estimate);
        self.sums = FenwickTree::from_values(&self.heights);
    }

    /// Record the measured height of row `index`, growing if needed.
    pub fn set(&mut self, index: usize, height: u32) {
        if index >= self.heights.len() {
            self.resize(index + 1);
        }
        let old = self.heights[index];
        if old != height {
            self.heights[index] = height;
            self.sums.add(index, i64::from(height) - i64::from(old));
        }
    }

    /// Forget all rows.
    pub fn clear(&mut self) {
        self.heights.clear();
        self.sums = FenwickTree::new(0);
    }
}

impl RowHeights for MeasuredHeights {
    fn height(&self, index: usize) -> u32 {
        self.heights.get(index).copied().unwrap_or(self.estimate)
    }

    fn offset(&self, index: usize) -> u64 {
        let tracked = self.heights.len();
        if index <= tracked {
            self.sums.prefix(index)
        } else {
            self.sums.total() + (index - tracked) as u64 * u64::from(self.estimate)
        }
    }

    fn rows_ending_by(&self, y: u64, len: usize) -> usize {
        let tracked = self.heights.len();
        let within = self.sums.count_within(y);
        if len <= tracked || within < tracked {
            return within.min(len);
        }
        // Every tracked row has ended; the rest are estimate-height.
        let remaining = y - self.sums.total();
        let extra = if self.estimate == 0 {
            len - tracked
        } else {
            usize::try_from(remaining / u64::from(self.estimate)).unwrap_or(usize::MAX)
        };
        tracked.saturating_add(extra).min(len)
    }
}

/// Per-index height function.
///
/// Offsets and offset lookups are linear scans; prefer [`MeasuredHeights`]
/// for long lists that are scrolled often.
#[derive(Clone, Copy)]
pub struct HeightFn<F>(pub F);

impl<F> std::fmt::Debug for HeightFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HeightFn(..)")
    }
}

impl<F: Fn(usize) -> u32> RowHeights for HeightFn<F> {
    fn height(&self, index: usize) -> u32 {
        (self.0)(index)
    }

    fn rows_ending_by(&self, y: u64, len: usize) -> usize {
        let mut bottom = 0u64;
        for i in 0..len {
            bottom += u64::from((self.0)(i));
            if bottom > y {
                return i;
            }
        }
        len
    }
}
