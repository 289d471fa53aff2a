//! Fenwick tree (Binary Indexed Tree) over row heights.
//!
//! Stores `u32` row heights and answers the two questions a windowed list
//! asks on every scroll: "where does row `i` start?" and "how many rows
//! have ended by offset `y`?". Sums are kept in `u64` so a very long list
//! of tall rows cannot overflow.
//!
//! | Operation | Time |
//! |-----------|------|
//! | `from_values(values)` | O(n) |
//! | `add(i, delta)` | O(log n) |
//! | `prefix(count)` | O(log n) |
//! | `count_within(target)` | O(log n) |
//! | `rebuild(values)` | O(n) |
//!
//! # Invariants
//!
//! 1. `tree[i]` stores the sum of the `lowbit(i)` values ending at `i`.
//! 2. `prefix(len()) == total()`.
//! 3. After `rebuild`, the tree exactly represents the given values.

/// Prefix sums over row heights.
#[derive(Debug, Clone, Default)]
pub struct FenwickTree {
    /// 1-indexed tree storage. `tree[0]` is unused.
    tree: Vec<u64>,
    n: usize,
}

impl FenwickTree {
    /// Create a tree of `n` zero-height rows.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            tree: vec![0; n + 1],
            n,
        }
    }

    /// Build from row heights in O(n).
    #[must_use]
    pub fn from_values(values: &[u32]) -> Self {
        let mut tree = Self::new(values.len());
        tree.fill_from(values);
        tree
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Add a signed `delta` to row `i`.
    ///
    /// Callers keep each row's value non-negative; the two's complement cast
    /// makes wrapping addition subtract for negative deltas.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub fn add(&mut self, i: usize, delta: i64) {
        assert!(i < self.n, "index {i} out of bounds (n={})", self.n);
        let delta = delta as u64;
        let mut idx = i + 1;
        while idx <= self.n {
            self.tree[idx] = self.tree[idx].wrapping_add(delta);
            idx += lowbit(idx);
        }
    }

    /// Sum of the first `count` rows, i.e. the top edge of row `count`.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    #[must_use]
    pub fn prefix(&self, count: usize) -> u64 {
        assert!(count <= self.n, "count {count} out of bounds (n={})", self.n);
        let mut sum = 0u64;
        let mut idx = count;
        while idx > 0 {
            sum = sum.wrapping_add(self.tree[idx]);
            idx -= lowbit(idx);
        }
        sum
    }

    /// Sum of all rows.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.prefix(self.n)
    }

    /// Largest `count` such that `prefix(count) <= target`.
    ///
    /// With non-negative rows this is the number of leading rows whose
    /// bottom edge lies at or above `target`. Trailing zero-height rows at
    /// that boundary are included.
    #[must_use]
    pub fn count_within(&self, target: u64) -> usize {
        let mut pos = 0usize;
        let mut remaining = target;
        let mut bit_mask = most_significant_bit(self.n);

        while bit_mask > 0 {
            let next = pos + bit_mask;
            if next <= self.n && self.tree[next] <= remaining {
                remaining -= self.tree[next];
                pos = next;
            }
            bit_mask >>= 1;
        }
        pos
    }

    /// Replace every row height in O(n).
    ///
    /// # Panics
    /// Panics if `values.len() != len()`.
    pub fn rebuild(&mut self, values: &[u32]) {
        assert_eq!(values.len(), self.n, "rebuild size mismatch");
        self.fill_from(values);
    }

    fn fill_from(&mut self, values: &[u32]) {
        self.tree.fill(0);
        for (i, &v) in values.iter().enumerate() {
            self.tree[i + 1] = u64::from(v);
        }
        for i in 1..=self.n {
            let parent = i + lowbit(i);
            if parent <= self.n {
                self.tree[parent] = self.tree[parent].wrapping_add(self.tree[i]);
            }
        }
    }
}

/// Lowest set bit of `x`. E.g., `lowbit(6) = 2`, `lowbit(4) = 4`.
#[inline]
fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}

/// Most significant bit that fits within `n`.
#[inline]
fn most_significant_bit(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1 << (usize::BITS - 1 - n.leading_zeros())
}
