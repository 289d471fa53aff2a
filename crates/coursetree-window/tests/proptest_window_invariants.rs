//! Property-based invariant tests for window planning.
//!
//! For any row count, positive row heights, viewport and in-range scroll
//! offset:
//!
//! 1. `visible` is exactly the set of rows intersecting the viewport band.
//! 2. `render` widens `visible` by exactly `overscan` on each side, clamped.
//! 3. `total_extent` is the sum of all heights.
//! 4. Every positioned row's offset is the sum of the preceding heights.
//! 5. Uniform, measured and per-index height sources agree.

use coursetree_window::{
    HeightFn, MeasuredHeights, RenderWindow, RowHeights, UniformHeight, WindowState,
    compute_visible,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn heights_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..=50, 0..200)
}

/// Brute-force reference: indices whose `[top, top + h)` meets the band.
fn intersecting(heights: &[u32], scroll: u64, viewport: u32) -> Vec<usize> {
    let band_end = scroll + u64::from(viewport);
    let mut top = 0u64;
    let mut out = Vec::new();
    for (i, &h) in heights.iter().enumerate() {
        let bottom = top + u64::from(h);
        if top < band_end && bottom > scroll {
            out.push(i);
        }
        top = bottom;
    }
    out
}

fn check_window(
    window: &RenderWindow,
    heights: &[u32],
    scroll: u64,
    viewport: u32,
    overscan: usize,
) -> Result<(), TestCaseError> {
    let len = heights.len();
    let total: u64 = heights.iter().map(|&h| u64::from(h)).sum();
    prop_assert_eq!(window.total_extent, total);

    let expected = intersecting(heights, scroll, viewport);
    let got: Vec<usize> = window.visible.clone().collect();
    prop_assert_eq!(&got, &expected);

    if expected.is_empty() {
        prop_assert!(window.render.is_empty());
        return Ok(());
    }
    let start = window.visible.start.saturating_sub(overscan);
    let end = (window.visible.end + overscan).min(len);
    prop_assert_eq!(window.render.clone(), start..end);

    prop_assert_eq!(window.rows.len(), window.render.len());
    for row in &window.rows {
        let top: u64 = heights[..row.index].iter().map(|&h| u64::from(h)).sum();
        prop_assert_eq!(row.offset, top, "offset of row {}", row.index);
        prop_assert_eq!(row.height, heights[row.index]);
    }
    Ok(())
}

fn clamp_scroll(raw: u64, total: u64, viewport: u32) -> u64 {
    raw.min(total.saturating_sub(u64::from(viewport)))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Measured heights against the brute-force reference
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn measured_window_is_exact(
        heights in heights_strategy(),
        viewport in 1u32..300,
        raw_scroll in 0u64..12_000,
        overscan in 0usize..6,
    ) {
        let source = MeasuredHeights::from_heights(heights.clone(), 1);
        let total = source.total(heights.len());
        let scroll = clamp_scroll(raw_scroll, total, viewport);
        let window = compute_visible(heights.len(), &source, viewport, scroll, overscan);
        check_window(&window, &heights, scroll, viewport, overscan)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Uniform heights against the brute-force reference
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn uniform_window_is_exact(
        len in 0usize..500,
        row in 1u32..8,
        viewport in 1u32..100,
        raw_scroll in 0u64..4_000,
        overscan in 0usize..6,
    ) {
        let heights = vec![row; len];
        let total = len as u64 * u64::from(row);
        let scroll = clamp_scroll(raw_scroll, total, viewport);
        let window = compute_visible(len, &UniformHeight(row), viewport, scroll, overscan);
        check_window(&window, &heights, scroll, viewport, overscan)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Height sources agree
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn height_fn_agrees_with_measured(
        heights in heights_strategy(),
        viewport in 1u32..300,
        raw_scroll in 0u64..12_000,
    ) {
        let measured = MeasuredHeights::from_heights(heights.clone(), 1);
        let table = heights.clone();
        let by_fn = HeightFn(move |i: usize| table[i]);
        let scroll = clamp_scroll(raw_scroll, measured.total(heights.len()), viewport);
        prop_assert_eq!(
            compute_visible(heights.len(), &by_fn, viewport, scroll, 2),
            compute_visible(heights.len(), &measured, viewport, scroll, 2)
        );
    }
}

proptest! {
    #[test]
    fn measurements_update_window(
        heights in prop::collection::vec(1u32..=20, 1..100),
        updates in prop::collection::vec((0usize..100, 1u32..=20), 0..30),
        viewport in 1u32..80,
    ) {
        let mut source = MeasuredHeights::with_len(heights.len(), 1);
        for (i, &h) in heights.iter().enumerate() {
            source.set(i, h);
        }
        let mut reference = heights.clone();
        for (i, h) in updates {
            let i = i % reference.len();
            source.set(i, h);
            reference[i] = h;
        }
        let total = reference.iter().map(|&h| u64::from(h)).sum::<u64>();
        let scroll = clamp_scroll(total / 2, total, viewport);
        let window = compute_visible(reference.len(), &source, viewport, scroll, 1);
        check_window(&window, &reference, scroll, viewport, 1)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// WindowState keeps the offset in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn state_offset_stays_in_range(
        len in 0usize..300,
        viewport in 1u32..60,
        deltas in prop::collection::vec(-500i64..500, 0..20),
    ) {
        let heights = UniformHeight(2);
        let total = heights.total(len);
        let mut state = WindowState::new(viewport);
        for delta in deltas {
            state.scroll_by(delta, total);
            prop_assert!(state.scroll_offset() <= state.max_scroll(total));
        }
        let window = state.window(len, &heights);
        prop_assert_eq!(window.visible.is_empty(), len == 0);
    }
}
