#![forbid(unsafe_code)]

//! Cycle-safe, non-recursive flattening of a [`GroupIndex`] into a
//! depth-tagged pre-order sequence.
//!
//! # Contract
//!
//! - Roots are the records whose parent id equals the root key; they and
//!   every group of siblings are visited in ascending id order.
//! - Each record id is emitted at most once per pass. A record reachable
//!   from several parents is emitted under the first one visited; a record
//!   that is its own ancestor is never re-entered.
//! - Records not reachable from the root key (dangling parents, detached
//!   cycles) are omitted. Malformed hierarchies never fail.
//! - Traversal uses an explicit work list. Depth and fan-out of the input
//!   are data-controlled, so the call stack never grows with them.

use std::collections::HashSet;

use crate::group::GroupIndex;
use crate::record::{FlattenedNode, ParentId, RecordId};

/// A pending visit: the record at `slot` within the children of `parent`.
///
/// Positions are stored instead of references so the work list carries no
/// borrow of the index and can be reused across passes.
#[derive(Debug, Clone, Copy)]
struct Pending {
    parent: ParentId,
    slot: usize,
    depth: usize,
}

/// Reusable flattener.
///
/// Keeps its work list and visited set between passes to avoid
/// reallocating them for every search; both are cleared when a pass starts.
#[derive(Debug, Default)]
pub struct Flattener {
    stack: Vec<Pending>,
    visited: HashSet<RecordId>,
}

impl Flattener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `index` starting from the records parented by `root`.
    pub fn flatten(&mut self, index: &GroupIndex, root: ParentId) -> Vec<FlattenedNode> {
        let span = crate::debug_span!("flatten", root, records = index.record_count());
        let _guard = span.enter();

        self.stack.clear();
        self.visited.clear();

        let mut out = Vec::with_capacity(index.record_count());
        self.push_children(index, root, 0);

        while let Some(pending) = self.stack.pop() {
            let Some(record) = index.children(pending.parent).get(pending.slot) else {
                continue;
            };
            if !self.visited.insert(record.id()) {
                continue;
            }
            out.push(FlattenedNode::new(record.clone(), pending.depth));
            self.push_children(index, record.id(), pending.depth + 1);
        }

        crate::debug!(
            emitted = out.len(),
            omitted = index.record_count().saturating_sub(out.len()),
            "flatten complete"
        );
        out
    }

    /// Push the unvisited children of `parent` so the lowest id pops first.
    fn push_children(&mut self, index: &GroupIndex, parent: ParentId, depth: usize) {
        let children = index.children(parent);
        for (slot, child) in children.iter().enumerate().rev() {
            if !self.visited.contains(&child.id()) {
                self.stack.push(Pending {
                    parent,
                    slot,
                    depth,
                });
            }
        }
    }
}

/// Flatten `index` from `root` with a fresh [`Flattener`].
#[must_use]
pub fn flatten(index: &GroupIndex, root: ParentId) -> Vec<FlattenedNode> {
    Flattener::new().flatten(index, root)
}
