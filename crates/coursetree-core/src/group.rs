#![forbid(unsafe_code)]

//! Parent-id grouping of a raw record list.
//!
//! [`GroupIndex`] maps each `parent_id` to the records that reference it,
//! ordered by ascending id. It is rebuilt from scratch for every lookup
//! response and never patched in place.

use std::collections::HashMap;

use crate::record::{ParentId, Record};

/// Mapping from parent id to its children, each group sorted by id.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: HashMap<ParentId, Vec<Record>>,
    records: usize,
}

impl GroupIndex {
    /// Group `records` by parent id and sort every group by ascending id.
    ///
    /// The sort is stable, so duplicate ids keep their arrival order.
    /// Dangling parent references are kept as-is; they simply never get
    /// reached from the root.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut groups: HashMap<ParentId, Vec<Record>> = HashMap::new();
        let mut count = 0usize;
        for record in records {
            count += 1;
            groups.entry(record.parent_id()).or_default().push(record);
        }
        for children in groups.values_mut() {
            children.sort_by_key(Record::id);
        }

        crate::trace!(records = count, groups = groups.len(), "group index built");

        Self {
            groups,
            records: count,
        }
    }

    /// Children of `parent`, ascending by id. Empty when `parent` has none.
    #[must_use]
    pub fn children(&self, parent: ParentId) -> &[Record] {
        self.groups.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any record names `parent` as its parent.
    #[must_use]
    pub fn contains_parent(&self, parent: ParentId) -> bool {
        self.groups.contains_key(&parent)
    }

    /// Number of distinct parent ids.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of records the index was built from, duplicates included.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Parent ids present in the index, in no particular order.
    pub fn parents(&self) -> impl Iterator<Item = ParentId> + '_ {
        self.groups.keys().copied()
    }
}

impl FromIterator<Record> for GroupIndex {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::build(iter)
    }
}
