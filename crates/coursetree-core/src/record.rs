#![forbid(unsafe_code)]

//! Catalog records and their flattened, depth-tagged form.

/// Identifier of a catalog record, unique within one lookup response.
pub type RecordId = i64;

/// Parent reference of a catalog record.
pub type ParentId = i64;

/// Parent id that marks a record as top-level.
///
/// This is only a default: every algorithm in this crate takes the root key
/// as a parameter.
pub const ROOT_SENTINEL: ParentId = 0;

/// One catalog entry as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    id: RecordId,
    name: String,
    parent_id: ParentId,
}

impl Record {
    /// Create a record.
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>, parent_id: ParentId) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }

    /// Record id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent reference.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> ParentId {
        self.parent_id
    }
}

/// A record placed in the flattened sequence, tagged with its depth.
///
/// Root-level records have depth 0; every other node sits one level below
/// the node that introduced it during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedNode {
    record: Record,
    depth: usize,
}

impl FlattenedNode {
    /// Pair a record with its traversal depth.
    #[must_use]
    pub fn new(record: Record, depth: usize) -> Self {
        Self { record, depth }
    }

    /// The underlying record.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.record.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> ParentId {
        self.record.parent_id
    }

    /// Distance from the root level.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this node was emitted at the root level.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Split into record and depth.
    #[must_use]
    pub fn into_parts(self) -> (Record, usize) {
        (self.record, self.depth)
    }
}
