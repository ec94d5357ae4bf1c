//! Filepath: src/core/line.rs
//! The `Line` type and edit-operation stream shared across the core.

use std::ops::Range;

/// An immutable byte slice with no trailing newline (spec.md §3).
///
/// `Line` borrows from a single owning buffer (a heap read or a memory
/// mapping); the core never copies line bytes, only indices into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    bytes: &'a [u8],
}

impl<'a> Line<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The kind of an [`EditOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Corresponding ranges are equivalent under the active options.
    Same,
    /// Both ranges are non-empty and differ.
    Modify,
    /// `start2 == end2`; lines were only present on side 1.
    Remove,
    /// `start1 == end1`; lines were only present on side 2.
    Insert,
}

/// A tagged edit operation referencing half-open ranges into the original
/// line arrays of both sides (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub op: OpKind,
    pub range1: Range<usize>,
    pub range2: Range<usize>,
}

impl EditOp {
    #[must_use]
    pub fn same(range1: Range<usize>, range2: Range<usize>) -> Self {
        debug_assert_eq!(range1.end - range1.start, range2.end - range2.start);
        Self { op: OpKind::Same, range1, range2 }
    }

    #[must_use]
    pub fn modify(range1: Range<usize>, range2: Range<usize>) -> Self {
        debug_assert!(!range1.is_empty() && !range2.is_empty());
        Self { op: OpKind::Modify, range1, range2 }
    }

    #[must_use]
    pub fn remove(range1: Range<usize>, at2: usize) -> Self {
        debug_assert!(!range1.is_empty());
        Self { op: OpKind::Remove, range1, range2: at2..at2 }
    }

    #[must_use]
    pub fn insert(at1: usize, range2: Range<usize>) -> Self {
        debug_assert!(!range2.is_empty());
        Self { op: OpKind::Insert, range1: at1..at1, range2 }
    }

    /// Returns a copy of this op with side 1 and side 2 swapped and
    /// `Insert`/`Remove` exchanged, matching the symmetry property of
    /// spec.md §8 ("swapping inputs swaps INSERT<->REMOVE").
    #[must_use]
    pub fn swapped(&self) -> Self {
        let op = match self.op {
            OpKind::Same => OpKind::Same,
            OpKind::Modify => OpKind::Modify,
            OpKind::Remove => OpKind::Insert,
            OpKind::Insert => OpKind::Remove,
        };
        Self { op, range1: self.range2.clone(), range2: self.range1.clone() }
    }
}
