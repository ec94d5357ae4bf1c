//! Filepath: src/core/compress.rs
//! Compressor/trimmer (spec.md §4.4): shrinks the problem the LCS engine has
//! to solve without changing its length. Two independent reductions are
//! applied to the classified identifier arrays:
//!
//! 1. Common prefix/suffix trimming: leading and trailing runs where both
//!    sides carry the same identifier at the same offset can only ever be
//!    SAME, so they are removed from the problem and restored verbatim when
//!    expanding (spec.md §4.7).
//! 2. Unique-run collapse: a maximal run of consecutive lines on one side
//!    whose identifier does not occur anywhere on the other side cannot
//!    participate in any LCS match; such a run is replaced by a single
//!    synthetic (negative) identifier, shrinking the sequence the LCS
//!    engine walks from `k` entries down to one while the run's original
//!    length is remembered in `z_counts` for later expansion.
//!
//! Neither reduction changes the length of the underlying LCS; both are
//! purely a speed optimization over large, mostly-matching inputs.

use std::collections::HashSet;

/// The compressed middle segment plus enough bookkeeping to restore the
/// original indices for every synthetic identifier.
#[derive(Debug, Clone, Default)]
pub struct Compressed {
    /// Lines common to the head of both sides, trimmed from the problem.
    pub prefix_len: usize,
    /// Lines common to the tail of both sides, trimmed from the problem.
    pub suffix_len: usize,
    /// Side 1 identifiers for the middle segment; synthetic ids are negative.
    pub mid1: Vec<i64>,
    /// Side 2 identifiers for the middle segment; synthetic ids are negative.
    pub mid2: Vec<i64>,
    /// Run length represented by synthetic id `-(i as i64) - 1`.
    pub z_counts: Vec<usize>,
}

impl Compressed {
    /// Number of real lines a (possibly synthetic) middle-segment identifier
    /// represents.
    #[must_use]
    pub fn span(&self, id: i64) -> usize {
        if id >= 0 { 1 } else { self.z_counts[(-id - 1) as usize] }
    }
}

fn common_prefix_len(a: &[u32], b: &[u32]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &[u32], b: &[u32], limit: usize) -> usize {
    a.iter().rev().zip(b.iter().rev()).take(limit).take_while(|(x, y)| x == y).count()
}

/// Collapse maximal runs of `mid` whose identifier is absent from `other`
/// into single synthetic negative identifiers, shared with the opposite
/// side's collapse pass through `z_counts` (each run gets its own, globally
/// unique, negative slot regardless of which side it came from).
fn collapse_absent_runs(mid: &[u32], other: &HashSet<u32>, z_counts: &mut Vec<usize>) -> Vec<i64> {
    let mut out = Vec::with_capacity(mid.len());
    let mut i = 0;
    while i < mid.len() {
        if other.contains(&mid[i]) {
            out.push(i64::from(mid[i]));
            i += 1;
            continue;
        }
        let start = i;
        let mut j = i + 1;
        while j < mid.len() && !other.contains(&mid[j]) {
            j += 1;
        }
        let zid = -(z_counts.len() as i64) - 1;
        z_counts.push(j - start);
        out.push(zid);
        i = j;
    }
    out
}

/// Compress two classified identifier arrays, trimming common head/tail and
/// collapsing runs that are unmatchable on the opposite side in the
/// remaining middle.
#[must_use]
pub fn compress(ids1: &[u32], ids2: &[u32]) -> Compressed {
    let prefix_len = common_prefix_len(ids1, ids2);
    let remaining = ids1.len().min(ids2.len()) - prefix_len;
    let suffix_len = common_suffix_len(ids1, ids2, remaining);

    let mid1 = &ids1[prefix_len..ids1.len() - suffix_len];
    let mid2 = &ids2[prefix_len..ids2.len() - suffix_len];

    if mid1.is_empty() || mid2.is_empty() {
        return Compressed {
            prefix_len,
            suffix_len,
            mid1: mid1.iter().map(|&id| i64::from(id)).collect(),
            mid2: mid2.iter().map(|&id| i64::from(id)).collect(),
            z_counts: Vec::new(),
        };
    }

    let set1: HashSet<u32> = mid1.iter().copied().collect();
    let set2: HashSet<u32> = mid2.iter().copied().collect();

    let mut z_counts = Vec::new();
    let mid1_out = collapse_absent_runs(mid1, &set2, &mut z_counts);
    let mid2_out = collapse_absent_runs(mid2, &set1, &mut z_counts);

    Compressed { prefix_len, suffix_len, mid1: mid1_out, mid2: mid2_out, z_counts }
}
