//! Filepath: src/core/report.rs
//! Change expander and reporter (spec.md §4.7). Expands the compressed,
//! boundary-shifted change flags back to indices into the original line
//! arrays, then walks both sides in lockstep to emit grouped [`EditOp`]s
//! with up to `context` lines of surrounding SAME context per hunk.

use crate::core::compress::Compressed;
use crate::core::lcs::Lcs;
use crate::core::line::{EditOp, OpKind};

/// Expand compressed/shifted change flags into full per-original-line
/// "changed" bit arrays for both sides.
#[must_use]
pub fn expand(compressed: &Compressed, lcs: &Lcs, len1: usize, len2: usize) -> (Vec<bool>, Vec<bool>) {
    let mut changed1 = vec![false; len1];
    let mut changed2 = vec![false; len2];

    let mut orig_off = compressed.prefix_len;
    for (idx, &tok) in compressed.mid1.iter().enumerate() {
        let span = compressed.span(tok);
        if lcs.changed1[idx] {
            for k in 0..span {
                changed1[orig_off + k] = true;
            }
        }
        orig_off += span;
    }

    let mut orig_off = compressed.prefix_len;
    for (idx, &tok) in compressed.mid2.iter().enumerate() {
        let span = compressed.span(tok);
        if lcs.changed2[idx] {
            for k in 0..span {
                changed2[orig_off + k] = true;
            }
        }
        orig_off += span;
    }

    (changed1, changed2)
}

/// Trim a leading/trailing run of identifier-0 lines from `range` (spec.md
/// §4.7: "any all-zero-identifier lines trimmed from both ends of each run
/// when ignore_blank_lines suppresses them — the run is shortened but still
/// emitted if non-empty"). A no-op unless `ignore_blank_lines` is active.
fn trim_blank(ids: &[u32], mut range: std::ops::Range<usize>, ignore_blank_lines: bool) -> std::ops::Range<usize> {
    if !ignore_blank_lines {
        return range;
    }
    while range.start < range.end && ids[range.start] == 0 {
        range.start += 1;
    }
    while range.end > range.start && ids[range.end - 1] == 0 {
        range.end -= 1;
    }
    range
}

/// Walk both "changed" arrays in lockstep, producing one op per maximal
/// SAME run and one op per maximal (possibly paired) change run. The
/// result strictly alternates SAME and non-SAME ops.
///
/// `ids1`/`ids2` are the original per-line identifiers (not the compressed
/// ones); when `ignore_blank_lines` is set they're used to trim identifier-0
/// lines from the edges of each detected change run before classifying it,
/// per spec.md §4.7. A run that trims away entirely on both sides is
/// dropped from emission rather than reported as a change.
fn raw_ops(changed1: &[bool], changed2: &[bool], ids1: &[u32], ids2: &[u32], ignore_blank_lines: bool) -> Vec<EditOp> {
    let len1 = changed1.len();
    let len2 = changed2.len();
    let mut ops = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < len1 || j < len2 {
        if i < len1 && j < len2 && !changed1[i] && !changed2[j] {
            let (si, sj) = (i, j);
            while i < len1 && j < len2 && !changed1[i] && !changed2[j] {
                i += 1;
                j += 1;
            }
            ops.push(EditOp::same(si..i, sj..j));
        } else {
            let (si, sj) = (i, j);
            while i < len1 && changed1[i] {
                i += 1;
            }
            while j < len2 && changed2[j] {
                j += 1;
            }
            let r1 = trim_blank(ids1, si..i, ignore_blank_lines);
            let r2 = trim_blank(ids2, sj..j, ignore_blank_lines);
            let (dellen, inslen) = (r1.len(), r2.len());
            if dellen > 0 && inslen > 0 {
                ops.push(EditOp::modify(r1, r2));
            } else if dellen > 0 {
                ops.push(EditOp::remove(r1, r2.start));
            } else if inslen > 0 {
                ops.push(EditOp::insert(r1.start, r2));
            } else if i == si && j == sj {
                // Neither side advanced: a same-but-misaligned position,
                // which a correct expansion never produces. Force progress.
                if i < len1 {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            // Otherwise both ranges trimmed away entirely (a pure run of
            // blank-line noise): dropped from emission, per spec.md §8
            // "Blank-line suppression". `i`/`j` already advanced past it.
        }
    }
    ops
}

/// Collapse the alternating SAME/change op stream into hunks, keeping at
/// most `context` lines of SAME context on either side of a change and
/// merging hunks whose separating SAME run is at most `2 * context` long.
fn group_with_context(ops: Vec<EditOp>, context: usize) -> Vec<Vec<EditOp>> {
    let n = ops.len();
    let mut groups: Vec<Vec<EditOp>> = Vec::new();
    let mut current: Vec<EditOp> = Vec::new();

    for (idx, op) in ops.into_iter().enumerate() {
        if op.op != OpKind::Same {
            current.push(op);
            continue;
        }

        let is_first = idx == 0;
        let is_last = idx == n - 1;
        let len = op.range1.len();

        if is_first && is_last {
            continue; // whole comparison is identical
        }

        if is_first {
            let keep = len.min(context);
            if keep > 0 {
                let r1 = op.range1.end - keep..op.range1.end;
                let r2 = op.range2.end - keep..op.range2.end;
                current.push(EditOp::same(r1, r2));
            }
            continue;
        }

        if is_last {
            let keep = len.min(context);
            if keep > 0 {
                let r1 = op.range1.start..op.range1.start + keep;
                let r2 = op.range2.start..op.range2.start + keep;
                current.push(EditOp::same(r1, r2));
            }
            groups.push(std::mem::take(&mut current));
            continue;
        }

        if len <= 2 * context {
            current.push(op);
            continue;
        }

        if context > 0 {
            let r1 = op.range1.start..op.range1.start + context;
            let r2 = op.range2.start..op.range2.start + context;
            current.push(EditOp::same(r1, r2));
        }
        groups.push(std::mem::take(&mut current));
        if context > 0 {
            let r1 = op.range1.end - context..op.range1.end;
            let r2 = op.range2.end - context..op.range2.end;
            current.push(EditOp::same(r1, r2));
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Produce context-windowed hunks of [`EditOp`]s from compressed, boundary-
/// shifted change flags (spec.md §4.7). `ids1`/`ids2` are the original
/// per-line identifiers, used only to trim blank-line noise from change
/// runs when `ignore_blank_lines` is set.
#[must_use]
pub fn report(
    compressed: &Compressed,
    lcs: &Lcs,
    ids1: &[u32],
    ids2: &[u32],
    context: usize,
    ignore_blank_lines: bool,
) -> Vec<Vec<EditOp>> {
    let (changed1, changed2) = expand(compressed, lcs, ids1.len(), ids2.len());
    let ops = raw_ops(&changed1, &changed2, ids1, ids2, ignore_blank_lines);
    group_with_context(ops, context)
}
