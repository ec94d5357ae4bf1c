//! Filepath: src/core/diff.rs
//! Top-level orchestrator wiring the eight core components into a single
//! entry point: two line arrays plus [`ComparisonOptions`] and a context
//! window go in, context-windowed hunks of edit operations (each carrying
//! intra-line detail for MODIFY lines) come out.

use crate::core::classes;
use crate::core::compress;
use crate::core::intraline::{self, IntraLineDiff};
use crate::core::lcs;
use crate::core::line::{EditOp, Line, OpKind};
use crate::core::options::ComparisonOptions;
use crate::core::report;
use crate::core::shift;

/// One edit operation plus, for MODIFY, the intra-line spans that differ
/// within each paired line.
#[derive(Debug, Clone)]
pub struct ReportedOp {
    pub edit: EditOp,
    pub intraline: Vec<IntraLineDiff>,
}

/// Diff two line arrays under `opts`, grouping the result into hunks that
/// keep up to `context` lines of unchanged surrounding content.
#[must_use]
pub fn diff(lines1: &[Line<'_>], lines2: &[Line<'_>], opts: &ComparisonOptions, context: usize) -> Vec<Vec<ReportedOp>> {
    let classification = classes::classify(lines1, lines2, opts);
    let compressed = compress::compress(&classification.ids1, &classification.ids2);

    let mut lcs_result = lcs::diff(&compressed.mid1, &compressed.mid2);
    shift::shift_boundaries(&mut lcs_result.changed1, &compressed.mid1, &shift::nil_score);
    shift::shift_boundaries(&mut lcs_result.changed2, &compressed.mid2, &shift::nil_score);

    let hunks = report::report(
        &compressed,
        &lcs_result,
        &classification.ids1,
        &classification.ids2,
        context,
        opts.ignore_blank_lines,
    );

    hunks
        .into_iter()
        .map(|hunk| {
            hunk.into_iter()
                .map(|edit| {
                    let intraline = if edit.op == OpKind::Modify {
                        intraline::diff_modify_block(&lines1[edit.range1.clone()], &lines2[edit.range2.clone()], opts)
                    } else {
                        Vec::new()
                    };
                    ReportedOp { edit, intraline }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines<'a>(s: &'a [&'a str]) -> Vec<Line<'a>> {
        s.iter().map(|l| Line::new(l.as_bytes())).collect()
    }

    fn kinds(hunks: &[Vec<ReportedOp>]) -> Vec<OpKind> {
        hunks.iter().flat_map(|h| h.iter().map(|o| o.edit.op)).collect()
    }

    #[test]
    fn identical_inputs_yield_no_hunks() {
        let a = lines(&["one", "two", "three"]);
        let hunks = diff(&a, &a, &ComparisonOptions::default(), 3);
        assert!(hunks.is_empty());
    }

    #[test]
    fn pure_insertion() {
        let a = lines(&["one", "three"]);
        let b = lines(&["one", "two", "three"]);
        let hunks = diff(&a, &b, &ComparisonOptions::default(), 3);
        assert_eq!(kinds(&hunks), vec![OpKind::Same, OpKind::Insert, OpKind::Same]);
    }

    #[test]
    fn pure_removal() {
        let a = lines(&["one", "two", "three"]);
        let b = lines(&["one", "three"]);
        let hunks = diff(&a, &b, &ComparisonOptions::default(), 3);
        assert_eq!(kinds(&hunks), vec![OpKind::Same, OpKind::Remove, OpKind::Same]);
    }

    #[test]
    fn modify_carries_intraline_detail() {
        let a = lines(&["the cat sat"]);
        let b = lines(&["the dog sat"]);
        let hunks = diff(&a, &b, &ComparisonOptions::default(), 1);
        assert_eq!(hunks.len(), 1);
        let op = &hunks[0][0];
        assert_eq!(op.edit.op, OpKind::Modify);
        assert_eq!(op.intraline.len(), 1);
        assert_eq!(op.intraline[0].removed, vec![4..7]);
    }

    #[test]
    fn blank_lines_are_excluded_from_change_reporting() {
        let opts = ComparisonOptions { ignore_blank_lines: true, ..Default::default() };
        let a = lines(&["", "one", ""]);
        let b = lines(&["one"]);
        let hunks = diff(&a, &b, &opts, 3);
        // every remaining blank line on either side collapses to identifier
        // 0 and therefore compares equal; no hunk should appear at all.
        assert!(hunks.is_empty());
    }

    #[test]
    fn ignore_case_makes_differing_casing_equal() {
        let opts = ComparisonOptions { ignore_case: true, ..Default::default() };
        let a = lines(&["Hello"]);
        let b = lines(&["hello"]);
        let hunks = diff(&a, &b, &opts, 3);
        assert!(hunks.is_empty());
    }

    #[test]
    fn swapping_inputs_swaps_insert_and_remove() {
        let a = lines(&["one", "three"]);
        let b = lines(&["one", "two", "three"]);
        let forward = diff(&a, &b, &ComparisonOptions::default(), 3);
        let backward = diff(&b, &a, &ComparisonOptions::default(), 3);

        let forward_ops: Vec<EditOp> = forward.into_iter().flatten().map(|o| o.edit).collect();
        let backward_ops: Vec<EditOp> = backward.into_iter().flatten().map(|o| o.edit).collect();

        assert_eq!(forward_ops.len(), backward_ops.len());
        for (f, rev) in forward_ops.iter().zip(backward_ops.iter()) {
            assert_eq!(*f, rev.swapped());
        }
    }
}
