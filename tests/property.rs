//! Property tests for the core diff pipeline's invariants (spec.md §8
//! SUPPLEMENT: equivalence-consistency and edit-script correctness hold for
//! arbitrary inputs, not just the handful of concrete scenarios above).

use linediff::core::diff::{self, ReportedOp};
use linediff::core::line::{Line, OpKind};
use linediff::core::options::ComparisonOptions;
use proptest::prelude::*;

fn to_lines<'a>(strs: &'a [String]) -> Vec<Line<'a>> {
    strs.iter().map(|s| Line::new(s.as_bytes())).collect()
}

fn flat_ops(hunks: &[Vec<ReportedOp>]) -> Vec<ReportedOp> {
    hunks.iter().flatten().cloned().collect()
}

/// Every line in both inputs is accounted for exactly once across the
/// returned edit operations, in order, with no gaps or overlaps.
fn ranges_cover_both_sides(ops: &[ReportedOp], len1: usize, len2: usize) {
    let mut next1 = 0usize;
    let mut next2 = 0usize;
    for op in ops {
        assert_eq!(op.edit.range1.start, next1, "range1 must start where the previous op left off");
        assert_eq!(op.edit.range2.start, next2, "range2 must start where the previous op left off");
        next1 = op.edit.range1.end;
        next2 = op.edit.range2.end;
    }
    assert_eq!(next1, len1);
    assert_eq!(next2, len2);
}

fn arb_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,6}"
}

fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_line(), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Diffing any input against itself never reports a change.
    #[test]
    fn identical_inputs_are_always_equal(a in arb_lines(), context in 0usize..5) {
        let lines = to_lines(&a);
        let hunks = diff::diff(&lines, &lines, &ComparisonOptions::default(), context);
        prop_assert!(hunks.is_empty());
    }

    /// The returned operations always partition both line arrays completely
    /// and in order, regardless of input or context window.
    #[test]
    fn edit_ops_fully_partition_both_inputs(a in arb_lines(), b in arb_lines(), context in 0usize..5) {
        let lines1 = to_lines(&a);
        let lines2 = to_lines(&b);
        let hunks = diff::diff(&lines1, &lines2, &ComparisonOptions::default(), context);
        let ops = flat_ops(&hunks);
        ranges_cover_both_sides(&ops, a.len(), b.len());
    }

    /// Swapping the two inputs swaps every INSERT/REMOVE and leaves
    /// SAME/MODIFY in place, with ranges exchanged (spec.md §8 symmetry).
    #[test]
    fn swapping_inputs_swaps_insert_and_remove(a in arb_lines(), b in arb_lines()) {
        let lines1 = to_lines(&a);
        let lines2 = to_lines(&b);
        let forward = flat_ops(&diff::diff(&lines1, &lines2, &ComparisonOptions::default(), 3));
        let backward = flat_ops(&diff::diff(&lines2, &lines1, &ComparisonOptions::default(), 3));

        prop_assert_eq!(forward.len(), backward.len());
        for (f, rev) in forward.iter().zip(backward.iter()) {
            prop_assert_eq!(f.edit.clone(), rev.edit.swapped());
        }
    }

    /// `ignore_case` never reports a MODIFY between two lines whose only
    /// difference is ASCII letter case.
    #[test]
    fn ignore_case_equates_case_only_variants(a in arb_line()) {
        let upper = a.to_ascii_uppercase();
        let lower = a.to_ascii_lowercase();
        let lines1 = [Line::new(upper.as_bytes())];
        let lines2 = [Line::new(lower.as_bytes())];
        let opts = ComparisonOptions { ignore_case: true, ..Default::default() };
        let hunks = diff::diff(&lines1, &lines2, &opts, 3);
        prop_assert!(hunks.is_empty());
    }

    /// No operation ever has an empty range on both sides: SAME/MODIFY are
    /// non-empty on both, REMOVE is empty only on side 2, INSERT only on
    /// side 1.
    #[test]
    fn ops_never_empty_on_both_sides(a in arb_lines(), b in arb_lines()) {
        let lines1 = to_lines(&a);
        let lines2 = to_lines(&b);
        let hunks = diff::diff(&lines1, &lines2, &ComparisonOptions::default(), 3);
        for op in flat_ops(&hunks) {
            match op.edit.op {
                OpKind::Same | OpKind::Modify => {
                    prop_assert!(!op.edit.range1.is_empty());
                    prop_assert!(!op.edit.range2.is_empty());
                }
                OpKind::Remove => {
                    prop_assert!(!op.edit.range1.is_empty());
                    prop_assert!(op.edit.range2.is_empty());
                }
                OpKind::Insert => {
                    prop_assert!(op.edit.range1.is_empty());
                    prop_assert!(!op.edit.range2.is_empty());
                }
            }
        }
    }
}
