//! Snapshot tests for the rendered report formatters, covering spec.md §8's
//! concrete scenarios end to end: insert at middle, modify with intraline
//! highlighting, ignore-case, ignore-space-change, and boundary-shift
//! merging. Each snapshot is reviewed once with `cargo insta review` and
//! then pinned; a regression in rendering shows up as a diff against the
//! pinned `.snap` file rather than a silent behavior change.

use linediff::core::diff::diff;
use linediff::core::line::Line;
use linediff::core::options::ComparisonOptions;
use linediff::format::{DiffContext, Formatter, html, text};

fn lines<'a>(s: &'a [&'a str]) -> Vec<Line<'a>> {
    s.iter().map(|l| Line::new(l.as_bytes())).collect()
}

fn render(mut formatter: impl Formatter, old: &[Line], new: &[Line], opts: &ComparisonOptions, context: usize) -> String {
    let hunks = diff(old, new, opts, context);
    let ctx = DiffContext { old_name: "old", new_name: "new", old_lines: old, new_lines: new, color: false };
    let mut buf = Vec::new();
    formatter.emit(&mut buf, &hunks, &ctx).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn normal_format_insert_at_middle() {
    let old = lines(&["a", "b", "c"]);
    let new = lines(&["a", "b", "x", "c"]);
    let rendered = render(text::Normal, &old, &new, &ComparisonOptions::default(), 3);
    insta::assert_snapshot!(rendered);
}

#[test]
fn unified_format_modify_with_intraline_highlight() {
    let old = lines(&["the cat sat on the mat"]);
    let new = lines(&["the dog sat on the rug"]);
    let rendered = render(text::Unified, &old, &new, &ComparisonOptions::default(), 3);
    insta::assert_snapshot!(rendered);
}

#[test]
fn unified_format_ignore_space_change() {
    let old = lines(&["one   two  three"]);
    let new = lines(&["one two three"]);
    let opts = ComparisonOptions { ignore_space_change: true, ..Default::default() };
    let rendered = render(text::Unified, &old, &new, &opts, 3);
    insta::assert_snapshot!(rendered);
}

#[test]
fn normal_format_boundary_shift_merges_adjacent_repeat() {
    // spec.md §8 scenario 5: the LCS could delete either "b" as a split
    // pair, but the shifter must land on a single contiguous REMOVE.
    let old = lines(&["a", "b", "b", "c"]);
    let new = lines(&["a", "c"]);
    let rendered = render(text::Normal, &old, &new, &ComparisonOptions::default(), 3);
    insta::assert_snapshot!(rendered);
}

#[test]
fn html_side_by_side_modify_block() {
    let old = lines(&["the cat sat"]);
    let new = lines(&["the dog sat"]);
    let rendered = render(html::SideBySide, &old, &new, &ComparisonOptions::default(), 3);
    insta::assert_snapshot!(rendered);
}

#[test]
fn html_unified_insert_and_remove() {
    // "xxxxx" shares no characters with "drop me", so the intra-line diff
    // highlights each paired line in full rather than a partial span.
    let old = lines(&["keep", "drop me"]);
    let new = lines(&["keep", "xxxxx"]);
    let rendered = render(html::Unified, &old, &new, &ComparisonOptions::default(), 3);
    insta::assert_snapshot!(rendered);
}
