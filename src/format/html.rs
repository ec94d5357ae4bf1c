//! Filepath: src/format/html.rs
//! HTML renderers: a two-column side-by-side view and a single-column
//! unified view, both marking intra-line changes with `<ins>`/`<del>`
//! spans (spec.md §4.13 SUPPLEMENT).

use std::io::Write;

use anyhow::Result;

use super::{DiffContext, Formatter, format_range_1based};
use crate::core::diff::ReportedOp;
use crate::core::line::OpKind;

/// Minimal HTML escaping: the five characters that matter inside text nodes
/// and (double-quoted) attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a line's text with its changed byte spans wrapped in `<ins>`
/// (inserted side) or `<del>` (removed side).
fn render_spans(bytes: &[u8], spans: &[std::ops::Range<usize>], tag: &str) -> String {
    let text = String::from_utf8_lossy(bytes);
    if spans.is_empty() {
        return escape(&text);
    }
    let mut out = String::new();
    let mut pos = 0;
    for span in spans {
        out.push_str(&escape(&String::from_utf8_lossy(&bytes[pos..span.start])));
        out.push_str(&format!("<{tag}>"));
        out.push_str(&escape(&String::from_utf8_lossy(&bytes[span.start..span.end])));
        out.push_str(&format!("</{tag}>"));
        pos = span.end;
    }
    out.push_str(&escape(&String::from_utf8_lossy(&bytes[pos..])));
    out
}

/// Two-column HTML table: one row per aligned line or gap.
#[derive(Debug, Default)]
pub struct SideBySide;

impl Formatter for SideBySide {
    fn emit(&mut self, out: &mut dyn Write, hunks: &[Vec<ReportedOp>], ctx: &DiffContext) -> Result<()> {
        writeln!(out, "<table class=\"linediff side-by-side\">")?;
        writeln!(
            out,
            "<tr><th colspan=\"2\">{}</th><th colspan=\"2\">{}</th></tr>",
            escape(ctx.old_name),
            escape(ctx.new_name)
        )?;
        for hunk in hunks {
            writeln!(out, "<tr class=\"hunk\"><td colspan=\"4\">&hellip;</td></tr>")?;
            for op in hunk {
                let edit = &op.edit;
                let row_class = match edit.op {
                    OpKind::Same => "same",
                    OpKind::Modify => "modify",
                    OpKind::Remove => "remove",
                    OpKind::Insert => "insert",
                };
                let n = edit.range1.len().max(edit.range2.len());
                for k in 0..n {
                    let left = edit.range1.clone().nth(k);
                    let right = edit.range2.clone().nth(k);
                    writeln!(out, "<tr class=\"{row_class}\">")?;
                    if let Some(i) = left {
                        let bytes = ctx.old_lines[i].as_bytes();
                        let spans = op.intraline.get(k).map(|d| d.removed.as_slice()).unwrap_or(&[]);
                        writeln!(out, "<td class=\"num\">{}</td><td class=\"text\">{}</td>", i + 1, render_spans(bytes, spans, "del"))?;
                    } else {
                        writeln!(out, "<td class=\"num\"></td><td class=\"text\"></td>")?;
                    }
                    if let Some(i) = right {
                        let bytes = ctx.new_lines[i].as_bytes();
                        let spans = op.intraline.get(k).map(|d| d.inserted.as_slice()).unwrap_or(&[]);
                        writeln!(out, "<td class=\"num\">{}</td><td class=\"text\">{}</td>", i + 1, render_spans(bytes, spans, "ins"))?;
                    } else {
                        writeln!(out, "<td class=\"num\"></td><td class=\"text\"></td>")?;
                    }
                    writeln!(out, "</tr>")?;
                }
            }
        }
        writeln!(out, "</table>")?;
        Ok(())
    }
}

/// Single-column HTML analogue of the unified text format: same hunk
/// boundaries, one row per source line.
#[derive(Debug, Default)]
pub struct Unified;

impl Formatter for Unified {
    fn emit(&mut self, out: &mut dyn Write, hunks: &[Vec<ReportedOp>], ctx: &DiffContext) -> Result<()> {
        writeln!(out, "<table class=\"linediff unified\">")?;
        writeln!(out, "<tr><th colspan=\"2\">--- {}</th></tr>", escape(ctx.old_name))?;
        writeln!(out, "<tr><th colspan=\"2\">+++ {}</th></tr>", escape(ctx.new_name))?;

        for hunk in hunks {
            let Some(first) = hunk.first() else { continue };
            let Some(last) = hunk.last() else { continue };
            let l1 = format_range_1based(&(first.edit.range1.start..last.edit.range1.end));
            let l2 = format_range_1based(&(first.edit.range2.start..last.edit.range2.end));
            writeln!(out, "<tr class=\"hunk\"><td colspan=\"2\">@@ -{l1} +{l2} @@</td></tr>")?;

            for op in hunk {
                let edit = &op.edit;
                match edit.op {
                    OpKind::Same => {
                        for i in edit.range1.clone() {
                            writeln!(out, "<tr class=\"same\"><td class=\"marker\"> </td><td class=\"text\">{}</td></tr>", escape(&String::from_utf8_lossy(ctx.old_lines[i].as_bytes())))?;
                        }
                    }
                    OpKind::Remove => {
                        for i in edit.range1.clone() {
                            writeln!(out, "<tr class=\"remove\"><td class=\"marker\">-</td><td class=\"text\">{}</td></tr>", escape(&String::from_utf8_lossy(ctx.old_lines[i].as_bytes())))?;
                        }
                    }
                    OpKind::Insert => {
                        for i in edit.range2.clone() {
                            writeln!(out, "<tr class=\"insert\"><td class=\"marker\">+</td><td class=\"text\">{}</td></tr>", escape(&String::from_utf8_lossy(ctx.new_lines[i].as_bytes())))?;
                        }
                    }
                    OpKind::Modify => {
                        for (k, i) in edit.range1.clone().enumerate() {
                            let bytes = ctx.old_lines[i].as_bytes();
                            let spans = op.intraline.get(k).map(|d| d.removed.as_slice()).unwrap_or(&[]);
                            writeln!(out, "<tr class=\"remove\"><td class=\"marker\">-</td><td class=\"text\">{}</td></tr>", render_spans(bytes, spans, "del"))?;
                        }
                        for (k, i) in edit.range2.clone().enumerate() {
                            let bytes = ctx.new_lines[i].as_bytes();
                            let spans = op.intraline.get(k).map(|d| d.inserted.as_slice()).unwrap_or(&[]);
                            writeln!(out, "<tr class=\"insert\"><td class=\"marker\">+</td><td class=\"text\">{}</td></tr>", render_spans(bytes, spans, "ins"))?;
                        }
                    }
                }
            }
        }
        writeln!(out, "</table>")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diff::diff;
    use crate::core::line::Line;
    use crate::core::options::ComparisonOptions;

    fn lines<'a>(s: &'a [&'a str]) -> Vec<Line<'a>> {
        s.iter().map(|l| Line::new(l.as_bytes())).collect()
    }

    #[test]
    fn side_by_side_escapes_and_marks_spans() {
        let old = lines(&["the cat <sat>"]);
        let new = lines(&["the dog <sat>"]);
        let hunks = diff(&old, &new, &ComparisonOptions::default(), 3);
        let ctx = DiffContext { old_name: "old", new_name: "new", old_lines: &old, new_lines: &new, color: false };
        let mut buf = Vec::new();
        SideBySide.emit(&mut buf, &hunks, &ctx).unwrap();
        let rendered = String::from_utf8(buf).unwrap();
        assert!(rendered.contains("<del>cat</del>"));
        assert!(rendered.contains("<ins>dog</ins>"));
        assert!(rendered.contains("&lt;sat&gt;"));
    }

    #[test]
    fn unified_renders_hunk_header() {
        let old = lines(&["a", "b", "c"]);
        let new = lines(&["a", "x", "c"]);
        let hunks = diff(&old, &new, &ComparisonOptions::default(), 1);
        let ctx = DiffContext { old_name: "a", new_name: "b", old_lines: &old, new_lines: &new, color: false };
        let mut buf = Vec::new();
        Unified.emit(&mut buf, &hunks, &ctx).unwrap();
        let rendered = String::from_utf8(buf).unwrap();
        assert!(rendered.contains("@@ -1,3 +1,3 @@"));
    }
}
