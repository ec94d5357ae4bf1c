//! Filepath: src/format/text.rs
//! Classic and unified plain-text renderers.

use std::io::Write;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{DiffContext, Formatter, display_line, format_range_1based};
use crate::core::diff::ReportedOp;
use crate::core::line::OpKind;

/// Classic `diff` output: `NcM`/`NaM`/`NdM` range headers, `<`/`>`/`---`
/// line prefixes, SAME runs omitted entirely.
#[derive(Debug, Default)]
pub struct Normal;

impl Formatter for Normal {
    fn emit(&mut self, out: &mut dyn Write, hunks: &[Vec<ReportedOp>], ctx: &DiffContext) -> Result<()> {
        for hunk in hunks {
            for op in hunk {
                let edit = &op.edit;
                match edit.op {
                    OpKind::Same => {}
                    OpKind::Modify => {
                        writeln!(out, "{}c{}", format_range_1based(&edit.range1), format_range_1based(&edit.range2))?;
                        for i in edit.range1.clone() {
                            writeln!(out, "< {}", display_line(ctx.old_lines[i].as_bytes()))?;
                        }
                        writeln!(out, "---")?;
                        for i in edit.range2.clone() {
                            writeln!(out, "> {}", display_line(ctx.new_lines[i].as_bytes()))?;
                        }
                    }
                    OpKind::Remove => {
                        writeln!(out, "{}d{}", format_range_1based(&edit.range1), edit.range2.start)?;
                        for i in edit.range1.clone() {
                            writeln!(out, "< {}", display_line(ctx.old_lines[i].as_bytes()))?;
                        }
                    }
                    OpKind::Insert => {
                        writeln!(out, "{}a{}", edit.range1.start, format_range_1based(&edit.range2))?;
                        for i in edit.range2.clone() {
                            writeln!(out, "> {}", display_line(ctx.new_lines[i].as_bytes()))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Wrap a line's changed byte spans inline: `[-removed-]` / `{+inserted+}`
/// when color is disabled, ANSI red/green spans when enabled.
fn wrap_spans(text: &str, bytes: &[u8], spans: &[std::ops::Range<usize>], color: bool, is_removed: bool) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + spans.len() * 4);
    let mut pos = 0;
    for span in spans {
        let lossy_before = String::from_utf8_lossy(&bytes[pos..span.start]);
        out.push_str(&lossy_before);
        let lossy_span = String::from_utf8_lossy(&bytes[span.start..span.end]);
        if color {
            if is_removed {
                out.push_str(&lossy_span.red().to_string());
            } else {
                out.push_str(&lossy_span.green().to_string());
            }
        } else if is_removed {
            out.push_str("[-");
            out.push_str(&lossy_span);
            out.push_str("-]");
        } else {
            out.push_str("{+");
            out.push_str(&lossy_span);
            out.push_str("+}");
        }
        pos = span.end;
    }
    out.push_str(&String::from_utf8_lossy(&bytes[pos..]));
    out
}

/// Unified `diff -u` output: `@@ -l,n +l,n @@` hunk headers, ` `/`-`/`+`
/// prefixes, with intra-line spans marked inline on MODIFY lines.
#[derive(Debug, Default)]
pub struct Unified;

impl Formatter for Unified {
    fn emit(&mut self, out: &mut dyn Write, hunks: &[Vec<ReportedOp>], ctx: &DiffContext) -> Result<()> {
        if hunks.is_empty() {
            return Ok(());
        }
        writeln!(out, "--- {}", ctx.old_name)?;
        writeln!(out, "+++ {}", ctx.new_name)?;

        for hunk in hunks {
            let Some(first) = hunk.first() else { continue };
            let Some(last) = hunk.last() else { continue };
            let l1 = first.edit.range1.start + 1;
            let n1 = last.edit.range1.end - first.edit.range1.start;
            let l2 = first.edit.range2.start + 1;
            let n2 = last.edit.range2.end - first.edit.range2.start;
            writeln!(out, "@@ -{l1},{n1} +{l2},{n2} @@")?;

            for op in hunk {
                let edit = &op.edit;
                match edit.op {
                    OpKind::Same => {
                        for i in edit.range1.clone() {
                            writeln!(out, " {}", display_line(ctx.old_lines[i].as_bytes()))?;
                        }
                    }
                    OpKind::Remove => {
                        for i in edit.range1.clone() {
                            writeln!(out, "-{}", display_line(ctx.old_lines[i].as_bytes()))?;
                        }
                    }
                    OpKind::Insert => {
                        for i in edit.range2.clone() {
                            writeln!(out, "+{}", display_line(ctx.new_lines[i].as_bytes()))?;
                        }
                    }
                    OpKind::Modify => {
                        for (k, i) in edit.range1.clone().enumerate() {
                            let bytes = ctx.old_lines[i].as_bytes();
                            let text = display_line(bytes);
                            let spans = op.intraline.get(k).map(|d| d.removed.as_slice()).unwrap_or(&[]);
                            writeln!(out, "-{}", wrap_spans(&text, bytes, spans, ctx.color, true))?;
                        }
                        for (k, i) in edit.range2.clone().enumerate() {
                            let bytes = ctx.new_lines[i].as_bytes();
                            let text = display_line(bytes);
                            let spans = op.intraline.get(k).map(|d| d.inserted.as_slice()).unwrap_or(&[]);
                            writeln!(out, "+{}", wrap_spans(&text, bytes, spans, ctx.color, false))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
