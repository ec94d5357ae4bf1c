//! Filepath: src/format/mod.rs
//! Report formatters (spec.md §4.13 SUPPLEMENT): render a diffed file pair's
//! hunks into one of four textual shapes. The core never imports this
//! module; formatters depend only on the core's output types.

pub mod html;
pub mod text;

use std::io::Write;

use anyhow::Result;

use crate::core::diff::ReportedOp;
use crate::core::line::Line;

/// Everything a formatter needs besides the hunks themselves: the two file
/// names to print in headers, the full line arrays to pull rendered content
/// from (hunks only carry indices), and whether ANSI color is enabled.
pub struct DiffContext<'a> {
    pub old_name: &'a str,
    pub new_name: &'a str,
    pub old_lines: &'a [Line<'a>],
    pub new_lines: &'a [Line<'a>],
    pub color: bool,
}

/// One renderer kind. `emit` writes into the caller-provided sink rather
/// than owning one itself, so a worker can render into a local buffer
/// before taking the shared output lock (spec.md §4.12, §9 polymorphic
/// sink design note).
pub trait Formatter {
    fn emit(&mut self, out: &mut dyn Write, hunks: &[Vec<ReportedOp>], ctx: &DiffContext) -> Result<()>;
}

/// Lossy-decode a line's bytes for display; diff content is not guaranteed
/// valid UTF-8, but a terminal/HTML report has to print *something*.
pub(crate) fn display_line(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

pub(crate) fn format_range_1based(range: &std::ops::Range<usize>) -> String {
    let start = range.start + 1;
    let end = range.end;
    if start >= end { format!("{start}") } else { format!("{start},{end}") }
}
