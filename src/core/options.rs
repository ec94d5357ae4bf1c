//! Filepath: src/core/options.rs
//! Comparison options for the line-diff engine.
//!
//! These flags are independent and may be combined freely; `compare::equal`
//! and `compare::hash` both switch on the same options, and the two must stay
//! mutually consistent (equal lines always hash equal).

/// A closed set of independent comparison flags (spec.md §3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComparisonOptions {
    /// Treat ASCII or Unicode letters case-insensitively.
    pub ignore_case: bool,

    /// Collapse runs of whitespace to a single space; ignore leading/trailing
    /// whitespace.
    pub ignore_space_change: bool,

    /// Remove all whitespace before comparing.
    pub ignore_all_space: bool,

    /// Lines whose bytes are empty get identifier 0 and are excluded from
    /// change reporting.
    pub ignore_blank_lines: bool,

    /// Use Unicode-aware whitespace/case tables instead of ASCII byte-level
    /// semantics.
    pub unicode: bool,
}

impl ComparisonOptions {
    /// Returns true if any whitespace-related option is active.
    #[must_use]
    pub fn ignores_whitespace(&self) -> bool {
        self.ignore_space_change || self.ignore_all_space
    }
}
