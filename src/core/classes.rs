//! Filepath: src/core/classes.rs
//! Equivalence-class builder (spec.md §4.3): assigns a small positive
//! integer identifier to each distinct line, shared across both sides, so
//! the LCS engine can work over identifiers instead of byte slices.

use crate::core::compare::{equal, hash};
use crate::core::line::Line;
use crate::core::options::ComparisonOptions;

/// Open-addressing bucket table mapping `hash & (capacity - 1)` to a chain
/// of candidate identifiers, confirmed with `equal` on collision.
struct ClassTable<'a> {
    opts: ComparisonOptions,
    buckets: Vec<Vec<u32>>,
    mask: usize,
    /// Representative bytes for each assigned identifier, `reps[id - 1]`.
    reps: Vec<&'a [u8]>,
}

impl<'a> ClassTable<'a> {
    fn with_capacity_hint(total_lines: usize) -> Self {
        let min_capacity = (2 * total_lines.max(1)).next_power_of_two();
        Self {
            opts: ComparisonOptions::default(),
            buckets: vec![Vec::new(); min_capacity],
            mask: min_capacity - 1,
            reps: Vec::with_capacity(total_lines),
        }
    }

    /// Returns the identifier for `bytes`, assigning a fresh one if this is
    /// the first line equivalent to it seen so far.
    fn intern(&mut self, bytes: &'a [u8]) -> u32 {
        let h = hash(bytes, &self.opts);
        let slot = (h as usize) & self.mask;
        for &id in &self.buckets[slot] {
            if equal(self.reps[(id - 1) as usize], bytes, &self.opts) {
                return id;
            }
        }
        self.reps.push(bytes);
        let id = self.reps.len() as u32;
        self.buckets[slot].push(id);
        id
    }
}

/// The result of classifying both line arrays: per-line identifiers and the
/// largest identifier assigned (0 if both sides were empty).
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub ids1: Vec<u32>,
    pub ids2: Vec<u32>,
    pub max_id: u32,
}

/// Assign equivalence-class identifiers to every line of both sides.
///
/// When `opts.ignore_blank_lines` is set, every blank line (zero bytes) on
/// either side is pre-seeded to identifier 0 rather than interned normally,
/// so all blank lines compare equal to each other and are excluded from
/// change reporting downstream (spec.md §3, Line identifier).
#[must_use]
pub fn classify<'a>(
    lines1: &[Line<'a>],
    lines2: &[Line<'a>],
    opts: &ComparisonOptions,
) -> Classification {
    let mut table = ClassTable::with_capacity_hint(lines1.len() + lines2.len());
    table.opts = *opts;

    let assign = |table: &mut ClassTable<'a>, line: &Line<'a>| -> u32 {
        if opts.ignore_blank_lines && line.is_empty() {
            return 0;
        }
        table.intern(line.as_bytes())
    };

    let ids1: Vec<u32> = lines1.iter().map(|l| assign(&mut table, l)).collect();
    let ids2: Vec<u32> = lines2.iter().map(|l| assign(&mut table, l)).collect();
    let max_id = table.reps.len() as u32;

    Classification { ids1, ids2, max_id }
}
