//! Filepath: src/core/compare.rs
//! Line comparator and hasher (spec.md §4.1).
//!
//! `equal` and `hash` must stay mutually consistent: `equal(a, b, opts)`
//! implies `hash(a, opts) == hash(b, opts)`. Every other component trusts
//! this invariant (the equivalence-class builder uses `hash` to find
//! candidate buckets and `equal` to confirm membership).

use crate::core::options::ComparisonOptions;
use crate::core::runes::decode_one;

/// Running CRC-32C state with a one-slot checkpoint, used to implement the
/// "trailing whitespace run is never hashed" rule for `ignore_space_change`
/// without look-ahead: push the run optimistically, remember the state from
/// before, and roll back if end-of-line is reached while still inside it.
struct RollingHash {
    state: u32,
    checkpoint: Option<u32>,
}

impl RollingHash {
    fn new() -> Self {
        Self { state: 0, checkpoint: None }
    }

    fn push_byte(&mut self, b: u8) {
        self.state = crc32c::crc32c_append(self.state, &[b]);
    }

    /// Hash one normalized code point byte-by-byte from low to high,
    /// stopping at the first zero byte (spec.md §4.1).
    fn push_code(&mut self, code: u32) {
        for b in code.to_le_bytes() {
            if b == 0 {
                break;
            }
            self.push_byte(b);
        }
    }

    fn mark_checkpoint(&mut self) {
        self.checkpoint = Some(self.state);
    }

    fn commit_checkpoint(&mut self) {
        self.checkpoint = None;
    }

    fn rollback_to_checkpoint(&mut self) {
        if let Some(c) = self.checkpoint.take() {
            self.state = c;
        }
    }

    fn finish(self) -> u32 {
        self.state
    }
}

fn is_space(code: u32, unicode: bool) -> bool {
    if unicode {
        char::from_u32(code).is_some_and(char::is_whitespace)
    } else {
        u8::try_from(code).is_ok_and(|b| b.is_ascii_whitespace())
    }
}

fn fold(code: u32, opts: &ComparisonOptions) -> u32 {
    if !opts.ignore_case {
        return code;
    }
    if code < 0x80 {
        return u32::from((code as u8).to_ascii_lowercase());
    }
    if !opts.unicode {
        return code;
    }
    char::from_u32(code).and_then(|c| c.to_lowercase().next()).map_or(code, |c| c as u32)
}

/// Iterate the decoded, case-folded codes of a line.
fn codes<'a>(bytes: &'a [u8], opts: &'a ComparisonOptions) -> impl Iterator<Item = u32> + 'a {
    let mut pos = 0;
    std::iter::from_fn(move || {
        if pos >= bytes.len() {
            return None;
        }
        let (code, consumed) = decode_one(&bytes[pos..], opts.unicode);
        pos += consumed.max(1);
        Some(fold(code, opts))
    })
}

/// Build the normalized code sequence for `ignore_space_change`: leading and
/// trailing whitespace dropped, internal whitespace runs collapsed to a
/// single space marker.
fn normalize_space_change(bytes: &[u8], opts: &ComparisonOptions) -> Vec<u32> {
    let all: Vec<u32> = codes(bytes, opts).collect();
    let start = all.iter().position(|&c| !is_space(c, opts.unicode)).unwrap_or(all.len());
    let end = all.iter().rposition(|&c| !is_space(c, opts.unicode)).map_or(start, |i| i + 1);
    let mut out = Vec::with_capacity(end - start);
    let mut i = start;
    while i < end {
        let c = all[i];
        if is_space(c, opts.unicode) {
            out.push(u32::from(b' '));
            while i < end && is_space(all[i], opts.unicode) {
                i += 1;
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

/// Determine whether two lines are equivalent under `opts`.
#[must_use]
pub fn equal(a: &[u8], b: &[u8], opts: &ComparisonOptions) -> bool {
    if opts.ignore_all_space {
        let mut ia = codes(a, opts).filter(|&c| !is_space(c, opts.unicode));
        let mut ib = codes(b, opts).filter(|&c| !is_space(c, opts.unicode));
        loop {
            match (ia.next(), ib.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => continue,
                _ => return false,
            }
        }
    }

    if opts.ignore_space_change {
        return normalize_space_change(a, opts) == normalize_space_change(b, opts);
    }

    if opts.ignore_case {
        // Byte length is the equality gate; per-code-point decoding still
        // advances independently on each side (spec.md §4.1).
        if a.len() != b.len() {
            return false;
        }
        let mut ia = codes(a, opts);
        let mut ib = codes(b, opts);
        loop {
            match (ia.next(), ib.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => continue,
                _ => return false,
            }
        }
    }

    a == b
}

/// Compute a 32-bit hash consistent with `equal` under the same `opts`.
#[must_use]
pub fn hash(bytes: &[u8], opts: &ComparisonOptions) -> u32 {
    if !opts.ignore_all_space && !opts.ignore_space_change && !opts.ignore_case {
        return crc32c::crc32c(bytes);
    }

    let mut h = RollingHash::new();

    if opts.ignore_all_space {
        for c in codes(bytes, opts) {
            if !is_space(c, opts.unicode) {
                h.push_code(c);
            }
        }
        return h.finish();
    }

    if opts.ignore_space_change {
        let mut in_space_run = false;
        for c in codes(bytes, opts) {
            if is_space(c, opts.unicode) {
                if !in_space_run {
                    h.mark_checkpoint();
                    h.push_byte(b' ');
                    in_space_run = true;
                }
                // Subsequent whitespace in the same run contributes nothing
                // further; the checkpoint already covers "before this run".
            } else {
                h.commit_checkpoint();
                in_space_run = false;
                h.push_code(c);
            }
        }
        if in_space_run {
            // The line ended inside a whitespace run: that run was trailing,
            // so undo having hashed its leading space.
            h.rollback_to_checkpoint();
        }
        return h.finish();
    }

    // ignore_case only.
    for c in codes(bytes, opts) {
        h.push_code(c);
    }
    h.finish()
}
