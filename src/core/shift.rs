//! Filepath: src/core/shift.rs
//! Boundary shifter (spec.md §4.6). The LCS engine picks *a* minimal edit
//! script, but when a changed run sits next to repeated elements, other
//! equally-minimal alignments exist; this pass slides each changed run
//! along those repeats to produce the most readable placement.
//!
//! A run can be shifted earlier as long as the element leaving its tail
//! equals the element now entering its head (and vice versa for shifting
//! later) — sliding it never changes which elements are reported changed,
//! only where the boundary falls. Decision order, applied per run:
//!
//! 1. If shifting all the way up (`up`) merges this run with the previous
//!    changed run, or reaches the start of the array, do that and restart
//!    the scan at the merged run's start (it may merge further still).
//! 2. Otherwise, if shifting all the way down (`down`) merges with the next
//!    changed run, or reaches the end of the array, do that.
//! 3. Otherwise, pick the offset in `[-up, down]` that maximizes `score` at
//!    both boundaries of the shifted run; ties prefer the smallest absolute
//!    offset, further ties prefer offset 0.
//! 4. Otherwise, no shift.

/// Constant zero score: used for the line-level pass, where only the merge
/// rules (1-2) matter and rule 3 degenerates to "no preference, keep 0".
#[must_use]
pub fn nil_score(_id: i64) -> i32 {
    0
}

/// Intra-line boundary score: favors landing on whitespace, then on
/// bracket/quote characters, over landing mid-word (spec.md §4.6, §4.8).
#[must_use]
pub fn rune_score(code: i64) -> i32 {
    let Ok(code) = u32::try_from(code) else { return 0 };
    match char::from_u32(code) {
        Some(c) if c.is_whitespace() => 100,
        Some(c) if "(){}[]<>\"'`".contains(c) => 40,
        _ => 0,
    }
}

/// Score a candidate window `[pos, pos+len)`: the sum of `score` applied to
/// the window's first and last elements (spec.md §4.6:
/// `score(data[start+off], data[end+off-1])`).
fn window_score(pos: usize, len: usize, ids: &[i64], score: &dyn Fn(i64) -> i32) -> i32 {
    score(ids[pos]) + score(ids[pos + len - 1])
}

/// Shift every maximal run of `true` in `changed` as far as the repeats in
/// `ids` allow, per the decision order above. `ids` and `changed` describe
/// the same single side.
pub fn shift_boundaries(changed: &mut [bool], ids: &[i64], score: &dyn Fn(i64) -> i32) {
    let n = changed.len();
    debug_assert_eq!(ids.len(), n);
    let mut i = 0;
    while i < n {
        if !changed[i] {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < n && changed[j] {
            j += 1;
        }
        let len = j - i;

        // Maximum legal upward shift: slide while the element leaving the
        // tail equals the element now entering the head.
        let mut lo = i;
        while lo > 0 && !changed[lo - 1] && ids[lo - 1] == ids[lo + len - 1] {
            lo -= 1;
        }
        // Maximum legal downward shift, symmetrically.
        let mut hi = i;
        while hi + len < n && !changed[hi + len] && ids[hi] == ids[hi + len] {
            hi += 1;
        }

        let up = i - lo;
        let down = hi - i;
        let up_merge = up > 0 && (lo == 0 || changed[lo - 1]);
        let down_merge = down > 0 && (hi + len == n || changed[hi + len]);

        let best = if up_merge {
            lo
        } else if down_merge {
            hi
        } else if up + down > 0 {
            // Search offsets in order of increasing absolute distance from
            // the original position, preferring 0 among ties; `>` (not
            // `>=`) keeps the first-seen (smallest-offset) winner on a tie.
            let mut best_pos = i;
            let mut best_score = window_score(i, len, ids, score);
            for dist in 1..=up.max(down) {
                if dist <= down {
                    let pos = i + dist;
                    let s = window_score(pos, len, ids, score);
                    if s > best_score {
                        best_score = s;
                        best_pos = pos;
                    }
                }
                if dist <= up {
                    let pos = i - dist;
                    let s = window_score(pos, len, ids, score);
                    if s > best_score {
                        best_score = s;
                        best_pos = pos;
                    }
                }
            }
            best_pos
        } else {
            i
        };

        if best != i {
            for k in i..j {
                changed[k] = false;
            }
            for k in best..best + len {
                changed[k] = true;
            }
        }

        i = if up_merge { best } else { best + len };
    }
}
