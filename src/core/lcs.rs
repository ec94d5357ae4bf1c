//! Filepath: src/core/lcs.rs
//! Myers O(ND) LCS engine (spec.md §4.5): linear-space divide-and-conquer
//! search for the longest common subsequence of two identifier arrays,
//! reported as a pair of "changed" bit arrays (true = not part of the LCS).
//!
//! The forward and backward D-path searches share a single work vector,
//! sized `4*(n+m+1)+4`, split into two halves addressed through signed
//! diagonal offsets (`down_off`/`up_off`). The vector is allocated once per
//! top-level call and reused by every recursive subproblem, since every
//! subproblem's diagonal range is a subset of the top-level range.

/// Bit arrays marking which elements of each side are not part of the LCS.
#[derive(Debug, Clone, Default)]
pub struct Lcs {
    pub changed1: Vec<bool>,
    pub changed2: Vec<bool>,
}

struct Ctx<'a> {
    a: &'a [i64],
    b: &'a [i64],
    down: Vec<i64>,
    up: Vec<i64>,
    off: i64,
}

impl<'a> Ctx<'a> {
    fn down_at(&self, k: i64) -> i64 {
        self.down[(self.off + k) as usize]
    }

    fn set_down(&mut self, k: i64, v: i64) {
        self.down[(self.off + k) as usize] = v;
    }

    fn up_at(&self, k: i64) -> i64 {
        self.up[(self.off + k) as usize]
    }

    fn set_up(&mut self, k: i64, v: i64) {
        self.up[(self.off + k) as usize] = v;
    }

    /// Find a middle snake of the edit graph for the box
    /// `[xoff, xlim) x [yoff, ylim)`, both non-empty. Returns the `(x, y)`
    /// point where the forward and backward searches meet.
    fn middle_snake(&mut self, xoff: i64, xlim: i64, yoff: i64, ylim: i64) -> (i64, i64) {
        let fmid = xoff - yoff;
        let bmid = xlim - ylim;
        let odd = (fmid - bmid) % 2 != 0;
        let dlo = xoff - ylim;
        let dhi = xlim - yoff;

        let mut fmin = fmid;
        let mut fmax = fmid;
        let mut bmin = bmid;
        let mut bmax = bmid;

        self.set_down(fmid, xoff);
        self.set_up(bmid, xlim);

        loop {
            if fmin > dlo {
                fmin -= 1;
            }
            if fmax < dhi {
                fmax += 1;
            }

            let mut d = fmax;
            while d >= fmin {
                let mut x = if d == fmin || (d != fmax && self.down_at(d - 1) < self.down_at(d + 1))
                {
                    self.down_at(d + 1)
                } else {
                    self.down_at(d - 1) + 1
                };
                let mut y = x - d;
                while x < xlim && y < ylim && self.a[x as usize] == self.b[y as usize] {
                    x += 1;
                    y += 1;
                }
                self.set_down(d, x);

                if odd && bmin <= d && d <= bmax && self.up_at(d) <= x {
                    return (x, y);
                }
                d -= 2;
            }

            if bmin > dlo {
                bmin -= 1;
            }
            if bmax < dhi {
                bmax += 1;
            }

            let mut d = bmax;
            while d >= bmin {
                let mut x = if d == bmax || (d != bmin && self.up_at(d - 1) < self.up_at(d + 1)) {
                    self.up_at(d - 1)
                } else {
                    self.up_at(d + 1) - 1
                };
                let mut y = x - d;
                while x > xoff && y > yoff && self.a[(x - 1) as usize] == self.b[(y - 1) as usize] {
                    x -= 1;
                    y -= 1;
                }
                self.set_up(d, x);

                if !odd && fmin <= d && d <= fmax && x <= self.down_at(d) {
                    return (x, y);
                }
                d -= 2;
            }
        }
    }

    fn compare(
        &mut self,
        mut xoff: i64,
        mut xlim: i64,
        mut yoff: i64,
        mut ylim: i64,
        changed1: &mut [bool],
        changed2: &mut [bool],
    ) {
        while xoff < xlim && yoff < ylim && self.a[xoff as usize] == self.b[yoff as usize] {
            xoff += 1;
            yoff += 1;
        }
        while xlim > xoff
            && ylim > yoff
            && self.a[(xlim - 1) as usize] == self.b[(ylim - 1) as usize]
        {
            xlim -= 1;
            ylim -= 1;
        }

        if xoff == xlim {
            for y in yoff..ylim {
                changed2[y as usize] = true;
            }
        } else if yoff == ylim {
            for x in xoff..xlim {
                changed1[x as usize] = true;
            }
        } else {
            let (x, y) = self.middle_snake(xoff, xlim, yoff, ylim);
            self.compare(xoff, x, yoff, y, changed1, changed2);
            self.compare(x, xlim, y, ylim, changed1, changed2);
        }
    }
}

/// Compute the minimal edit distance between `a` and `b`, expressed as
/// per-element "changed" flags on each side.
#[must_use]
pub fn diff(a: &[i64], b: &[i64]) -> Lcs {
    let n = a.len() as i64;
    let m = b.len() as i64;
    let off = n + m + 1;
    let half = (2 * off + 2) as usize;
    let work = vec![0i64; 4 * (n as usize + m as usize + 1) + 4];
    debug_assert!(work.len() >= 2 * half);
    let down = work[..half].to_vec();
    let up = work[half..2 * half].to_vec();

    let mut changed1 = vec![false; a.len()];
    let mut changed2 = vec![false; b.len()];
    let mut ctx = Ctx { a, b, down, up, off };
    ctx.compare(0, n, 0, m, &mut changed1, &mut changed2);

    Lcs { changed1, changed2 }
}
