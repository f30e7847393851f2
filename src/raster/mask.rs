//! Owned boolean raster (row-major, stride == width).
//!
//! Scans arrive as occupancy masks. [`Mask::support_gate`] derives the
//! local-density gate used by the hard accumulation pass: a cell survives
//! when it is occupied and enough other occupied cells surround it.
use super::traits::RasterView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    /// Mask width in cells
    pub w: usize,
    /// Mask height in cells
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<bool>,
}

impl Mask {
    /// All-false mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)]
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Occupied cells with at least `min_support` other occupied cells inside
    /// the `(2 * radius + 1)²` window around them (window clipped to the mask).
    pub fn support_gate(&self, radius: usize, min_support: usize) -> Mask {
        let table = SummedArea::new(self);
        Mask::from_fn(self.w, self.h, |x, y| {
            if !self.get(x, y) {
                return false;
            }
            let x0 = x.saturating_sub(radius);
            let y0 = y.saturating_sub(radius);
            let x1 = (x + radius + 1).min(self.w);
            let y1 = (y + radius + 1).min(self.h);
            let others = table.sum(x0, y0, x1, y1) - 1;
            others as usize >= min_support
        })
    }
}

impl RasterView for Mask {
    type Pixel = bool;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

/// Summed-area table over the occupied cells of a mask.
struct SummedArea {
    stride: usize,
    sums: Vec<u32>,
}

impl SummedArea {
    fn new(mask: &Mask) -> Self {
        let stride = mask.w + 1;
        let mut sums = vec![0u32; stride * (mask.h + 1)];
        for (y, row) in mask.rows().enumerate() {
            let mut running = 0u32;
            for (x, &occupied) in row.iter().enumerate() {
                running += occupied as u32;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + running;
            }
        }
        Self { stride, sums }
    }

    /// Occupied count over the half-open window `[x0, x1) × [y0, y1)`.
    fn sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let s = self.stride;
        self.sums[y1 * s + x1] + self.sums[y0 * s + x0]
            - self.sums[y0 * s + x1]
            - self.sums[y1 * s + x0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.len());
        Mask::from_fn(w, h, |x, y| rows[y].as_bytes()[x] == b'#')
    }

    #[test]
    fn support_gate_drops_isolated_pixels() {
        let mask = mask_from_rows(&[
            "#......", //
            ".......", //
            ".......", //
            "....##.", //
        ]);
        let gated = mask.support_gate(1, 1);
        assert!(!gated.get(0, 0), "isolated pixel must not pass");
        assert!(gated.get(4, 3));
        assert!(gated.get(5, 3));
        assert_eq!(gated.count_ones(), 2);
    }

    #[test]
    fn support_gate_window_reaches_radius() {
        let mask = mask_from_rows(&["#..#"]);
        assert_eq!(mask.support_gate(2, 1).count_ones(), 0);
        assert_eq!(mask.support_gate(3, 1).count_ones(), 2);
    }

    #[test]
    fn zero_support_keeps_every_occupied_cell() {
        let mask = mask_from_rows(&["#.#", "...", "..#"]);
        assert_eq!(mask.support_gate(0, 0), mask);
    }

    #[test]
    fn support_gate_counts_against_threshold() {
        let mask = mask_from_rows(&["###", "###", "###"]);
        let gated = mask.support_gate(1, 5);
        // Corners see 3 others, edges 5, the centre 8.
        assert!(!gated.get(0, 0));
        assert!(gated.get(1, 0));
        assert!(gated.get(1, 1));
        assert_eq!(gated.count_ones(), 5);
    }
}
