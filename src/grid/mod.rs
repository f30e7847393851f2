//! Dense evidence grid over the floor plan.
//!
//! Overview
//! - One cell per floor-plan cell, stored row-major in a flat `Vec`.
//! - Two cell kinds share the layout: [`HardCell`] (owners + incident, scalar
//!   weight, nearest distance) and [`SoftCell`] (incident + parallel soft
//!   weights). A grid holds exactly one kind.
//! - Population is row-oriented. Each row walks the candidates in input
//!   order, so the per-cell order of contributor indices is candidate order
//!   regardless of how rows are scheduled. With the `parallel` feature rows
//!   are filled concurrently.
//!
//! Modules
//! - `cell` – the two cell kinds.
//! - `hard` – hard ownership accumulation with the density and floor-plan gates.
//! - `soft` – Gaussian soft-assignment accumulation.

mod cell;
mod hard;
mod soft;

pub use cell::{EvidenceCell, HardCell, SoftCell};
pub use soft::gaussian_weight;

use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Row-major grid of evidence cells.
#[derive(Clone, Debug)]
pub struct EvidenceGrid<C> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

pub type HardEvidenceGrid = EvidenceGrid<HardCell>;
pub type SoftEvidenceGrid = EvidenceGrid<SoftCell>;

/// Counters collected while populating a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    pub width: usize,
    pub height: usize,
    pub candidates: usize,
    /// Total (cell, candidate) writes.
    pub writes: usize,
    /// Cells that received at least one write.
    pub cells_touched: usize,
}

impl<C: EvidenceCell> EvidenceGrid<C> {
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        cells.resize_with(width * height, C::default);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &C {
        &self.cells[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[C] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    /// Cells with at least one contributor.
    pub fn touched(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Fill every row with `fill(y, row)`; returns the summed write count.
    fn fill_rows<F>(&mut self, fill: F) -> usize
    where
        F: Fn(usize, &mut [C]) -> usize + Sync,
    {
        if self.width == 0 {
            return 0;
        }
        #[cfg(feature = "parallel")]
        {
            self.cells
                .par_chunks_mut(self.width)
                .enumerate()
                .map(|(y, row)| fill(y, row))
                .sum()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.cells
                .chunks_mut(self.width)
                .enumerate()
                .map(|(y, row)| fill(y, row))
                .sum()
        }
    }

    fn stats(&self, candidates: usize, writes: usize) -> GridStats {
        GridStats {
            width: self.width,
            height: self.height,
            candidates,
            writes,
            cells_touched: self.touched(),
        }
    }
}

/// Raster column range `i` such that `i + offset` lands in `[0, width)`.
#[inline]
fn clipped_columns(raster_width: usize, offset: i64, width: usize) -> std::ops::Range<usize> {
    let start = (-offset).max(0) as usize;
    let end = (width as i64 - offset).clamp(0, raster_width as i64) as usize;
    start.min(end)..end
}

/// Raster row mapping onto floor-plan row `y`, if any.
#[inline]
fn raster_row(y: usize, offset: i64, raster_height: usize) -> Option<usize> {
    let j = y as i64 - offset;
    (j >= 0 && (j as usize) < raster_height).then_some(j as usize)
}
