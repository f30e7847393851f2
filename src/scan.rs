//! Scan rasters per `(color, rotation)` and the borrowed input bundle.
use crate::error::TermError;
use crate::raster::{Mask, RasterU8, RasterView};
use crate::types::Candidate;
use nalgebra::Vector2;

/// Occupancy raster of one scan variant at one rotation.
#[derive(Clone, Debug)]
pub struct ScanRaster {
    pub mask: Mask,
    /// Local origin of the raster; a candidate at `(x, y)` places this cell there.
    pub zero_zero: Vector2<i32>,
}

impl ScanRaster {
    pub fn new(mask: Mask, zero_zero: Vector2<i32>) -> Self {
        Self { mask, zero_zero }
    }

    /// Translation from raster coordinates to floor-plan coordinates.
    #[inline]
    pub fn offset_for(&self, candidate: &Candidate) -> (i64, i64) {
        (
            candidate.x as i64 - self.zero_zero.x as i64,
            candidate.y as i64 - self.zero_zero.y as i64,
        )
    }
}

/// Scans indexed by `[color][rotation]`.
#[derive(Clone, Debug, Default)]
pub struct ScanSet {
    scans: Vec<Vec<ScanRaster>>,
}

impl ScanSet {
    pub fn new(scans: Vec<Vec<ScanRaster>>) -> Self {
        Self { scans }
    }

    pub fn get(&self, color: usize, rotation: usize) -> Option<&ScanRaster> {
        self.scans.get(color)?.get(rotation)
    }
}

/// Everything the accumulation passes read. Nothing here is mutated.
#[derive(Clone, Copy, Debug)]
pub struct PlacementInputs<'a> {
    pub candidates: &'a [Candidate],
    pub scans: &'a ScanSet,
    pub floor_plan: RasterU8<'a>,
}

impl<'a> PlacementInputs<'a> {
    pub fn new(candidates: &'a [Candidate], scans: &'a ScanSet, floor_plan: RasterU8<'a>) -> Self {
        Self {
            candidates,
            scans,
            floor_plan,
        }
    }

    pub fn width(&self) -> usize {
        self.floor_plan.width()
    }

    pub fn height(&self) -> usize {
        self.floor_plan.height()
    }

    /// Scan raster for every candidate, in candidate order.
    pub fn resolve_scans(&self) -> Result<Vec<&'a ScanRaster>, TermError> {
        let scans: &'a ScanSet = self.scans;
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, c)| {
                scans
                    .get(c.color, c.rotation)
                    .ok_or(TermError::MissingScan {
                        candidate: index,
                        color: c.color,
                        rotation: c.rotation,
                    })
            })
            .collect()
    }
}
