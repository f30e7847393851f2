//! False-color renderings of grids and term tables for inspection.
//!
//! Values are standardised over the cells being drawn and mapped through a
//! blue -> green -> red ramp; cells without a value keep the floor-plan
//! shade. Rendering reads grids and tables, never changes them.
use crate::builder::TermParams;
use crate::error::TermError;
use crate::grid::HardEvidenceGrid;
use crate::raster::{RasterU8, RasterView};
use crate::scan::PlacementInputs;
use crate::terms::{sample_mean_sigma, HighOrderTable, MeanSigma};
use crate::types::CandidateIndex;
use image::{Rgb, RgbImage};

const OVERLAY: Rgb<u8> = Rgb([255, 0, 0]);

/// Ramp used by the heat maps: 0 is blue, 127 green, 255 red.
pub fn heat_color(gray: u8) -> Rgb<u8> {
    let gray = gray as i32;
    let (r, g, b) = if gray < 128 {
        let g = 2 * gray;
        (0, g, 255 - g)
    } else {
        let r = 2 * (gray - 128);
        (r, 255 - r, 0)
    };
    Rgb([r as u8, g as u8, b as u8])
}

/// Map a z-score onto the ramp: `-1 -> 0`, `0 -> 128`, `+1 -> 255`, saturating.
#[inline]
fn z_to_gray(z: f64) -> u8 {
    if z.is_nan() {
        return 128;
    }
    (255.0 * (z + 1.0) / 2.0).round().clamp(0.0, 255.0) as u8
}

/// Gray floor plan expanded to RGB.
pub fn floor_plan_rgb<R: RasterView<Pixel = u8>>(floor_plan: &R) -> RgbImage {
    let mut out = RgbImage::new(floor_plan.width() as u32, floor_plan.height() as u32);
    for (y, row) in floor_plan.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Rgb([v, v, v]));
        }
    }
    out
}

/// Heat map of the derived per-cell weights (owned, non-zero cells only).
pub fn render_cell_heatmap(
    grid: &HardEvidenceGrid,
    floor_plan: RasterU8<'_>,
    params: &TermParams,
) -> RgbImage {
    let values = |x: usize, y: usize| {
        grid.get(x, y)
            .derived_weight(params)
            .filter(|w| *w != 0.0)
    };
    paint(grid, floor_plan, values)
}

/// Heat map of the table weight assigned to each owned cell's incident key.
pub fn render_term_heatmap(
    grid: &HardEvidenceGrid,
    table: &HighOrderTable,
    floor_plan: RasterU8<'_>,
) -> RgbImage {
    let values = |x: usize, y: usize| {
        let cell = grid.get(x, y);
        if cell.count() == 0 || cell.incident.is_empty() {
            return None;
        }
        table.get(&cell.incident).map(|e| e.w)
    };
    paint(grid, floor_plan, values)
}

/// Floor plan with every scan of the key's candidates painted red.
pub fn render_term_overlay(
    key: &[CandidateIndex],
    inputs: &PlacementInputs<'_>,
) -> Result<RgbImage, TermError> {
    let scans = inputs.resolve_scans()?;
    let plan = inputs.floor_plan;
    let mut out = floor_plan_rgb(&plan);
    for &a in key {
        let (Some(candidate), Some(scan)) = (inputs.candidates.get(a), scans.get(a)) else {
            continue;
        };
        let (x_off, y_off) = scan.offset_for(candidate);
        for (j, row) in scan.mask.rows().enumerate() {
            let y = j as i64 + y_off;
            for (i, _) in row.iter().enumerate().filter(|(_, occupied)| **occupied) {
                let x = i as i64 + x_off;
                if plan.get_checked(x, y).is_some() {
                    out.put_pixel(x as u32, y as u32, OVERLAY);
                }
            }
        }
    }
    Ok(out)
}

fn paint<F>(grid: &HardEvidenceGrid, floor_plan: RasterU8<'_>, value_at: F) -> RgbImage
where
    F: Fn(usize, usize) -> Option<f64>,
{
    let mut out = floor_plan_rgb(&floor_plan);
    let (w, h) = (grid.width().min(floor_plan.w), grid.height().min(floor_plan.h));
    let coords = move || (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)));
    let dist = standardiser(coords().filter_map(|(x, y)| value_at(x, y)).collect());
    for (x, y) in coords() {
        if let Some(v) = value_at(x, y) {
            out.put_pixel(x as u32, y as u32, heat_color(z_to_gray(dist.z_score(v))));
        }
    }
    out
}

/// Sample statistics of `values`, falling back to unit spread when undefined.
fn standardiser(values: Vec<f64>) -> MeanSigma {
    match sample_mean_sigma(values.iter().copied()) {
        Some(s) if s.is_usable() => s,
        _ => {
            let mean = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            MeanSigma { mean, sigma: 1.0 }
        }
    }
}
