//! I/O helpers for floor plans, heat maps and JSON.
//!
//! - `load_floor_plan`: read a PNG into an owned 8-bit gray buffer.
//! - `load_mask`: read a scan occupancy PNG (anything but white is occupied).
//! - `save_rgb_png`: write a rendered heat map to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Mask, RasterU8, FLOOR_PLAN_EMPTY};
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayRaster {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Uniform raster, handy for synthetic floor plans.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `RasterU8` view
    pub fn as_view(&self) -> RasterU8<'_> {
        RasterU8::new(self.width, self.height, &self.data)
    }
}

/// Load a floor plan from disk and convert to 8-bit grayscale.
pub fn load_floor_plan(path: &Path) -> Result<GrayRaster, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(GrayRaster::new(width, height, img.into_raw()))
}

/// Load a scan occupancy raster. White (`255`) cells are free.
pub fn load_mask(path: &Path) -> Result<Mask, String> {
    let gray = load_floor_plan(path)?;
    let w = gray.width;
    Ok(Mask::from_fn(gray.width, gray.height, |x, y| {
        gray.data[y * w + x] != FLOOR_PLAN_EMPTY
    }))
}

/// Save an RGB rendering (heat map, overlay) to a PNG.
pub fn save_rgb_png(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
