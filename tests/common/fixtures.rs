#![allow(dead_code)]

use high_order_terms::raster::io::GrayRaster;
use high_order_terms::raster::Mask;
use high_order_terms::scan::ScanRaster;
use nalgebra::Vector2;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Floor plan with every cell inside the building.
pub fn open_plan(width: usize, height: usize) -> GrayRaster {
    GrayRaster::filled(width, height, 0)
}

/// Three cells around the origin: left, right and above.
pub fn tee_scan() -> ScanRaster {
    let mask = Mask::from_fn(3, 3, |x, y| matches!((x, y), (0, 1) | (2, 1) | (1, 0)));
    ScanRaster::new(mask, Vector2::new(1, 1))
}

/// One-row bar of `len` occupied cells.
pub fn bar_scan(len: usize, zero_zero: Vector2<i32>) -> ScanRaster {
    ScanRaster::new(Mask::from_fn(len, 1, |_, _| true), zero_zero)
}
