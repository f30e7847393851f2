//! Raster views used as inputs: the 8-bit floor plan and boolean scan masks.
//!
//! Both follow the same row-major layout with an explicit stride so that
//! borrowed views over externally-owned buffers can be passed without copies.

pub mod io;
pub mod mask;
pub mod traits;
pub mod u8;

pub use self::mask::Mask;
pub use self::traits::{RasterView, Rows};
pub use self::u8::RasterU8;

/// Floor-plan value marking a cell outside the building.
pub const FLOOR_PLAN_EMPTY: u8 = 255;
