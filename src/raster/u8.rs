/// Borrowed 8-bit raster, used for the floor plan.
#[derive(Clone, Copy, Debug)]
pub struct RasterU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> RasterU8<'a> {
    /// Tightly packed `w × h` view; `data` must hold at least `w * h` bytes.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        debug_assert!(
            data.len() >= w * h,
            "RasterU8 {w}x{h} needs {} bytes, got {}",
            w * h,
            data.len()
        );
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }
}

impl<'a> crate::raster::traits::RasterView for RasterU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
