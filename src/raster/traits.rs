pub trait RasterView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    #[inline]
    fn get(&self, x: usize, y: usize) -> Self::Pixel {
        self.row(y)[x]
    }

    /// Signed lookup returning `None` outside the raster.
    #[inline]
    fn get_checked(&self, x: i64, y: i64) -> Option<Self::Pixel> {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { raster: self, y: 0 }
    }
}

pub struct Rows<'a, R: ?Sized + RasterView> {
    raster: &'a R,
    y: usize,
}

impl<'a, R: RasterView> Iterator for Rows<'a, R> {
    type Item = &'a [R::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.raster.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.raster.row(y))
    }
}
