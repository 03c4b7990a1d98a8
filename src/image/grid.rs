//! Owned signed-integer gradient grid in row-major layout (stride == width).
//!
//! Holds raw Sobel responses before normalization and 8-bit display values
//! after it.
use super::Raster;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradientGrid {
    /// Grid width in cells
    pub w: usize,
    /// Grid height in cells
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<i32>,
}

impl GradientGrid {
    /// Zero-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    /// Grid initialized with a copy of the raster's samples.
    pub fn from_raster(raster: &Raster) -> Self {
        let mut data = Vec::with_capacity(raster.w * raster.h);
        for y in 0..raster.h {
            let start = y * raster.stride;
            data.extend_from_slice(&raster.data[start..start + raster.w]);
        }
        Self {
            w: raster.w,
            h: raster.h,
            stride: raster.w,
            data,
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: i32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl crate::image::traits::ImageView for GradientGrid {
    type Pixel = i32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[i32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for GradientGrid {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [i32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn buffer_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}
