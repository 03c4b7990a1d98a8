//! Owned grayscale raster as decoded from a PGM file.
//!
//! Samples live in one row-major buffer (`stride == w`) as `i32`, so the
//! convolution can accumulate signed sums without widening per pixel.
use serde::{Deserialize, Serialize};

/// Sample encoding family of a PGM file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// `P2`: whitespace-separated decimal samples.
    Ascii,
    /// `P5`: one raw byte per sample.
    Binary,
}

impl RasterFormat {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ascii => "P2",
            Self::Binary => "P5",
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"P2" => Some(Self::Ascii),
            b"P5" => Some(Self::Binary),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub format: RasterFormat,
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Largest legal sample value from the header
    pub max_level: u16,
    /// Backing storage in row-major order
    pub data: Vec<i32>,
}

impl Raster {
    /// Zero-filled raster of size `w × h`.
    pub fn new(format: RasterFormat, w: usize, h: usize, max_level: u16) -> Self {
        Self {
            format,
            w,
            h,
            stride: w,
            max_level,
            data: vec![0; w * h],
        }
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != w * h`.
    pub fn from_samples(
        format: RasterFormat,
        w: usize,
        h: usize,
        max_level: u16,
        data: Vec<i32>,
    ) -> Self {
        assert_eq!(
            data.len(),
            w * h,
            "raster of {w}x{h} needs {} samples",
            w * h
        );
        Self {
            format,
            w,
            h,
            stride: w,
            max_level,
            data,
        }
    }

    #[inline]
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

impl crate::image::traits::ImageView for Raster {
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

impl crate::image::traits::ImageViewMut for Raster {
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
