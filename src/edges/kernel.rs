//! Fixed 3×3 integer kernels and the window convolution.
//!
//! A window is addressed by its top-left corner: `apply(img, k, row, col)`
//! reads rows `row..row + 3` and columns `col..col + 3`.
use crate::image::{GradientGrid, ImageView, ImageViewMut, Raster};
use crate::parallel::Executor;
use std::ops::Range;

pub type Kernel3 = [[i32; 3]; 3];

/// Responds to horizontal intensity change (vertical edges).
pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
/// Responds to vertical intensity change (horizontal edges).
pub const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Sum of elementwise products between `kernel` and the 3×3 window whose
/// top-left corner is `(row, col)`.
///
/// # Panics
/// Panics if the window extends past the image.
#[inline]
pub fn apply<I>(image: &I, kernel: &Kernel3, row: usize, col: usize) -> i32
where
    I: ImageView<Pixel = i32>,
{
    let mut sum = 0;
    for (i, k_row) in kernel.iter().enumerate() {
        let window = &image.row(row + i)[col..col + 3];
        sum += window[0] * k_row[0] + window[1] * k_row[1] + window[2] * k_row[2];
    }
    sum
}

/// Cells written by the gradient pass along one axis: `[1, len - 2)`.
pub fn interior(len: usize) -> Range<usize> {
    1..len.saturating_sub(2).max(1)
}

/// Overwrite the interior cells of `out` with `apply(raster, kernel, y, x)`,
/// one row band per worker. Cells outside [`interior`] are left untouched.
pub fn convolve_interior(
    raster: &Raster,
    kernel: &Kernel3,
    out: &mut GradientGrid,
    executor: &Executor,
) {
    debug_assert_eq!((raster.w, raster.h), (out.w, out.h));
    let cols = interior(out.w);
    let stride = out.stride;
    let rows = interior(out.h);
    executor.for_each_row(out.buffer_mut(), stride, rows, |y, row| {
        for x in cols.clone() {
            row[x] = apply(raster, kernel, y, x);
        }
    });
}
