//! Min–max normalization of gradient grids into the 8-bit display range.
//!
//! Two stages, each row-parallel: a min/max reduction over every cell
//! (frame included), then an in-place rescale that reads only the merged
//! global extrema. The rescale starts after the reduction has returned.
use crate::image::{GradientGrid, ImageView, ImageViewMut};
use crate::parallel::Executor;
use serde::Serialize;

/// Upper end of the output range.
pub const DISPLAY_MAX: i32 = 255;

/// Global extrema of a grid before rescaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NormalizationStats {
    pub min: i32,
    pub max: i32,
}

impl NormalizationStats {
    /// A constant grid has no range to stretch.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Rescale one value into `[0, DISPLAY_MAX]`, truncating toward zero.
///
/// Constant grids (`min == max`) map every cell to 0.
#[inline]
pub fn rescale_value(value: i32, stats: NormalizationStats) -> i32 {
    if stats.is_degenerate() {
        return 0;
    }
    let offset = (i64::from(value) - i64::from(stats.min)) as f64;
    let range = (i64::from(stats.max) - i64::from(stats.min)) as f64;
    (offset / range * f64::from(DISPLAY_MAX)) as i32
}

/// Global min and max over all cells, folded per row band and merged after
/// every worker has finished. An empty grid yields `{ min: 0, max: 0 }`.
pub fn min_max(grid: &GradientGrid, executor: &Executor) -> NormalizationStats {
    if grid.w == 0 || grid.h == 0 {
        return NormalizationStats { min: 0, max: 0 };
    }
    let (min, max) = executor.reduce(
        0..grid.h,
        || (i32::MAX, i32::MIN),
        |(lo, hi), y| {
            grid.row(y)
                .iter()
                .fold((lo, hi), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        },
        |(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)),
    );
    NormalizationStats { min, max }
}

/// Rescale every cell in place using already-merged extrema.
pub fn rescale(grid: &mut GradientGrid, stats: NormalizationStats, executor: &Executor) {
    let (w, h, stride) = (grid.w, grid.h, grid.stride);
    executor.for_each_row(grid.buffer_mut(), stride, 0..h, |_, row| {
        for v in &mut row[..w] {
            *v = rescale_value(*v, stats);
        }
    });
}

/// Normalize `grid` into `[0, 255]` in place and return the extrema used.
pub fn normalize(grid: &mut GradientGrid, executor: &Executor) -> NormalizationStats {
    let stats = min_max(grid, executor);
    rescale(grid, stats, executor);
    stats
}
