//! Sobel gradients: horizontal and vertical responses plus their magnitude.
//!
//! - Every output grid starts as a copy of the (padded) input raster.
//! - Interior cells (`rows [1, h-2)`, `cols [1, w-2)`) are overwritten with
//!   the kernel response of the window whose top-left corner is that cell.
//! - The remaining frame keeps the raster's samples so the rendered outputs
//!   are not blank along the edges.
//!
//! Each of the three fills (gx, gy, magnitude) is one row-parallel stage.
use super::kernel::{convolve_interior, interior, SOBEL_X, SOBEL_Y};
use crate::image::{GradientGrid, ImageView, ImageViewMut, Raster};
use crate::parallel::Executor;

/// Gradient grids of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradients {
    /// `round(sqrt(gx^2 + gy^2))` on the interior
    pub magnitude: GradientGrid,
    /// Response to `SOBEL_X`
    pub gx: GradientGrid,
    /// Response to `SOBEL_Y`
    pub gy: GradientGrid,
}

#[inline]
pub fn magnitude(gx: i32, gy: i32) -> i32 {
    let (gx, gy) = (f64::from(gx), f64::from(gy));
    (gx * gx + gy * gy).sqrt().round() as i32
}

/// Compute Sobel gradients of `raster`.
pub fn sobel_gradients(raster: &Raster, executor: &Executor) -> Gradients {
    let mut gx = GradientGrid::from_raster(raster);
    let mut gy = gx.clone();
    let mut mag = gx.clone();

    convolve_interior(raster, &SOBEL_X, &mut gx, executor);
    convolve_interior(raster, &SOBEL_Y, &mut gy, executor);
    combine_magnitude(&gx, &gy, &mut mag, executor);

    Gradients {
        magnitude: mag,
        gx,
        gy,
    }
}

fn combine_magnitude(
    gx: &GradientGrid,
    gy: &GradientGrid,
    out: &mut GradientGrid,
    executor: &Executor,
) {
    let cols = interior(out.w);
    let stride = out.stride;
    let rows = interior(out.h);
    executor.for_each_row(out.buffer_mut(), stride, rows, |y, row| {
        let (rx, ry) = (gx.row(y), gy.row(y));
        for x in cols.clone() {
            row[x] = magnitude(rx[x], ry[x]);
        }
    });
}
