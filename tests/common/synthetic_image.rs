use sobel_edges::image::io::encode;
use sobel_edges::image::{Raster, RasterFormat};
use std::path::{Path, PathBuf};

/// Dark image with one fully bright column.
pub fn bright_column(width: usize, height: usize, column: usize, format: RasterFormat) -> Raster {
    assert!(column < width, "column must lie inside the image");
    let mut img = Raster::new(format, width, height, 255);
    for y in 0..height {
        img.set(column, y, 255);
    }
    img
}

/// Simple high-contrast checkerboard.
pub fn checkerboard(width: usize, height: usize, cell: usize, format: RasterFormat) -> Raster {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = Raster::new(format, width, height, 255);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img.set(x, y, if sum & 1 == 0 { 32 } else { 220 });
        }
    }
    img
}

/// Deterministic noise in `[0, 255]` (64-bit LCG).
pub fn noise(width: usize, height: usize, seed: u64, format: RasterFormat) -> Raster {
    let mut state = seed;
    let data = (0..width * height)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as i32
        })
        .collect();
    Raster::from_samples(format, width, height, 255, data)
}

/// Write `raster` into `dir/name` in its own format family.
pub fn write_pgm(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    encode(&path, raster, raster.format, raster.max_level).expect("write test raster");
    path
}
