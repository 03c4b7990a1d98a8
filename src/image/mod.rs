pub mod grid;
pub mod io;
pub mod raster;
pub mod traits;

pub use self::grid::GradientGrid;
pub use self::raster::{Raster, RasterFormat};
pub use self::traits::{ImageView, ImageViewMut, Rows};
