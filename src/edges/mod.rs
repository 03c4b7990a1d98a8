//! Edge-strength building blocks: border padding, 3×3 Sobel convolution,
//! gradient composition, and min–max normalization.
//!
//! All grids are `i32`. Gradients are signed and unbounded until
//! [`normalize`] maps them into `[0, 255]`.
//!
//! Borders are handled by zero padding, not clamping: [`pad`] clears the
//! outer frame of the input, and the convolution only visits windows that
//! lie fully inside the image.

pub mod border;
pub mod grad;
pub mod kernel;
pub mod normalize;

pub use border::pad;
pub use grad::{magnitude, sobel_gradients, Gradients};
pub use kernel::{apply, interior, Kernel3, SOBEL_X, SOBEL_Y};
pub use normalize::{normalize, NormalizationStats, DISPLAY_MAX};
