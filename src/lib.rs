#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod image;
pub mod parallel;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::pipeline::{OutputPaths, PipelineParams, SobelPipeline};

// Results of a run.
pub use crate::diagnostics::{RunReport, TimingBreakdown};
pub use crate::edges::{Gradients, NormalizationStats};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use sobel_edges::prelude::*;
///
/// # fn main() -> sobel_edges::Result<()> {
/// let raster = decode(std::path::Path::new("input.pgm"))?;
/// let pipeline = SobelPipeline::new(PipelineParams::default())?;
/// let out = pipeline.process(raster)?;
/// println!("magnitude range {:?}", out.normalization.magnitude);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::io::{decode, encode};
    pub use crate::image::{GradientGrid, Raster, RasterFormat};
    pub use crate::{OutputPaths, PipelineParams, SobelPipeline};
}
