//! End-to-end Sobel pipeline: decode → pad → gradients → normalize ×3 →
//! encode ×3.
//!
//! Stages run strictly one after another; parallelism lives inside each
//! stage (row bands on the shared [`Executor`]) and across the three final
//! encodes, which run as independent jobs.
//!
//! ```no_run
//! use sobel_edges::pipeline::{OutputPaths, PipelineParams, SobelPipeline};
//! use std::path::Path;
//!
//! # fn main() -> sobel_edges::Result<()> {
//! let pipeline = SobelPipeline::new(PipelineParams { workers: 4 })?;
//! let outputs = OutputPaths::from_destinations("out/a.pgm", "out/b.pgm", "out/c.pgm");
//! let report = pipeline.run(Path::new("lena.pgm"), &outputs)?;
//! println!("total {:.1} ms", report.timings.total_ms);
//! # Ok(())
//! # }
//! ```
use crate::diagnostics::{InputDescriptor, RunReport, TimingBreakdown};
use crate::edges::{normalize, pad, sobel_gradients, Gradients, NormalizationStats, DISPLAY_MAX};
use crate::error::{Error, Result};
use crate::image::io::{decode, encode, with_suffix};
use crate::image::{Raster, RasterFormat};
use crate::parallel::Executor;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Smallest width/height with at least one full 3×3 window after padding.
pub const MIN_DIMENSION: usize = 3;

/// Conventional destination suffixes.
pub const MAGNITUDE_SUFFIX: &str = ".G.pgm";
pub const GX_SUFFIX: &str = ".GX.pgm";
pub const GY_SUFFIX: &str = ".GY.pgm";

/// Knobs of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Worker threads; `0` uses one per available CPU, `1` runs serially.
    pub workers: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self { workers: 0 }
    }
}

/// One value per output raster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSet<T> {
    pub magnitude: T,
    pub gx: T,
    pub gy: T,
}

impl<T> OutputSet<T> {
    /// `(label, value)` pairs in magnitude, gx, gy order.
    pub fn labeled(&self) -> [(&'static str, &T); 3] {
        [
            ("magnitude", &self.magnitude),
            ("gx", &self.gx),
            ("gy", &self.gy),
        ]
    }
}

pub type OutputPaths = OutputSet<PathBuf>;

impl OutputPaths {
    /// Apply the `.G.pgm` / `.GX.pgm` / `.GY.pgm` convention to caller paths
    /// (see [`with_suffix`]).
    pub fn from_destinations(
        magnitude: impl AsRef<Path>,
        gx: impl AsRef<Path>,
        gy: impl AsRef<Path>,
    ) -> Self {
        Self {
            magnitude: with_suffix(magnitude.as_ref(), MAGNITUDE_SUFFIX),
            gx: with_suffix(gx.as_ref(), GX_SUFFIX),
            gy: with_suffix(gy.as_ref(), GY_SUFFIX),
        }
    }
}

/// Normalized gradients of one in-memory run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub gradients: Gradients,
    pub normalization: OutputSet<NormalizationStats>,
    pub timings: TimingBreakdown,
}

pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(Error::Dimension { width, height });
    }
    Ok(())
}

pub struct SobelPipeline {
    executor: Executor,
}

impl SobelPipeline {
    pub fn new(params: PipelineParams) -> Result<Self> {
        let executor = Executor::new(params.workers)?;
        debug!("SobelPipeline workers={}", executor.workers());
        Ok(Self { executor })
    }

    pub fn workers(&self) -> usize {
        self.executor.workers()
    }

    /// Pad, differentiate and normalize a decoded raster in memory.
    pub fn process(&self, raster: Raster) -> Result<PipelineOutput> {
        let mut timings = TimingBreakdown::default();
        let start = Instant::now();
        let (gradients, normalization) = self.process_stages(raster, &mut timings)?;
        timings.total_ms = start.elapsed().as_secs_f64() * 1000.0;
        Ok(PipelineOutput {
            gradients,
            normalization,
            timings,
        })
    }

    /// Decode `input`, process it, and write the three outputs concurrently.
    ///
    /// Outputs keep the input's format family; their header max level is
    /// 255, the top of the normalized range.
    ///
    /// Every encode job runs to completion even if another fails; the first
    /// failure (magnitude, gx, gy order) is returned after all have finished.
    pub fn run(&self, input: &Path, outputs: &OutputPaths) -> Result<RunReport> {
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let raster = timings.record("decode", || decode(input))?;
        let descriptor = InputDescriptor::from_raster(&raster);
        info!(
            "{}: {} {}x{} max level {}",
            input.display(),
            raster.format.tag(),
            raster.w,
            raster.h,
            raster.max_level
        );

        let format = raster.format;
        let (gradients, normalization) = self.process_stages(raster, &mut timings)?;
        timings.record("encode", || self.write_outputs(&gradients, format, outputs))?;

        timings.total_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "wrote {}, {}, {} in {:.3} ms",
            outputs.magnitude.display(),
            outputs.gx.display(),
            outputs.gy.display(),
            timings.total_ms
        );
        Ok(RunReport {
            input: descriptor,
            workers: self.workers(),
            normalization,
            outputs: outputs.clone(),
            timings,
        })
    }

    fn process_stages(
        &self,
        mut raster: Raster,
        timings: &mut TimingBreakdown,
    ) -> Result<(Gradients, OutputSet<NormalizationStats>)> {
        validate_dimensions(raster.w, raster.h)?;
        let exec = &self.executor;

        timings.record("pad", || pad(&mut raster));
        let mut gradients = timings.record("gradients", || sobel_gradients(&raster, exec));
        drop(raster);

        let normalization = OutputSet {
            magnitude: timings.record("normalize magnitude", || {
                normalize(&mut gradients.magnitude, exec)
            }),
            gx: timings.record("normalize gx", || normalize(&mut gradients.gx, exec)),
            gy: timings.record("normalize gy", || normalize(&mut gradients.gy, exec)),
        };
        for (label, stats) in normalization.labeled() {
            if stats.is_degenerate() {
                debug!("{label} is constant ({}), normalized to 0", stats.min);
            }
        }
        Ok((gradients, normalization))
    }

    fn write_outputs(
        &self,
        gradients: &Gradients,
        format: RasterFormat,
        outputs: &OutputPaths,
    ) -> Result<()> {
        let max_level = DISPLAY_MAX as u16;
        let targets = [
            (outputs.magnitude.as_path(), &gradients.magnitude),
            (outputs.gx.as_path(), &gradients.gx),
            (outputs.gy.as_path(), &gradients.gy),
        ];
        let jobs: Vec<_> = targets
            .into_iter()
            .map(|(path, grid)| move || encode(path, grid, format, max_level))
            .collect();
        let results = self.executor.run_jobs(jobs);

        let mut first_error = None;
        for ((label, _), result) in outputs.labeled().into_iter().zip(results) {
            if let Err(err) = result {
                warn!("{label} output failed: {err}");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
