use super::TimingBreakdown;
use crate::edges::NormalizationStats;
use crate::error::{Error, Result};
use crate::image::{Raster, RasterFormat};
use crate::pipeline::OutputSet;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Header fields of the decoded input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub format: RasterFormat,
    pub width: usize,
    pub height: usize,
    pub max_level: u16,
}

impl InputDescriptor {
    pub fn from_raster(raster: &Raster) -> Self {
        Self {
            format: raster.format,
            width: raster.w,
            height: raster.h,
            max_level: raster.max_level,
        }
    }
}

/// Summary of one file-to-file run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input: InputDescriptor,
    pub workers: usize,
    /// Extrema each output was stretched from
    pub normalization: OutputSet<NormalizationStats>,
    pub outputs: OutputSet<PathBuf>,
    pub timings: TimingBreakdown,
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let report_error = |reason: String| Error::Report {
        path: path.to_path_buf(),
        reason,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| report_error(e.to_string()))?;
        }
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| report_error(e.to_string()))?;
    fs::write(path, json).map_err(|e| report_error(e.to_string()))
}
