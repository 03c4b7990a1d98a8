//! JSON configuration for the `sobel_report` tool.
//!
//! ```json
//! {
//!   "input": "data/lena.pgm",
//!   "outputs": { "magnitude": "out/lena.pgm", "gx": "out/lena.pgm", "gy": "out/lena.pgm" },
//!   "pipeline": { "workers": 4 },
//!   "report": "out/lena.report.json"
//! }
//! ```
//!
//! Output paths follow the same suffix convention as the command line
//! (`out/lena.G.pgm`, `out/lena.GX.pgm`, `out/lena.GY.pgm` above).
use crate::error::{Error, Result};
use crate::pipeline::{OutputPaths, OutputSet, PipelineParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ReportToolConfig {
    pub input: PathBuf,
    pub outputs: OutputSet<PathBuf>,
    #[serde(default)]
    pub pipeline: PipelineParams,
    /// Where to write the JSON run report; omitted means no report.
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl ReportToolConfig {
    /// Destinations with the conventional suffixes applied.
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::from_destinations(&self.outputs.magnitude, &self.outputs.gx, &self.outputs.gy)
    }
}

pub fn load_config(path: &Path) -> Result<ReportToolConfig> {
    let config_error = |reason: String| Error::Config {
        path: path.to_path_buf(),
        reason,
    };
    let data = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    serde_json::from_str(&data).map_err(|e| config_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{
                "input": "in.pgm",
                "outputs": { "magnitude": "o/m.pgm", "gx": "o/x.pgm", "gy": "o/y" },
                "pipeline": { "workers": 3 },
                "report": "o/report.json"
            }"#,
        )
        .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.input, PathBuf::from("in.pgm"));
        assert_eq!(cfg.pipeline.workers, 3);
        assert_eq!(cfg.report, Some(PathBuf::from("o/report.json")));
        let out = cfg.output_paths();
        assert_eq!(out.magnitude, PathBuf::from("o/m.G.pgm"));
        assert_eq!(out.gx, PathBuf::from("o/x.GX.pgm"));
        assert_eq!(out.gy, PathBuf::from("o/y"));
    }

    #[test]
    fn pipeline_and_report_are_optional() {
        let cfg: ReportToolConfig = serde_json::from_str(
            r#"{ "input": "a.pgm", "outputs": { "magnitude": "m", "gx": "x", "gy": "y" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.pipeline, PipelineParams::default());
        assert!(cfg.report.is_none());
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_config(&missing), Err(Error::Config { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ \"input\": 3 }").unwrap();
        assert!(matches!(load_config(&broken), Err(Error::Config { .. })));
    }
}
