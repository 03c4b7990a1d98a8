//! Run diagnostics: per-stage timings and the serializable run report.
//!
//! Numeric code never measures itself; the pipeline wraps each stage in
//! [`TimingBreakdown::record`], which also emits the stage duration through
//! the `log` facade.

pub mod report;
pub mod timing;

pub use report::{write_json_file, InputDescriptor, RunReport};
pub use timing::{StageTiming, TimingBreakdown};
