use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings of one run, in execution order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Run `f`, log its duration at debug level, and record it under `label`.
    pub fn record<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!("{label}: {elapsed_ms:.3} ms");
        self.push(label, elapsed_ms);
        out
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }
}
