//! Timing and input descriptors attached to inspection reports.
use serde::Serialize;
use std::time::Instant;

/// Milliseconds elapsed since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Wall time spent in one pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-stage timings of one inspection run, in execution order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record a stage that started at `start` and ends now.
    pub fn record(&mut self, label: impl Into<String>, start: Instant) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms: elapsed_ms(start),
        });
    }

    pub fn finish(&mut self, run_start: Instant) {
        self.total_ms = elapsed_ms(run_start);
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_recorded_in_order() {
        let run = Instant::now();
        let mut timing = TimingBreakdown::default();
        timing.record("sheet", Instant::now());
        timing.record("seam", Instant::now());
        timing.finish(run);
        let labels: Vec<&str> = timing.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["sheet", "seam"]);
        assert!(timing.stage_ms("seam").is_some());
        assert!(timing.stage_ms("bends").is_none());
        assert!(timing.total_ms >= 0.0);
    }
}
