use serde::Serialize;
use std::time::Instant;

/// Wall time of one named stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: &'static str,
    pub elapsed_ms: f64,
}

/// Per-stage wall times of one build, in execution order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn stage_ms(&self, stage: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|t| t.stage == stage)
            .map(|t| t.elapsed_ms)
    }
}

/// Times consecutive stages of a build and collects them into a breakdown.
pub(crate) struct StageClock {
    run_start: Instant,
    breakdown: TimingBreakdown,
}

impl StageClock {
    pub(crate) fn start() -> Self {
        Self {
            run_start: Instant::now(),
            breakdown: TimingBreakdown::default(),
        }
    }

    /// Run `stage`, record its wall time and return it with the stage output.
    pub(crate) fn time<T>(&mut self, stage: &'static str, run: impl FnOnce() -> T) -> (T, f64) {
        let start = Instant::now();
        let out = run();
        let elapsed_ms = millis(start);
        self.breakdown.stages.push(StageTiming { stage, elapsed_ms });
        (out, elapsed_ms)
    }

    pub(crate) fn finish(mut self) -> TimingBreakdown {
        self.breakdown.total_ms = millis(self.run_start);
        self.breakdown
    }
}

#[inline]
fn millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_records_stages_in_order() {
        let mut clock = StageClock::start();
        let (a, a_ms) = clock.time("first", || 2 + 2);
        let (b, _) = clock.time("second", || "done");
        let timings = clock.finish();

        assert_eq!((a, b), (4, "done"));
        let labels: Vec<_> = timings.stages.iter().map(|t| t.stage).collect();
        assert_eq!(labels, ["first", "second"]);
        assert_eq!(timings.stage_ms("first"), Some(a_ms));
        assert_eq!(timings.stage_ms("missing"), None);
        let staged: f64 = timings.stages.iter().map(|t| t.elapsed_ms).sum();
        assert!(timings.total_ms >= staged);
    }
}
