// Stats harness - windowed sampling of the hardware counters
//
// The present path runs one sample every FRAMES_PER_STAT frames, inline with
// presentation. The harness keeps the previous sample as the delta baseline
// and derives per-window rates from it.

use super::clock::monotonic_seconds;
use super::counters::CounterSource;

/// Number of presented frames between counter samples
pub const FRAMES_PER_STAT: u64 = 512;

/// Metrics derived from one counter sample window
#[derive(Debug, Clone, Copy)]
pub struct FrameMetrics {
    /// Instructions retired since the previous sample
    pub insn_delta: u64,

    /// Instructions per presented frame over the window
    pub insn_per_frame: f64,

    /// Instructions per cycle (cumulative)
    pub ipc: f64,

    /// Mispredicted branches per kilo-instruction (cumulative)
    pub branch_mpki: f64,

    /// L1 data cache misses per kilo-instruction over the window
    pub l1d_mpki: f64,

    /// L1 instruction cache misses per kilo-instruction over the window
    pub l1i_mpki: f64,

    /// L2 cache misses per kilo-instruction over the window
    pub l2_mpki: f64,

    /// Presented frames per second over the window
    pub fps: f64,
}

impl std::fmt::Display for FrameMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} insn, {:.1} insn per frame, {:.3} ipc, {:.3} jpki, \
             {:.3} l1d mpki, {:.3} l1i mpki, {:.3} l2 mpki, {:.1} fps",
            self.insn_delta,
            self.insn_per_frame,
            self.ipc,
            self.branch_mpki,
            self.l1d_mpki,
            self.l1i_mpki,
            self.l2_mpki,
            self.fps
        )
    }
}

/// Baseline snapshot between samples.
///
/// Counters that read zero (null source, absent CSRs) simply produce
/// zero/NaN rates; telemetry degradation is never an error.
pub struct StatsHarness {
    last_instret: u64,
    last_l1d: [u64; 2],
    last_l1i: [u64; 2],
    last_l2: [u64; 2],
    last_time: f64,
}

impl StatsHarness {
    pub fn new() -> Self {
        StatsHarness {
            last_instret: 0,
            last_l1d: [0, 0],
            last_l1i: [0, 0],
            last_l2: [0, 0],
            last_time: monotonic_seconds(),
        }
    }

    /// Sample the counters and derive the metrics for the window since the
    /// previous sample, then advance the baseline.
    pub fn sample(&mut self, counters: &mut dyn CounterSource) -> FrameMetrics {
        let instret = counters.instructions_retired();
        let cycles = counters.cycles();
        let mispred = counters.branch_mispredictions();

        let l1d = counters.l1d_pair();
        let l1i = counters.l1i_pair();
        let l2 = counters.l2_pair();

        let insn_delta = instret.wrapping_sub(self.last_instret);
        let now = monotonic_seconds();

        let metrics = FrameMetrics {
            insn_delta,
            insn_per_frame: insn_delta as f64 / FRAMES_PER_STAT as f64,
            ipc: instret as f64 / cycles as f64,
            branch_mpki: 1000.0 * mispred as f64 / instret as f64,
            l1d_mpki: 1000.0 * Self::pair_misses(&self.last_l1d, &l1d) as f64 / instret as f64,
            l1i_mpki: 1000.0 * Self::pair_misses(&self.last_l1i, &l1i) as f64 / instret as f64,
            l2_mpki: 1000.0 * Self::pair_misses(&self.last_l2, &l2) as f64 / instret as f64,
            fps: FRAMES_PER_STAT as f64 / (now - self.last_time),
        };

        self.last_instret = instret;
        self.last_l1d = l1d;
        self.last_l1i = l1i;
        self.last_l2 = l2;
        self.last_time = now;

        metrics
    }

    /// Window miss count for one `[start, end]` pair: delta of `end` minus
    /// delta of `start`, clamped at zero.
    fn pair_misses(last: &[u64; 2], cur: &[u64; 2]) -> u64 {
        let start_delta = cur[0].wrapping_sub(last[0]);
        let end_delta = cur[1].wrapping_sub(last[1]);
        end_delta.saturating_sub(start_delta)
    }
}

impl Default for StatsHarness {
    fn default() -> Self {
        Self::new()
    }
}
