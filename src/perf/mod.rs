// Performance module - Hardware counter sampling and derived frame metrics
//
// Provides:
// - CounterSource abstraction over the platform performance counters
// - RISC-V CSR-backed implementation and a null fallback
// - Sampling harness run every FRAMES_PER_STAT frames by the present path

pub mod clock;
pub mod counters;
pub mod stats;

pub use counters::{default_counters, CounterSource, NullCounters};
pub use stats::{FrameMetrics, StatsHarness, FRAMES_PER_STAT};

#[cfg(target_arch = "riscv64")]
pub use counters::RiscvCounters;
