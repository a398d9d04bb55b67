// Framebuffer video backend library
// Indexed-color presentation and performance telemetry for an embedded
// RISC-V framebuffer target

// Public modules
pub mod config;
pub mod diag;
pub mod error;
pub mod mem;
pub mod perf;
pub mod video;

// Re-export main types for convenience
pub use config::{ConfigError, DisplayConfig, MouseConfig, VideoConfig};
pub use diag::{LogLevel, Logger};
pub use error::VideoError;
pub use mem::MappedBuffer;
pub use perf::{
    default_counters, CounterSource, FrameMetrics, NullCounters, StatsHarness, FRAMES_PER_STAT,
};
pub use video::{
    ColorTable, GammaTable, GrabMouseCallback, InputHandler, LogicalSurface, NoopInput,
    PhysicalSurfaceSet, Rgb565Palette, VideoBackend, PALETTE_BYTES, PALETTE_SIZE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that the standalone components can be instantiated
        let _table = ColorTable::new();
        let _mirror = Rgb565Palette::new();
        let _gamma = GammaTable::new(0);
        let _harness = StatsHarness::new();
        let _logger = Logger::silent();
        let _config = VideoConfig::default();
    }
}
