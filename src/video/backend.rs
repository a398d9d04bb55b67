// Video backend - the engine-facing context object
//
// Owns every piece of presentation state: both surfaces, the palette
// tables, the frame counter, and the stats harness. The engine drives it
// synchronously: init once, present once per rendered frame, palette
// updates as effects demand, shutdown at exit. Buffer memory is released
// when the backend drops.

use crate::config::VideoConfig;
use crate::diag::Logger;
use crate::error::VideoError;
use crate::perf::{default_counters, CounterSource, StatsHarness, FRAMES_PER_STAT};

use super::hooks::{GrabMouseCallback, InputHandler, NoopInput};
use super::palette::{ColorTable, GammaTable, Rgb565Palette, PALETTE_BYTES};
use super::physical::PhysicalSurfaceSet;
use super::present;
use super::surface::LogicalSurface;

/// Video output and telemetry backend.
pub struct VideoBackend {
    config: VideoConfig,
    logical: LogicalSurface,
    physical: PhysicalSurfaceSet,
    colors: ColorTable,
    rgb565: Rgb565Palette,
    gamma: GammaTable,
    raw_palette: Option<Box<[u8; PALETTE_BYTES]>>,
    frames_rendered: u64,
    stats: StatsHarness,
    counters: Box<dyn CounterSource>,
    input: Box<dyn InputHandler>,
    grab_mouse: Option<GrabMouseCallback>,
    screen_visible: bool,
    fps_dots: bool,
    logger: Logger,
}

impl VideoBackend {
    /// Initialize the backend with the platform counter source, a no-op
    /// input handler, and stderr logging.
    pub fn new(config: VideoConfig) -> Result<Self, VideoError> {
        Self::with_parts(
            config,
            default_counters(),
            Box::new(NoopInput),
            Logger::default(),
        )
    }

    /// Initialize the backend with injected counter source, input handler,
    /// and logger.
    pub fn with_parts(
        config: VideoConfig,
        counters: Box<dyn CounterSource>,
        mut input: Box<dyn InputHandler>,
        mut logger: Logger,
    ) -> Result<Self, VideoError> {
        let width = config.display.width;
        let height = config.display.height;

        logger.info(&format!("Initializing graphics: {}x{}", width, height));

        let logical = LogicalSurface::new(width, height)?;
        let physical = PhysicalSurfaceSet::new(width, height)?;

        logger.info(&format!(
            "Logical surface at {:p} ({} bytes, phys {:?})",
            logical.as_slice().as_ptr(),
            logical.len(),
            logical.physical_address(),
        ));
        logger.info(&format!(
            "Physical surface pair at {:p} (2 x {} bytes, phys {:?})",
            physical.active_half().as_ptr(),
            physical.half_len(),
            physical.physical_address(),
        ));

        input.init();

        Ok(VideoBackend {
            gamma: GammaTable::new(config.display.gamma),
            config,
            logical,
            physical,
            colors: ColorTable::new(),
            rgb565: Rgb565Palette::new(),
            raw_palette: None,
            frames_rendered: 0,
            stats: StatsHarness::new(),
            counters,
            input,
            grab_mouse: None,
            screen_visible: true,
            fps_dots: false,
            logger,
        })
    }

    /// Convert the logical surface into the inactive physical half and make
    /// it active. Every `FRAMES_PER_STAT` frames the counter harness runs
    /// inline, adding its cost to that one frame.
    pub fn present_frame(&mut self) {
        let dst = self.physical.back_half_ptr();
        // dst spans pixel_count texels inside the inactive half; the halves
        // never overlap the logical surface
        unsafe {
            present::pack_indexed(self.logical.as_slice(), self.colors.packed(), dst);
        }
        self.physical.flip();

        if self.frames_rendered % FRAMES_PER_STAT == 0 {
            let metrics = self.stats.sample(self.counters.as_mut());
            self.logger.info(&metrics.to_string());
        }
        self.frames_rendered += 1;
    }

    /// Rebuild both palette tables from 256 RGB triples.
    ///
    /// Complete before the next present; no partial table is ever visible
    /// to a conversion pass.
    pub fn set_palette(&mut self, palette: &[u8; PALETTE_BYTES]) {
        self.colors.rebuild(palette, &self.gamma);
        self.rgb565.rebuild(palette, &self.gamma);
        self.raw_palette = Some(Box::new(*palette));
    }

    /// Change the gamma level and re-apply the current palette.
    pub fn set_gamma(&mut self, level: usize) {
        self.gamma = GammaTable::new(level);
        self.config.display.gamma = self.gamma.level();
        if let Some(palette) = self.raw_palette.take() {
            self.colors.rebuild(&palette, &self.gamma);
            self.rgb565.rebuild(&palette, &self.gamma);
            self.raw_palette = Some(palette);
        }
    }

    /// Closest palette index to an RGB color.
    pub fn find_nearest_palette_index(&self, r: u8, g: u8, b: u8) -> u8 {
        self.rgb565.find_nearest(r, g, b)
    }

    /// Copy the logical surface byte-exactly into caller storage.
    pub fn read_screen_into(&self, out: &mut [u8]) {
        self.logical.read_into(out);
    }

    /// The logical surface, for the engine's renderer
    pub fn surface(&self) -> &LogicalSurface {
        &self.logical
    }

    pub fn surface_mut(&mut self) -> &mut LogicalSurface {
        &mut self.logical
    }

    /// Packed color table entry for a palette index
    pub fn color_entry(&self, index: u8) -> u32 {
        self.colors.entry(index)
    }

    /// The physical half currently active for presentation
    pub fn active_half(&self) -> &[u8] {
        self.physical.active_half()
    }

    /// Index of the active physical half
    pub fn active_buffer_index(&self) -> usize {
        self.physical.active_index()
    }

    /// Frames presented since initialization
    pub fn frame_count(&self) -> u64 {
        self.frames_rendered
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Recent diagnostic lines, oldest first
    pub fn diagnostics(&self) -> &[String] {
        self.logger.tail()
    }

    /// Release both surfaces. Dropping the backend is equivalent.
    pub fn shutdown(mut self) {
        self.logger.info("Shutting down graphics");
    }

    // --- Engine interface stubs -------------------------------------------
    // Present only to satisfy the engine's expected surface.

    /// Start-of-frame notification
    pub fn start_frame(&mut self) {}

    /// Per-tic entry point; delegates to the injected input handler
    pub fn start_tic(&mut self) {
        self.input.poll();
    }

    /// Blit-free update notification
    pub fn update_no_blit(&mut self) {}

    /// Window title; no window exists on this target
    pub fn set_window_title(&mut self, _title: &str) {}

    /// Command-line scan; this backend takes no video arguments
    pub fn check_command_line(&mut self, _args: &[String]) {}

    /// Register the engine's mouse-grab decision callback
    pub fn set_grab_mouse_callback(&mut self, callback: GrabMouseCallback) {
        self.grab_mouse = Some(callback);
    }

    /// The registered mouse-grab callback, if any
    pub fn grab_mouse_callback(&self) -> Option<GrabMouseCallback> {
        self.grab_mouse
    }

    /// Loading-disk icon; no overlay hardware on this target
    pub fn enable_loading_disk(&mut self) {}

    /// FPS-dot overlay toggle
    pub fn display_fps_dots(&mut self, dots_on: bool) {
        self.fps_dots = dots_on;
    }

    /// Whether the FPS-dot overlay was requested
    pub fn fps_dots(&self) -> bool {
        self.fps_dots
    }

    /// Screensaver check; never a screensaver on this target
    pub fn check_is_screensaver(&self) -> bool {
        false
    }

    /// Whether the screen is considered visible for rendering
    pub fn screen_visible(&self) -> bool {
        self.screen_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::NullCounters;

    fn test_backend(width: usize, height: usize) -> VideoBackend {
        let mut config = VideoConfig::default();
        config.display.width = width;
        config.display.height = height;
        VideoBackend::with_parts(
            config,
            Box::new(NullCounters),
            Box::new(NoopInput),
            Logger::silent(),
        )
        .unwrap()
    }

    fn flat_palette(r: u8, g: u8, b: u8) -> [u8; PALETTE_BYTES] {
        let mut palette = [0u8; PALETTE_BYTES];
        for i in 0..256 {
            palette[i * 3] = r;
            palette[i * 3 + 1] = g;
            palette[i * 3 + 2] = b;
        }
        palette
    }

    #[test]
    fn test_double_buffer_alternation() {
        let mut backend = test_backend(64, 64);
        let first = backend.active_buffer_index();
        backend.present_frame();
        assert_ne!(backend.active_buffer_index(), first);
        backend.present_frame();
        assert_eq!(backend.active_buffer_index(), first);

        for _ in 0..20 {
            backend.present_frame();
        }
        assert_eq!(backend.active_buffer_index(), first);
        assert_eq!(backend.frame_count(), 22);
    }

    #[test]
    fn test_present_round_trip() {
        let mut backend = test_backend(32, 32);
        let mut palette = flat_palette(0, 0, 0);
        palette[7 * 3] = 10;
        palette[7 * 3 + 1] = 20;
        palette[7 * 3 + 2] = 30;
        backend.set_palette(&palette);

        backend.surface_mut().clear(7);
        backend.present_frame();

        let expected = backend.color_entry(7).to_le_bytes();
        let half = backend.active_half();
        for texel in half[..32 * 32 * 4].chunks_exact(4) {
            assert_eq!(texel, expected);
        }
    }

    #[test]
    fn test_set_gamma_reapplies_palette() {
        let mut backend = test_backend(8, 8);
        backend.set_palette(&flat_palette(64, 64, 64));
        let identity = backend.color_entry(0);
        backend.set_gamma(4);
        assert_ne!(backend.color_entry(0), identity);
        backend.set_gamma(0);
        assert_eq!(backend.color_entry(0), identity);
    }

    #[test]
    fn test_read_screen_into() {
        let mut backend = test_backend(16, 8);
        backend.surface_mut().set_pixel(3, 2, 0x42);
        let mut copy = vec![0u8; 16 * 8];
        backend.read_screen_into(&mut copy);
        assert_eq!(copy[2 * 16 + 3], 0x42);
    }

    #[test]
    fn test_stub_surface_is_callable() {
        let mut backend = test_backend(8, 8);
        backend.start_frame();
        backend.start_tic();
        backend.update_no_blit();
        backend.set_window_title("demo");
        backend.check_command_line(&[]);
        backend.set_grab_mouse_callback(|| false);
        backend.enable_loading_disk();
        backend.display_fps_dots(true);
        assert!(!backend.check_is_screensaver());
        assert!(backend.screen_visible());
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut config = VideoConfig::default();
        config.display.width = 0;
        assert!(VideoBackend::new(config).is_err());
    }
}
