// Demo driver - runs an animated test pattern through the present path
//
// Stands in for the game engine: renders indexed pixels into the logical
// surface and presents each frame, so the conversion loop and the counter
// harness can be exercised on real hardware.

use fbdev_rs::{VideoBackend, VideoConfig, PALETTE_BYTES};

const DEMO_FRAMES: u64 = 2048;

fn grayscale_palette() -> [u8; PALETTE_BYTES] {
    let mut palette = [0u8; PALETTE_BYTES];
    for i in 0..256 {
        palette[i * 3] = i as u8;
        palette[i * 3 + 1] = i as u8;
        palette[i * 3 + 2] = i as u8;
    }
    palette
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let config = match VideoConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config load failed ({}), using defaults", e);
            VideoConfig::default()
        }
    };

    let mut backend = match VideoBackend::new(config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Graphics initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    backend.check_command_line(&args);
    backend.set_palette(&grayscale_palette());

    let width = backend.surface().width();
    let height = backend.surface().height();

    for frame in 0..DEMO_FRAMES {
        backend.start_frame();
        backend.start_tic();

        // Scrolling diagonal gradient
        let surface = backend.surface_mut();
        for y in 0..height {
            for x in 0..width {
                surface.set_pixel(x, y, ((x + y + frame as usize) & 0xFF) as u8);
            }
        }

        backend.present_frame();
    }

    backend.shutdown();
}
