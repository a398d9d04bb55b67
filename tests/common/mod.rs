// Common test utilities for the backend integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fbdev_rs::{CounterSource, Logger, NoopInput, VideoBackend, VideoConfig, PALETTE_BYTES};

/// Counter values shared between a test and the backend's counter source
#[derive(Default, Clone, Copy)]
pub struct CounterValues {
    pub instret: u64,
    pub cycles: u64,
    pub mispred: u64,
    pub l1d: [u64; 2],
    pub l1i: [u64; 2],
    pub l2: [u64; 2],
}

/// Counter source backed by a shared handle the test can mutate between
/// frames
pub struct SharedCounters {
    values: Rc<RefCell<CounterValues>>,
}

impl SharedCounters {
    pub fn new() -> (Self, Rc<RefCell<CounterValues>>) {
        let values = Rc::new(RefCell::new(CounterValues::default()));
        (
            SharedCounters {
                values: values.clone(),
            },
            values,
        )
    }
}

impl CounterSource for SharedCounters {
    fn instructions_retired(&mut self) -> u64 {
        self.values.borrow().instret
    }
    fn cycles(&mut self) -> u64 {
        self.values.borrow().cycles
    }
    fn branch_mispredictions(&mut self) -> u64 {
        self.values.borrow().mispred
    }
    fn l1d_pair(&mut self) -> [u64; 2] {
        self.values.borrow().l1d
    }
    fn l1i_pair(&mut self) -> [u64; 2] {
        self.values.borrow().l1i
    }
    fn l2_pair(&mut self) -> [u64; 2] {
        self.values.borrow().l2
    }
}

/// Backend with an injected counter source and silent logging
pub fn backend_with_counters(
    width: usize,
    height: usize,
    counters: Box<dyn CounterSource>,
) -> VideoBackend {
    let mut config = VideoConfig::default();
    config.display.width = width;
    config.display.height = height;
    VideoBackend::with_parts(config, counters, Box::new(NoopInput), Logger::silent()).unwrap()
}

/// Backend with zeroed counters and silent logging
pub fn backend(width: usize, height: usize) -> VideoBackend {
    backend_with_counters(width, height, Box::new(fbdev_rs::NullCounters))
}

/// Palette where every entry is the same RGB triple
pub fn flat_palette(r: u8, g: u8, b: u8) -> [u8; PALETTE_BYTES] {
    let mut palette = [0u8; PALETTE_BYTES];
    for i in 0..256 {
        palette[i * 3] = r;
        palette[i * 3 + 1] = g;
        palette[i * 3 + 2] = b;
    }
    palette
}

/// Palette with 256 distinct arbitrary triples
pub fn varied_palette() -> [u8; PALETTE_BYTES] {
    let mut palette = [0u8; PALETTE_BYTES];
    for i in 0..256usize {
        palette[i * 3] = (i * 7 + 13) as u8;
        palette[i * 3 + 1] = (i * 31 + 5) as u8;
        palette[i * 3 + 2] = (255 - i) as u8;
    }
    palette
}
