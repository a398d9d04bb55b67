// Video module - Surfaces, palette conversion, and frame presentation
//
// This module provides:
// - Logical indexed-color surface written by the engine's renderer
// - Double-buffered packed-pixel physical surface set
// - Palette color table with gamma correction and an RGB565 mirror
// - The per-frame conversion/presentation path
// - The backend context object exposing the engine-facing entry points

pub mod backend;
pub mod hooks;
pub mod palette;
pub mod physical;
pub mod present;
pub mod surface;

pub use backend::VideoBackend;
pub use hooks::{GrabMouseCallback, InputHandler, NoopInput};
pub use palette::{ColorTable, GammaTable, Rgb565Palette, PALETTE_BYTES, PALETTE_SIZE};
pub use physical::PhysicalSurfaceSet;
pub use surface::LogicalSurface;
