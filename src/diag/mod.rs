// Diagnostics module - Leveled logging for backend events and telemetry

pub mod logger;

pub use logger::{LogLevel, Logger};
