// Logger - Leveled diagnostic output for the video backend
//
// Provides:
// - Configurable log levels
// - Output to stderr and/or a log file
// - Bounded in-memory tail for inspection

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information
    Debug,
}

/// Logger
///
/// Formats each accepted message with a wall-clock timestamp and writes it
/// to stderr, an optional log file, and a bounded in-memory tail.
pub struct Logger {
    level: LogLevel,
    stderr: bool,
    output_file: Option<File>,
    tail: Vec<String>,
    max_tail: usize,
}

impl Logger {
    /// Create a logger writing to stderr at the given level
    pub fn new(level: LogLevel) -> Self {
        Logger {
            level,
            stderr: true,
            output_file: None,
            tail: Vec::new(),
            max_tail: 256,
        }
    }

    /// Create a silent logger (no stderr output, tail only)
    pub fn silent() -> Self {
        Logger {
            level: LogLevel::Debug,
            stderr: false,
            output_file: None,
            tail: Vec::new(),
            max_tail: 256,
        }
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Also write accepted messages to a log file
    pub fn set_output_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        self.output_file = Some(File::create(path)?);
        Ok(())
    }

    /// Log a message at the given level
    pub fn log(&mut self, level: LogLevel, message: &str) {
        if level > self.level || self.level == LogLevel::None {
            return;
        }

        let tag = match level {
            LogLevel::None => return,
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };

        let line = format!(
            "[{} {}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            tag,
            message
        );

        if self.stderr {
            eprintln!("{}", line);
        }
        if let Some(file) = &mut self.output_file {
            let _ = writeln!(file, "{}", line);
        }

        self.tail.push(line);
        if self.tail.len() > self.max_tail {
            self.tail.remove(0);
        }
    }

    pub fn error(&mut self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&mut self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Most recent accepted messages, oldest first
    pub fn tail(&self) -> &[String] {
        &self.tail
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}
