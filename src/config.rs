// Configuration management
//
// Process-wide tunables for the video backend. The scaling factor and the
// mouse acceleration values are engine-facing knobs that the conversion path
// itself does not consume.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Default configuration file path
const CONFIG_FILE: &str = "fbdev_config.toml";

/// Errors that can occur while loading or saving the configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),

    /// Configuration file could not be parsed
    Parse(toml::de::Error),

    /// Configuration could not be serialized
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Video backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Display settings
    pub display: DisplayConfig,

    /// Mouse settings
    pub mouse: MouseConfig,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Logical surface width in pixels
    pub width: usize,

    /// Logical surface height in pixels
    pub height: usize,

    /// Framebuffer scaling factor
    pub scaling: u32,

    /// Gamma correction level (0 = identity)
    pub gamma: usize,
}

/// Mouse acceleration configuration
///
/// Emulates DOS mouse driver behavior: movement values above `threshold`
/// are multiplied by `acceleration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouseConfig {
    /// Movement magnitude above which acceleration applies
    pub threshold: i32,

    /// Multiplier applied above the threshold
    pub acceleration: f32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            display: DisplayConfig {
                width: 320,
                height: 200,
                scaling: 1,
                gamma: 0,
            },
            mouse: MouseConfig {
                threshold: 10,
                acceleration: 2.0,
            },
        }
    }
}

impl VideoConfig {
    /// Load the configuration from the default file, falling back to
    /// defaults if the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load the configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save the configuration to the default file
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_FILE)
    }

    /// Save the configuration to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VideoConfig::default();
        assert_eq!(config.display.width, 320);
        assert_eq!(config.display.height, 200);
        assert_eq!(config.display.scaling, 1);
        assert_eq!(config.display.gamma, 0);
        assert_eq!(config.mouse.threshold, 10);
        assert_eq!(config.mouse.acceleration, 2.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = VideoConfig::load_from("does_not_exist.toml").unwrap();
        assert_eq!(config.display.width, 320);
    }

    #[test]
    fn test_roundtrip() {
        let dir = std::env::temp_dir().join("fbdev_rs_config_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut config = VideoConfig::default();
        config.display.gamma = 3;
        config.mouse.threshold = 42;
        config.save_to(&path).unwrap();

        let loaded = VideoConfig::load_from(&path).unwrap();
        assert_eq!(loaded.display.gamma, 3);
        assert_eq!(loaded.mouse.threshold, 42);

        fs::remove_dir_all(&dir).unwrap();
    }
}
