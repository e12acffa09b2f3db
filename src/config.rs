//! # Configuration Management
//!
//! Wire constants and the optional configuration of a [`Dispatcher`](crate::Dispatcher).
//!
//! The free functions (`load`, `marshal`, ...) need no configuration at all. A dispatcher
//! adds a payload format choice, a packet size cap and logging settings on top.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults

use crate::core::serialization::PayloadFormat;
use crate::error::{PacketError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Fixed prefix of a request: tag, id, context length, method
pub const REQUEST_HEADER_LEN: usize = 6;

/// Fixed prefix of a response: tag, id, context length, status
pub const RESPONSE_HEADER_LEN: usize = 6;

/// Fixed prefix of an event: tag, method, context length
pub const EVENT_HEADER_LEN: usize = 4;

/// Largest context block the 16-bit length prefix can describe
pub const MAX_CONTEXT_LEN: usize = u16::MAX as usize;

/// Default packet size cap for dispatchers (16 MB)
pub const MAX_PACKET_SIZE: usize = 16 * 1024 * 1024;

/// Environment variable selecting the payload format
pub const ENV_FORMAT: &str = "TEAPACK_FORMAT";

/// Environment variable overriding the packet size cap, in bytes
pub const ENV_MAX_PACKET_SIZE: &str = "TEAPACK_MAX_PACKET_SIZE";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "TEAPACK_LOG_LEVEL";

/// Dispatcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Format used for context and data blocks
    #[serde(default)]
    pub payload_format: PayloadFormat,

    /// Largest encoded packet accepted by `load` or produced by `marshal`
    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_max_packet_size() -> usize {
    MAX_PACKET_SIZE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            payload_format: PayloadFormat::default(),
            max_packet_size: MAX_PACKET_SIZE,
            logging: LoggingConfig::default(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| PacketError::Config(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| PacketError::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| PacketError::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables, starting from defaults.
    ///
    /// Unparseable values are reported rather than ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var(ENV_FORMAT) {
            config.payload_format = PayloadFormat::from_name(&name).ok_or_else(|| {
                PacketError::Config(format!("Unknown payload format in {ENV_FORMAT}: '{name}'"))
            })?;
        }

        if let Ok(size) = std::env::var(ENV_MAX_PACKET_SIZE) {
            config.max_packet_size = size.parse::<usize>().map_err(|e| {
                PacketError::Config(format!("Invalid {ENV_MAX_PACKET_SIZE} '{size}': {e}"))
            })?;
        }

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                PacketError::Config(format!("Invalid {ENV_LOG_LEVEL}: '{level}'"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PacketError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| PacketError::Config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Smallest well-formed packet is an event with empty blocks
        if self.max_packet_size < EVENT_HEADER_LEN {
            errors.push(format!(
                "Max packet size too small: {} bytes (minimum: {EVENT_HEADER_LEN})",
                self.max_packet_size
            ));
        } else if self.max_packet_size > 1024 * 1024 * 1024 {
            errors.push(format!(
                "Max packet size too large: {} bytes (maximum: 1 GB)",
                self.max_packet_size
            ));
        }

        if self.payload_format == PayloadFormat::Bincode {
            errors.push(
                "WARNING: Bincode payloads are not self-describing - peers must share Rust types"
                    .to_string(),
            );
        }

        errors.extend(self.logging.validate());

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|e| !e.starts_with("WARNING"))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PacketError::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,

    /// Whether to include span open/close events
    pub log_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("teapack"),
            log_level: Level::INFO,
            json_format: false,
            log_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
