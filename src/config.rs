//! Configuration for the DrishtiIO binaries
//!
//! Loads configuration from a TOML file. Network endpoints, camera geometry,
//! JPEG quality and the viewer's sampling knobs are all externalized here
//! rather than embedded as constants.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub camera: CameraConfig,
    pub sampling: SamplingConfig,
    pub logging: LoggingConfig,
}

/// Network endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// TCP bind address for the camera daemon
    ///
    /// Examples:
    /// - `0.0.0.0:9999` - all interfaces on port 9999
    /// - `127.0.0.1:9999` - localhost only
    pub listen_address: String,

    /// Remote endpoint the viewer connects to
    pub connect_address: String,
}

/// Camera capture parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// JPEG quality (1-100) used when encoding frames for the wire
    pub jpeg_quality: u8,
}

/// Viewer-side sampling knobs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Run object detection on selected frames (default on)
    pub detect: bool,
    /// Downscale factor applied before detection, in (0, 1]; 1.0 = no scaling
    pub scale_factor: f32,
    /// Frames skipped between detections; 0 = detect every frame
    pub skip_interval: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !(self.sampling.scale_factor > 0.0 && self.sampling.scale_factor <= 1.0) {
            return Err(Error::Config(format!(
                "sampling.scale_factor {} outside (0, 1]",
                self.sampling.scale_factor
            )));
        }
        if self.camera.jpeg_quality == 0 || self.camera.jpeg_quality > 100 {
            return Err(Error::Config(format!(
                "camera.jpeg_quality {} outside 1-100",
                self.camera.jpeg_quality
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    /// Defaults matching the stock deployment: daemon on all interfaces,
    /// port 9999, detection on at full resolution and rate.
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                listen_address: "0.0.0.0:9999".to_string(),
                connect_address: "192.168.1.90:9999".to_string(),
            },
            camera: CameraConfig {
                width: 640,
                height: 480,
                jpeg_quality: crate::codec::DEFAULT_JPEG_QUALITY,
            },
            sampling: SamplingConfig {
                detect: true,
                scale_factor: 1.0,
                skip_interval: 0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// Parse a config path from command line arguments.
///
/// Supports:
/// - `<bin> <path>` (positional)
/// - `<bin> --config <path>` (flag-based)
/// - `<bin> -c <path>` (short flag)
///
/// Falls back to `default_path` when nothing is given.
pub fn parse_config_path(default_path: &str) -> String {
    let args: Vec<String> = std::env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    default_path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.network.listen_address, "0.0.0.0:9999");
        assert!(config.sampling.detect);
        assert_eq!(config.sampling.scale_factor, 1.0);
        assert_eq!(config.sampling.skip_interval, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[network]"));
        assert!(toml_string.contains("[camera]"));
        assert!(toml_string.contains("[sampling]"));
        assert!(toml_string.contains("[logging]"));

        let parsed: AppConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.network.connect_address, config.network.connect_address);
        assert_eq!(parsed.camera.jpeg_quality, config.camera.jpeg_quality);
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r#"
[network]
listen_address = "0.0.0.0:7000"
connect_address = "10.0.0.2:7000"

[camera]
width = 1280
height = 720
jpeg_quality = 70

[sampling]
detect = false
scale_factor = 0.5
skip_interval = 2

[logging]
level = "debug"
"#;
        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.network.connect_address, "10.0.0.2:7000");
        assert_eq!(config.camera.width, 1280);
        assert!(!config.sampling.detect);
        assert_eq!(config.sampling.scale_factor, 0.5);
        assert_eq!(config.sampling.skip_interval, 2);
    }

    #[test]
    fn test_validation_rejects_bad_scale() {
        let mut config = AppConfig::default();
        config.sampling.scale_factor = 0.0;
        assert!(config.validate().is_err());
        config.sampling.scale_factor = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drishti.toml");

        let mut config = AppConfig::default();
        config.sampling.skip_interval = 3;
        config.to_file(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.sampling.skip_interval, 3);
    }
}
