//! DrishtiIO - Camera streaming and adaptive detection pipeline for a wheeled robot
//!
//! The robot side captures camera frames, JPEG-encodes them and publishes them
//! over a persistent TCP connection using length-prefixed framing. The operator
//! side reassembles frames from the byte stream, throttles expensive object
//! detection with frame skipping and downscaling, and remaps detection boxes
//! back to full-resolution coordinates for display.
//!
//! A separate pin-driven motor controller covers the drive subsystem.

pub mod camera;
pub mod codec;
pub mod config;
pub mod detect;
pub mod display;
pub mod error;
pub mod frame;
pub mod motor;
pub mod pipeline;
pub mod sampling;
pub mod streaming;
pub mod transport;
pub mod wire;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
pub use frame::Frame;
