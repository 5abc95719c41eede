//! Object detection seam
//!
//! The model is an external collaborator: a pure function from a frame to a
//! list of detections. Boxes are reported in the coordinate space the
//! detector actually ran in; the sampling controller remaps them to full
//! resolution before anyone else sees them.

mod stub;

pub use stub::StubDetector;

use crate::error::Result;
use crate::frame::Frame;

/// One raw model output: a box in the detector's coordinate space, a
/// category label and a confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub label: String,
    pub confidence: f32,
}

impl Detection {
    /// Convenience constructor
    pub fn new(x: f32, y: f32, w: f32, h: f32, label: &str, confidence: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            label: label.to_string(),
            confidence,
        }
    }
}

/// Detector backend trait.
///
/// Implementations take one frame at a time and return zero or more raw
/// detections. They must not retain the pixel buffer beyond the call.
pub trait Detector: Send {
    /// Backend identifier
    fn name(&self) -> &'static str;

    /// Run detection on a frame
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>>;
}
