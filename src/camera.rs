//! Camera capture seam
//!
//! Real capture backends (V4L2, libcamera) are external collaborators; the
//! pipeline only depends on the [`CameraSource`] trait. [`PatternCamera`]
//! generates a deterministic moving test pattern so the daemon and tests run
//! without hardware.

use crate::error::Result;
use crate::frame::Frame;

/// Source of captured frames
pub trait CameraSource: Send {
    /// Grab the next frame.
    ///
    /// Returns `Ok(None)` when the source has no more frames (end of
    /// capture), which terminates the producer loop cleanly.
    fn grab(&mut self) -> Result<Option<Frame>>;
}

/// Synthetic camera producing a moving gradient pattern.
///
/// Optionally bounded to a fixed number of frames, after which it reports
/// end of capture.
pub struct PatternCamera {
    width: u32,
    height: u32,
    frame_no: u32,
    limit: Option<u32>,
}

impl PatternCamera {
    /// Unbounded pattern source at the given resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame_no: 0,
            limit: None,
        }
    }

    /// Pattern source that ends after `limit` frames
    pub fn bounded(width: u32, height: u32, limit: u32) -> Self {
        Self {
            width,
            height,
            frame_no: 0,
            limit: Some(limit),
        }
    }
}

impl CameraSource for PatternCamera {
    fn grab(&mut self) -> Result<Option<Frame>> {
        if let Some(limit) = self.limit {
            if self.frame_no >= limit {
                return Ok(None);
            }
        }
        let mut pixels = Vec::with_capacity((self.width * self.height * 3) as usize);
        let phase = self.frame_no;
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push((x.wrapping_add(phase) & 0xFF) as u8);
                pixels.push((y.wrapping_add(phase) & 0xFF) as u8);
                pixels.push((phase & 0xFF) as u8);
            }
        }
        self.frame_no += 1;
        Ok(Some(Frame {
            width: self.width,
            height: self.height,
            pixels,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_camera_ends() {
        let mut cam = PatternCamera::bounded(8, 8, 2);
        assert!(cam.grab().unwrap().is_some());
        assert!(cam.grab().unwrap().is_some());
        assert!(cam.grab().unwrap().is_none());
        // End of capture is sticky
        assert!(cam.grab().unwrap().is_none());
    }

    #[test]
    fn test_pattern_moves_between_frames() {
        let mut cam = PatternCamera::new(16, 16);
        let a = cam.grab().unwrap().unwrap();
        let b = cam.grab().unwrap().unwrap();
        assert_ne!(a.pixels, b.pixels);
        assert_eq!(a.pixels.len(), 16 * 16 * 3);
    }
}
