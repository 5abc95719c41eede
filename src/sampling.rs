//! Adaptive sampling of received frames
//!
//! Decouples detection rate/resolution from frame arrival rate. Every frame
//! increments the counter; only frames on the configured cadence run
//! detection, optionally on a downscaled copy. Boxes reported in the scaled
//! space are remapped back to full-resolution pixels before anything outside
//! this module sees them.

use crate::detect::Detection;
use crate::error::{Error, Result};

/// Minimum confidence a detection must carry to be reported
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Axis-aligned box in full-resolution pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// A detection remapped to full-resolution coordinates, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: f32,
}

/// Per-connection sampling state, owned by the consumer loop.
///
/// Selection invariant: a frame runs detection iff
/// `frame_index % (skip_interval + 1) == 0`; the index increments by exactly
/// one per received frame whether or not the frame was selected.
#[derive(Debug, Clone)]
pub struct SamplingState {
    frame_index: u64,
    skip_interval: u32,
    scale_factor: f32,
}

impl SamplingState {
    /// Create sampling state.
    ///
    /// `skip_interval` is the number of frames skipped between detections
    /// (0 = detect every frame); `scale_factor` must be in (0, 1].
    pub fn new(skip_interval: u32, scale_factor: f32) -> Result<Self> {
        if !(scale_factor > 0.0 && scale_factor <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "scale factor {} outside (0, 1]",
                scale_factor
            )));
        }
        Ok(Self {
            frame_index: 0,
            skip_interval,
            scale_factor,
        })
    }

    /// Register one received frame; true when it is selected for detection.
    pub fn admit(&mut self) -> bool {
        let selected = self.frame_index % (self.skip_interval as u64 + 1) == 0;
        self.frame_index += 1;
        selected
    }

    /// Scale factor applied to selected frames before detection
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// True when selected frames are detected on a downscaled copy
    pub fn downscales(&self) -> bool {
        self.scale_factor < 1.0
    }

    /// Frames admitted so far
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

/// Remap a box from scaled detection space back to full resolution.
///
/// Pure inverse of the downscale: each coordinate is divided by `scale` and
/// rounded to the nearest pixel. Identity when `scale == 1.0`.
pub fn remap_box(x: f32, y: f32, w: f32, h: f32, scale: f32) -> BoundingBox {
    debug_assert!(scale > 0.0 && scale <= 1.0);
    BoundingBox {
        x: (x / scale).round() as i32,
        y: (y / scale).round() as i32,
        w: (w / scale).round() as i32,
        h: (h / scale).round() as i32,
    }
}

/// Filter raw detections by confidence and remap them to full resolution.
pub fn filter_and_remap(detections: Vec<Detection>, scale: f32) -> Vec<Annotation> {
    detections
        .into_iter()
        .filter(|d| d.confidence > CONFIDENCE_THRESHOLD)
        .map(|d| Annotation {
            bbox: remap_box(d.x, d.y, d.w, d.h, scale),
            label: d.label,
            confidence: d.confidence,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_cadence() {
        // skip_interval = 2 over 9 frames selects exactly indices 0, 3, 6
        let mut state = SamplingState::new(2, 1.0).unwrap();
        let mut selected = Vec::new();
        for i in 0..9 {
            if state.admit() {
                selected.push(i);
            }
        }
        assert_eq!(selected, vec![0, 3, 6]);
        assert_eq!(state.frame_count(), 9);
    }

    #[test]
    fn test_every_frame_selected_by_default_interval() {
        let mut state = SamplingState::new(0, 1.0).unwrap();
        for _ in 0..5 {
            assert!(state.admit());
        }
    }

    #[test]
    fn test_scale_factor_validation() {
        assert!(SamplingState::new(0, 0.0).is_err());
        assert!(SamplingState::new(0, 1.01).is_err());
        assert!(SamplingState::new(0, -0.5).is_err());
        assert!(SamplingState::new(0, 1.0).is_ok());
        assert!(SamplingState::new(0, 0.25).is_ok());
    }

    #[test]
    fn test_remap_half_scale() {
        let b = remap_box(10.0, 20.0, 30.0, 40.0, 0.5);
        assert_eq!(
            b,
            BoundingBox {
                x: 20,
                y: 40,
                w: 60,
                h: 80
            }
        );
    }

    #[test]
    fn test_remap_identity_at_full_scale() {
        let b = remap_box(13.0, 7.0, 99.0, 51.0, 1.0);
        assert_eq!(
            b,
            BoundingBox {
                x: 13,
                y: 7,
                w: 99,
                h: 51
            }
        );
    }

    #[test]
    fn test_remap_rounds_to_nearest_pixel() {
        // 10 / 0.3 = 33.33 -> 33, 20 / 0.3 = 66.67 -> 67
        let b = remap_box(10.0, 20.0, 0.0, 0.0, 0.3);
        assert_eq!(b.x, 33);
        assert_eq!(b.y, 67);
    }

    #[test]
    fn test_filter_and_remap_discards_low_confidence() {
        let dets = vec![
            Detection::new(10.0, 20.0, 30.0, 40.0, "person", 0.9),
            Detection::new(0.0, 0.0, 5.0, 5.0, "cat", 0.4),
        ];
        let annotations = filter_and_remap(dets, 0.5);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].label, "person");
        assert_eq!(
            annotations[0].bbox,
            BoundingBox {
                x: 20,
                y: 40,
                w: 60,
                h: 80
            }
        );
    }
}
