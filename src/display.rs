//! Presentation seam for the viewer
//!
//! On-screen rendering is an external collaborator; the consumer loop only
//! depends on [`FrameSink`]. [`LogSink`] reports detection summaries through
//! the logger, [`NullSink`] discards everything.

use crate::error::Result;
use crate::frame::Frame;
use crate::sampling::Annotation;

/// Consumer of received frames and their (possibly empty) annotations.
///
/// Frames arrive strictly in the order they were received. Frames that were
/// not selected for detection are presented with an empty annotation slice.
pub trait FrameSink {
    /// Present one frame
    fn present(&mut self, frame: &Frame, annotations: &[Annotation]) -> Result<()>;
}

/// Sink that logs detection summaries
pub struct LogSink {
    frames: u64,
}

impl LogSink {
    /// Create a logging sink
    pub fn new() -> Self {
        Self { frames: 0 }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &Frame, annotations: &[Annotation]) -> Result<()> {
        self.frames += 1;
        if annotations.is_empty() {
            log::debug!(
                "Frame {} ({}x{}), no detections",
                self.frames,
                frame.width,
                frame.height
            );
        } else {
            for a in annotations {
                log::info!(
                    "Frame {}: {} {:.2} at ({}, {}) {}x{}",
                    self.frames,
                    a.label,
                    a.confidence,
                    a.bbox.x,
                    a.bbox.y,
                    a.bbox.w,
                    a.bbox.h
                );
            }
        }
        Ok(())
    }
}

/// Sink that discards everything
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame, _annotations: &[Annotation]) -> Result<()> {
        Ok(())
    }
}
