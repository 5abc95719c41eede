//! Viewer-side receive, sample and detect loop

use crate::codec;
use crate::detect::Detector;
use crate::display::FrameSink;
use crate::error::Result;
use crate::sampling::{self, SamplingState};
use crate::streaming::StreamReceiver;
use crate::transport::Transport;
use std::sync::atomic::{AtomicBool, Ordering};

/// Counters reported when the consumer loop exits
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Frames received and presented
    pub frames: u64,
    /// Frames on which detection ran
    pub detected_frames: u64,
    /// Annotations reported after confidence filtering and remapping
    pub annotations: u64,
}

/// Run the receive → sample → detect → present loop until the stream closes
/// or `running` is cleared.
///
/// Frames are presented strictly in arrival order. Frames not selected by
/// the sampling cadence are presented without annotations; no detections are
/// reused or interpolated for them. When detection runs on a downscaled
/// copy, boxes are remapped to full resolution before presentation.
pub fn run_consumer<T: Transport>(
    receiver: &mut StreamReceiver<T>,
    sampling: &mut SamplingState,
    mut detector: Option<&mut dyn Detector>,
    sink: &mut dyn FrameSink,
    running: &AtomicBool,
) -> Result<ConsumerStats> {
    let mut stats = ConsumerStats::default();

    while running.load(Ordering::Relaxed) {
        let frame = match receiver.next_frame()? {
            Some(frame) => frame,
            None => break, // clean close
        };
        stats.frames += 1;

        let selected = sampling.admit();
        let annotations = match (&mut detector, selected) {
            (Some(detector), true) => {
                let scale = sampling.scale_factor();
                let detections = if sampling.downscales() {
                    // Detect on a resized copy; the full-resolution frame is
                    // what gets presented
                    let scaled = codec::resize(&frame, scale)?;
                    detector.detect(&scaled)?
                } else {
                    detector.detect(&frame)?
                };
                stats.detected_frames += 1;
                sampling::filter_and_remap(detections, scale)
            }
            _ => Vec::new(),
        };
        stats.annotations += annotations.len() as u64;

        sink.present(&frame, &annotations)?;
    }

    log::info!(
        "Consumer done: {} frame(s), detection on {}, {} annotation(s)",
        stats.frames,
        stats.detected_frames,
        stats.annotations
    );
    Ok(stats)
}
