//! Camera-side capture and publish loop

use crate::camera::CameraSource;
use crate::error::Result;
use crate::streaming::FrameSender;
use crate::transport::Transport;
use std::sync::atomic::{AtomicBool, Ordering};

/// Run the capture → encode → send loop until the camera ends, the
/// connection breaks, or `running` is cleared.
///
/// Camera end-of-capture and a peer that went away are both clean exits;
/// any other failure propagates to the caller for teardown and reporting.
/// Returns the number of frames sent.
pub fn run_producer<T: Transport>(
    camera: &mut dyn CameraSource,
    sender: &mut FrameSender<T>,
    running: &AtomicBool,
) -> Result<u64> {
    while running.load(Ordering::Relaxed) {
        let frame = match camera.grab()? {
            Some(frame) => frame,
            None => {
                log::info!("Camera ended after {} frame(s)", sender.sent_count());
                break;
            }
        };

        if let Err(e) = sender.send_frame(&frame) {
            if e.is_disconnect() {
                // Send-and-forget protocol: a vanished peer stops capture,
                // it is not a fault of this side
                log::info!("Viewer disconnected after {} frame(s)", sender.sent_count());
                break;
            }
            return Err(e);
        }
    }
    Ok(sender.sent_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PatternCamera;
    use crate::streaming::StreamReceiver;
    use crate::transport::MockTransport;

    #[test]
    fn test_producer_sends_all_frames_then_stops() {
        let transport = MockTransport::new();
        let mut camera = PatternCamera::bounded(32, 24, 4);
        let mut sender = FrameSender::new(transport.clone(), 80);
        let running = AtomicBool::new(true);

        let sent = run_producer(&mut camera, &mut sender, &running).unwrap();
        assert_eq!(sent, 4);

        // Everything written must reassemble into 4 decodable frames
        let echo = MockTransport::new();
        echo.inject_read(&transport.get_written());
        let mut rx = StreamReceiver::new(echo);
        for _ in 0..4 {
            let frame = rx.next_frame().unwrap().unwrap();
            assert_eq!((frame.width, frame.height), (32, 24));
        }
        assert!(rx.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_producer_respects_cancellation() {
        let transport = MockTransport::new();
        let mut camera = PatternCamera::new(16, 16);
        let mut sender = FrameSender::new(transport, 80);
        let running = AtomicBool::new(false);

        let sent = run_producer(&mut camera, &mut sender, &running).unwrap();
        assert_eq!(sent, 0);
    }
}
