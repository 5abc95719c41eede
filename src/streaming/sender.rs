//! Frame publisher for the camera daemon

use crate::codec;
use crate::error::Result;
use crate::frame::Frame;
use crate::transport::Transport;
use crate::wire;

/// Publishes encoded frames over a transport as length-prefixed messages.
///
/// Sends are atomic from the caller's perspective: the full prefix+payload is
/// written (looping over partial writes) before the next frame is accepted.
/// The protocol is send-and-forget; no acknowledgment is read back.
pub struct FrameSender<T: Transport> {
    transport: T,
    jpeg_quality: u8,
    sent: u64,
}

impl<T: Transport> FrameSender<T> {
    /// Create a sender over a connected transport
    pub fn new(transport: T, jpeg_quality: u8) -> Self {
        Self {
            transport,
            jpeg_quality,
            sent: 0,
        }
    }

    /// Encode a frame as JPEG and send it as one wire message
    pub fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        let payload = codec::encode_jpeg(frame, self.jpeg_quality)?;
        self.send_payload(&payload)
    }

    /// Send a pre-encoded payload as one wire message
    pub fn send_payload(&mut self, payload: &[u8]) -> Result<()> {
        wire::check_payload_len(payload.len())?;
        self.transport
            .write_all(&(payload.len() as u32).to_be_bytes())?;
        self.transport.write_all(payload)?;
        self.transport.flush()?;
        self.sent += 1;
        log::trace!("Sent frame {} ({} bytes)", self.sent, payload.len());
        Ok(())
    }

    /// Number of messages sent so far
    pub fn sent_count(&self) -> u64 {
        self.sent
    }

    /// Close the underlying connection (idempotent)
    pub fn shutdown(&mut self) -> Result<()> {
        self.transport.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_send_payload_frames_bytes() {
        let transport = MockTransport::new();
        let mut sender = FrameSender::new(transport.clone(), 80);

        sender.send_payload(b"abc").unwrap();
        sender.send_payload(b"defgh").unwrap();

        let written = transport.get_written();
        assert_eq!(&written[..4], &[0, 0, 0, 3]);
        assert_eq!(&written[4..7], b"abc");
        assert_eq!(&written[7..11], &[0, 0, 0, 5]);
        assert_eq!(&written[11..], b"defgh");
        assert_eq!(sender.sent_count(), 2);
    }

    #[test]
    fn test_send_frame_produces_decodable_jpeg() {
        let transport = MockTransport::new();
        let mut sender = FrameSender::new(transport.clone(), 80);

        sender.send_frame(&Frame::black(16, 16)).unwrap();

        let written = transport.get_written();
        let len = crate::wire::decode_header(&written);
        assert_eq!(written.len(), 4 + len);
        let decoded = crate::codec::decode_jpeg(&written[4..]).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 16));
    }
}
